use std::fmt;

pub const TITLE_ERROR: &str = "Error";
pub const TITLE_SUCCESS: &str = "Sukses";
pub const TITLE_CONFIRM: &str = "Konfirmasi";

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(TITLE_ERROR, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(TITLE_SUCCESS, message)
    }

    pub fn is_error(&self) -> bool {
        self.title == TITLE_ERROR
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

/// Where views send alerts and ask for confirmation.
pub trait Notifier: Send + Sync {
    fn alert(&self, alert: &Alert);

    /// Blocks until the user answers.
    fn confirm(&self, title: &str, message: &str) -> bool;
}

pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Records alerts and answers confirmations with a fixed reply.
    pub struct RecordingNotifier {
        alerts: Mutex<Vec<Alert>>,
        prompts: Mutex<Vec<String>>,
        answer: bool,
    }

    impl RecordingNotifier {
        pub fn answering(answer: bool) -> Self {
            Self {
                alerts: Mutex::new(Vec::new()),
                prompts: Mutex::new(Vec::new()),
                answer,
            }
        }

        pub fn alerts(&self) -> Vec<Alert> {
            self.alerts.lock().clone()
        }

        pub fn last_alert(&self) -> Option<Alert> {
            self.alerts.lock().last().cloned()
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().clone()
        }
    }

    impl Default for RecordingNotifier {
        fn default() -> Self {
            Self::answering(true)
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, alert: &Alert) {
            self.alerts.lock().push(alert.clone());
        }

        fn confirm(&self, title: &str, message: &str) -> bool {
            self.prompts.lock().push(format!("{}: {}", title, message));
            self.answer
        }
    }
}
