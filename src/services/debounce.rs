use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::trace;

/// Collapses bursts of calls into a single delayed invocation carrying the
/// latest value.
///
/// Only the timer is cancelled when a call is superseded. Once the quiet period
/// has elapsed the action runs to completion on its own.
pub struct Debouncer<T> {
    quiet_period: Duration,
    action: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(quiet_period: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            quiet_period,
            action: Arc::new(action),
            pending: Mutex::new(None),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, value: T) {
        let deadline = Instant::now() + self.quiet_period;
        let action = self.action.clone();

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            action(value);
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            trace!("superseding pending debounced call");
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.abort();
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.get_mut().take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Fired = Arc<Mutex<Vec<(Instant, &'static str)>>>;

    fn recording_debouncer(quiet_ms: u64) -> (Debouncer<&'static str>, Fired) {
        let fired: Fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let debouncer = Debouncer::new(Duration::from_millis(quiet_ms), move |value| {
            sink.lock().push((Instant::now(), value));
        });
        (debouncer, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_latest_value() {
        let (debouncer, fired) = recording_debouncer(800);
        let start = Instant::now();

        debouncer.schedule("a");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.schedule("ah");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.schedule("ahm");

        tokio::time::sleep(Duration::from_millis(2000)).await;

        let fired = fired.lock();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "ahm");
        assert!(fired[0].0 - start >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_calls_each_fire() {
        let (debouncer, fired) = recording_debouncer(800);

        debouncer.schedule("first");
        tokio::time::sleep(Duration::from_millis(900)).await;
        debouncer.schedule("second");
        tokio::time::sleep(Duration::from_millis(900)).await;

        let values: Vec<_> = fired.lock().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (debouncer, fired) = recording_debouncer(800);

        debouncer.schedule("gone");
        tokio::time::advance(Duration::from_millis(400)).await;
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert!(fired.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (debouncer, fired) = recording_debouncer(800);

        debouncer.schedule("gone");
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert!(fired.lock().is_empty());
    }
}
