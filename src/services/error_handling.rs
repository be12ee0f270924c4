use anyhow::{Context, Result};
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Custom error types with descriptive messages
#[derive(Error, Debug)]
pub enum HafalanError {
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Record not found: {id}")]
    NotFound { id: Uuid },

    #[error("Store operation failed: {operation}")]
    Store {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl HafalanError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error context wrapper for better debugging
pub struct ErrorContext {
    operation: String,
    details: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.details.push((key.into(), value.to_string()));
        self
    }

    pub fn wrap<T>(self, result: Result<T>) -> Result<T> {
        result.with_context(|| {
            let mut msg = format!("Operation '{}' failed", self.operation);
            if !self.details.is_empty() {
                msg.push_str(" with context:");
                for (key, value) in self.details {
                    msg.push_str(&format!("\n  {}: {}", key, value));
                }
            }
            msg
        })
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_error_with_context(context: &str, error: &anyhow::Error) {
        error!(
            context = %context,
            error = %error,
            error_chain = ?error.chain().map(|e| e.to_string()).collect::<Vec<_>>(),
            "Error occurred"
        );
    }

    pub fn log_validation_failure(field: &str, value: &str, reason: &str) {
        warn!(
            field = %field,
            value = %value,
            reason = %reason,
            "Validation failed"
        );
    }
}

/// User-facing error messages
pub struct UserErrorFormatter;

impl UserErrorFormatter {
    pub fn format_for_ui(error: &anyhow::Error) -> String {
        if let Some(hafalan_error) = error.downcast_ref::<HafalanError>() {
            return Self::format_hafalan_error(hafalan_error);
        }

        let error_str = error.to_string().to_lowercase();

        if error_str.contains("network") || error_str.contains("connection") {
            return "Koneksi bermasalah. Periksa jaringan lalu coba lagi.".to_string();
        }

        if error_str.contains("timeout") || error_str.contains("timed out") {
            return "Waktu habis. Silakan coba lagi.".to_string();
        }

        "Terjadi kesalahan. Silakan coba lagi.".to_string()
    }

    fn format_hafalan_error(error: &HafalanError) -> String {
        match error {
            HafalanError::Validation { reason, .. } => reason.clone(),
            HafalanError::NotFound { .. } => "Data tidak ditemukan".to_string(),
            HafalanError::Configuration { message } => {
                format!("Konfigurasi tidak valid: {}", message)
            }
            HafalanError::Store { .. } => "Terjadi kesalahan. Silakan coba lagi.".to_string(),
        }
    }
}
