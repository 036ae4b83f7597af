//! Unified application error type.
//! All modules (models, api, core, cli, export) return AppError to keep the
//! error handling consistent and easy to surface as a notification.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Local checks (no network call was made)
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("{what} index {index} out of range (len {len})")]
    Index {
        what: &'static str,
        index: usize,
        len: usize,
    },

    // ---------------------------
    // Backend
    // ---------------------------
    #[error("Network error: {0}")]
    Network(String),

    /// `message` is the backend's own text, shown to the user unchanged.
    #[error("{}", .message.as_deref().unwrap_or("Server error"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not logged in or session expired. Run `spot login` first")]
    Unauthorized,

    #[error("This command requires the '{0}' role")]
    Forbidden(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Text shown in a view notification.
    ///
    /// Server errors carry the backend message verbatim when it sent one;
    /// otherwise `fallback` is used.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Server {
                message: Some(m), ..
            } => m.clone(),
            AppError::Server { message: None, .. } | AppError::Network(_) => fallback.to_string(),
            AppError::NotFound(m) if !m.is_empty() => m.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
