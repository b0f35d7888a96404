use thiserror::Error;

/// Main error type for garmin-sheets
#[derive(Error, Debug)]
pub enum SheetSyncError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited. Please wait before retrying.")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Spreadsheet is empty. Please ensure headers are set up.")]
    EmptySheet,

    #[error("Spreadsheet error: {0}")]
    Sheet(String),
}

pub type Result<T> = std::result::Result<T, SheetSyncError>;

impl SheetSyncError {
    /// Create an authentication error from a message
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a spreadsheet error from a message
    pub fn sheet(msg: impl Into<String>) -> Self {
        Self::Sheet(msg.into())
    }
}
