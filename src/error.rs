//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote call returned a non-success status or an unusable body
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Create call succeeded at the transport level but carried no confirmation id
    #[error("Submission rejected: response did not contain a confirmation id")]
    SubmissionRejected,

    /// Excel export error
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a fetch error with message
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(e.to_string())
    }
}
