//! Downstream service errors

use thiserror::Error;

/// Errors from the problem/todo API
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx body that is not JSON
    #[error("backend returned a body that is not valid JSON: {0}")]
    InvalidBody(String),

    /// The call did not finish in time
    #[error("backend request timed out")]
    Timeout,
}

impl BackendError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Map reqwest errors, keeping timeouts distinct
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
