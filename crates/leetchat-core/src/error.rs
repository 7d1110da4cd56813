//! Request-level errors

use thiserror::Error;

use crate::providers::ProviderError;

/// Errors returned by [`Orchestrator::handle`](crate::orchestrator::Orchestrator::handle).
///
/// Tool failures never show up here; they are fed back to the model.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The model call failed or timed out on either pass
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The request itself cannot be processed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ChatError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_passes_through_display() {
        let err: ChatError = ProviderError::api_error("gemini", 401, "bad key").into();
        assert!(err.is_provider());
        assert_eq!(err.to_string(), "gemini API error (401): bad key");
    }

    #[test]
    fn test_invalid_request_display() {
        let err = ChatError::invalid_request("message must not be empty");
        assert!(!err.is_provider());
        assert_eq!(err.to_string(), "Invalid request: message must not be empty");
    }
}
