//! Caller credentials threaded into authenticated tool calls

/// Tokens supplied by the caller for one request.
///
/// Handed to the tool executor only. It never becomes part of a
/// [`Conversation`](super::Conversation) and is never sent to the model, and
/// its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialContext {
    authorization: String,
    csrf_token: String,
}

impl CredentialContext {
    /// Create a credential context from the raw header values
    pub fn new(authorization: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            authorization: authorization.into(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Value for the `x-csrf-token` header
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

impl std::fmt::Debug for CredentialContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialContext")
            .field("authorization", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let creds = CredentialContext::new("Bearer abc", "csrf-1");
        assert_eq!(creds.authorization(), "Bearer abc");
        assert_eq!(creds.csrf_token(), "csrf-1");
    }

    #[test]
    fn test_debug_is_redacted() {
        let creds = CredentialContext::new("Bearer secret-token", "csrf-secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("csrf-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
