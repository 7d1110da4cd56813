//! Configuration structure

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::providers::GenerateOptions;
use super::error::{ConfigError, ConfigResult};

/// Reply used when the model produced nothing usable
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't come up with an answer. Please try rephrasing your question.";

/// Full assistant configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model gateway settings
    pub model: ModelSettings,
    /// Downstream problem/todo service
    pub backend: BackendSettings,
    /// HTTP front end
    pub server: ServerSettings,
    /// Reply for degraded interactions (empty model output)
    pub fallback_message: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: ModelSettings::default(),
            backend: BackendSettings::default(),
            server: ServerSettings::default(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl ChatConfig {
    /// Reject values that would make every request fail
    pub fn validate(&self) -> ConfigResult<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::missing("backend.base_url"));
        }
        if self.model.model.trim().is_empty() {
            return Err(ConfigError::missing("model.model"));
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::invalid("model.timeout_secs", "must be greater than zero"));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::invalid("backend.timeout_secs", "must be greater than zero"));
        }
        if self.fallback_message.trim().is_empty() {
            return Err(ConfigError::missing("fallback_message"));
        }
        Ok(())
    }
}

/// Model gateway settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Provider id (`gemini`, `openai`, `mock`, ...)
    pub provider: String,
    /// Model name as used by the provider
    pub model: String,
    /// API key; usually injected from the environment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Per-call deadline for the provider
    pub timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            api_base: None,
            temperature: None,
            max_tokens: None,
            system_prompt: None,
            timeout_secs: 30,
        }
    }
}

impl ModelSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Generation options for the gateway
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            system_prompt: self.system_prompt.clone(),
        }
    }
}

/// Downstream service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the problem/todo API (without `/v1`)
    pub base_url: String,
    /// Value for the `x-service-token` header on authenticated calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    /// Per-call deadline for tool calls
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            service_token: None,
            timeout_secs: 10,
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP front end settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
        }
    }
}

impl ServerSettings {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ChatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model.provider, "gemini");
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.model.timeout(), Duration::from_secs(30));
        assert_eq!(config.backend.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ChatConfig::default();
        config.backend.base_url = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Missing { .. })));

        let mut config = ChatConfig::default();
        config.model.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let mut config = ChatConfig::default();
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ChatConfig = serde_yaml::from_str("backend:\n  base_url: http://api.test\n").unwrap();
        assert_eq!(config.backend.base_url, "http://api.test");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert_eq!(config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_generate_options_from_settings() {
        let settings = ModelSettings {
            temperature: Some(0.3),
            system_prompt: Some("Be brief".to_string()),
            ..Default::default()
        };
        let options = settings.generate_options();
        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.system_prompt.as_deref(), Some("Be brief"));
        assert_eq!(options.max_tokens, None);
    }
}
