//! Environment variable overrides

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::error::{ConfigError, ConfigResult};
use super::settings::ChatConfig;

/// Provider id to the environment variables holding its API key
static API_KEY_VARS: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("gemini", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("google", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    m.insert("anthropic", vec!["ANTHROPIC_API_KEY"]);
    m.insert("groq", vec!["GROQ_API_KEY"]);
    m.insert("ollama", vec![]); // Ollama doesn't need an API key
    m
});

/// Read access to environment variables
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory environment for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Environment variables holding the API key for a provider
pub fn api_key_vars(provider: &str) -> &'static [&'static str] {
    API_KEY_VARS
        .get(provider.to_lowercase().as_str())
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

fn non_empty(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.get(key).filter(|value| !value.trim().is_empty())
}

/// Apply the supported overrides on top of file values.
///
/// | variable | field |
/// |---|---|
/// | `GEMINI_API_KEY` / `GOOGLE_API_KEY` (per provider) | `model.api_key` |
/// | `LEETCHAT_MODEL` | `model.model` |
/// | `BACKEND_URL` | `backend.base_url` |
/// | `SERVICE_TOKEN` | `backend.service_token` |
/// | `LEETCHAT_HOST` | `server.host` |
/// | `LEETCHAT_PORT` | `server.port` |
pub fn apply_env_overrides(config: &mut ChatConfig, env: &dyn EnvSource) -> ConfigResult<()> {
    if let Some(key) = api_key_vars(&config.model.provider)
        .iter()
        .find_map(|var| non_empty(env, var))
    {
        config.model.api_key = Some(key);
    }
    if let Some(model) = non_empty(env, "LEETCHAT_MODEL") {
        config.model.model = model;
    }
    if let Some(url) = non_empty(env, "BACKEND_URL") {
        config.backend.base_url = url;
    }
    if let Some(token) = non_empty(env, "SERVICE_TOKEN") {
        config.backend.service_token = Some(token);
    }
    if let Some(host) = non_empty(env, "LEETCHAT_HOST") {
        config.server.host = host;
    }
    if let Some(port) = non_empty(env, "LEETCHAT_PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid("LEETCHAT_PORT", format!("'{}' is not a port number", port)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_lookup_order() {
        let env = MapEnv::from_pairs([("GOOGLE_API_KEY", "google"), ("GEMINI_API_KEY", "gemini")]);
        let mut config = ChatConfig::default();
        apply_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.model.api_key.as_deref(), Some("gemini"));

        let env = MapEnv::from_pairs([("GOOGLE_API_KEY", "google")]);
        let mut config = ChatConfig::default();
        apply_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.model.api_key.as_deref(), Some("google"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let env = MapEnv::from_pairs([("BACKEND_URL", "  "), ("GEMINI_API_KEY", "")]);
        let mut config = ChatConfig::default();
        apply_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_all_overrides() {
        let env = MapEnv::from_pairs([
            ("LEETCHAT_MODEL", "gemini-1.5-pro"),
            ("BACKEND_URL", "http://backend:8000"),
            ("SERVICE_TOKEN", "svc-token"),
            ("LEETCHAT_HOST", "127.0.0.1"),
            ("LEETCHAT_PORT", "9100"),
        ]);
        let mut config = ChatConfig::default();
        apply_env_overrides(&mut config, &env).unwrap();

        assert_eq!(config.model.model, "gemini-1.5-pro");
        assert_eq!(config.backend.base_url, "http://backend:8000");
        assert_eq!(config.backend.service_token.as_deref(), Some("svc-token"));
        assert_eq!(config.server.bind_address(), "127.0.0.1:9100");
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let env = MapEnv::from_pairs([("LEETCHAT_PORT", "ninety")]);
        let mut config = ChatConfig::default();
        let err = apply_env_overrides(&mut config, &env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_unknown_provider_has_no_key_vars() {
        assert!(api_key_vars("mock").is_empty());
        assert_eq!(api_key_vars("Gemini"), &["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    }
}
