//! File-based configuration (YAML)
//!
//! Lookup order for the file: explicit path, then `LEETCHAT_CONFIG`, then
//! the user-level `~/.config/leetchat/config.yaml`. A missing file is not an
//! error: defaults apply and the environment can still override them.

use std::fs;
use std::path::{Path, PathBuf};

use super::env::{apply_env_overrides, EnvSource, ProcessEnv};
use super::error::ConfigResult;
use super::settings::ChatConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "LEETCHAT_CONFIG";

/// Loads `ChatConfig` from a YAML file plus environment overrides
///
/// # Example
///
/// ```no_run
/// use leetchat_core::config::ConfigLoader;
///
/// let config = ConfigLoader::discover().load()?;
/// println!("serving on {}", config.server.bind_address());
/// # Ok::<(), leetchat_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load from a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Defaults and environment only
    pub fn without_file() -> Self {
        Self { path: None }
    }

    /// Pick the file from `LEETCHAT_CONFIG` or the user config directory
    pub fn discover() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self {
                path: Self::user_path(),
            },
        }
    }

    /// User-level config path (~/.config/leetchat/config.yaml)
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join("leetchat").join("config.yaml"))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the file (if any) without applying the environment
    pub fn load_file(&self) -> ConfigResult<ChatConfig> {
        match &self.path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)?;
                if content.trim().is_empty() {
                    return Ok(ChatConfig::default());
                }
                Ok(serde_yaml::from_str(&content)?)
            }
            _ => Ok(ChatConfig::default()),
        }
    }

    /// Load file, apply process environment, validate
    pub fn load(&self) -> ConfigResult<ChatConfig> {
        self.load_with_env(&ProcessEnv)
    }

    /// Load file, apply the given environment, validate
    pub fn load_with_env(&self, env: &dyn EnvSource) -> ConfigResult<ChatConfig> {
        let mut config = self.load_file()?;
        apply_env_overrides(&mut config, env)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MapEnv;
    use crate::config::ConfigError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("absent.yaml"));
        let config = loader.load_with_env(&MapEnv::default()).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_yaml_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "model:\n  provider: mock\n  timeout_secs: 5\nbackend:\n  base_url: http://backend.test\n  service_token: svc\nserver:\n  port: 9100\n",
        )
        .unwrap();

        let config = ConfigLoader::new(&path).load_with_env(&MapEnv::default()).unwrap();
        assert_eq!(config.model.provider, "mock");
        assert_eq!(config.model.timeout_secs, 5);
        assert_eq!(config.backend.base_url, "http://backend.test");
        assert_eq!(config.backend.service_token.as_deref(), Some("svc"));
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_environment_wins_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "backend:\n  base_url: http://from-file\n").unwrap();

        let env = MapEnv::from_pairs([("BACKEND_URL", "http://from-env")]);
        let config = ConfigLoader::new(&path).load_with_env(&env).unwrap();
        assert_eq!(config.backend.base_url, "http://from-env");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "model: [unclosed").unwrap();

        let err = ConfigLoader::new(&path).load_with_env(&MapEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(ConfigLoader::new(&path).load_file().unwrap(), ChatConfig::default());
    }

    #[test]
    fn test_without_file() {
        assert!(ConfigLoader::without_file().path().is_none());
        assert!(ConfigLoader::without_file().load_with_env(&MapEnv::default()).is_ok());
    }
}
