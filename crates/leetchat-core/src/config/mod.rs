//! Configuration for the assistant
//!
//! Values come from, in increasing precedence:
//! - built-in defaults (`ChatConfig::default()`)
//! - a YAML file (`ConfigLoader`)
//! - environment variables (`apply_env_overrides`)

mod error;
mod settings;
mod file;
mod env;

pub use error::{ConfigError, ConfigResult};
pub use settings::{
    ChatConfig, ModelSettings, BackendSettings, ServerSettings, DEFAULT_FALLBACK_MESSAGE,
};
pub use file::{ConfigLoader, CONFIG_PATH_ENV};
pub use env::{apply_env_overrides, api_key_vars, EnvSource, MapEnv, ProcessEnv};
