//! Model gateway implementations
//!
//! ## Architecture
//!
//! The orchestrator only sees the [`ModelGateway`] trait. Real traffic goes
//! through `GenaiGateway`, which uses the `genai` crate for the provider
//! protocols (Gemini by default; anything genai supports by model prefix).
//! Authentication uses the key from `ChatConfig`, never genai's env lookup.
//!
//! The `MockGateway` replays scripted outcomes for tests.

mod traits;
mod error;
mod genai_adapter;
mod genai_gateway;
mod mock_gateway;

// Core traits and types
pub use traits::{GatewayModelConfig, GenerateOptions, ModelGateway, ModelOutcome};
pub use error::{ProviderError, ProviderResult};

pub use genai_gateway::GenaiGateway;
pub use genai_adapter::{extract_model_name, extract_provider};

// Mock gateway for testing
pub use mock_gateway::{MockGateway, MockMode, MockReply};

use crate::config::ModelSettings;
use crate::logging::Logger;
use std::sync::Arc;

/// Create a gateway for the configured provider
///
/// `mock` yields an echoing `MockGateway`; every other provider id goes to
/// `GenaiGateway`.
pub fn create_gateway(settings: &ModelSettings, logger: Arc<dyn Logger>) -> Arc<dyn ModelGateway> {
    match settings.provider.to_lowercase().as_str() {
        "mock" => Arc::new(MockGateway::new(logger)),
        _ => {
            let mut model = GatewayModelConfig::new(settings.model.clone());
            if let Some(key) = &settings.api_key {
                model = model.with_api_key(key.clone());
            }
            if let Some(base) = &settings.api_base {
                model = model.with_api_base(base.clone());
            }
            Arc::new(GenaiGateway::new(
                settings.provider.clone(),
                model,
                settings.generate_options(),
                logger,
            ))
        }
    }
}
