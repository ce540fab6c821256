//! Optional AI suggestion providers

pub mod client;
pub mod parser;
pub mod prompts;
pub mod provider;

pub use provider::{AiSuggestions, SuggestionProvider, SuggestionRequest};

use crate::config::{ProviderKind, SuggestionConfig};
use crate::error::Result;
use client::{ChatCompletionsClient, OllamaClient};
use log::warn;

/// Construct the configured provider, if any.
///
/// A chat provider without an API key in the environment is treated as not
/// configured: analyses then run with the baseline suggestions only.
pub fn build_provider(config: &SuggestionConfig) -> Result<Option<Box<dyn SuggestionProvider>>> {
    match config.provider {
        ProviderKind::None => Ok(None),
        ProviderKind::OpenAi => match std::env::var(&config.api_key_env) {
            Ok(api_key) if !api_key.trim().is_empty() => {
                let provider: Box<dyn SuggestionProvider> =
                    Box::new(ChatCompletionsClient::new(config, api_key)?);
                Ok(Some(provider))
            }
            _ => {
                warn!(
                    "No API key found in {}, using baseline suggestions",
                    config.api_key_env
                );
                Ok(None)
            }
        },
        ProviderKind::Ollama => {
            let provider: Box<dyn SuggestionProvider> = Box::new(OllamaClient::new(config)?);
            Ok(Some(provider))
        }
    }
}
