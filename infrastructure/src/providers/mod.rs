//! Completion provider adapters
//!
//! [`remote_provider`] builds the configured remote provider for the
//! automated player. When it fails, the caller runs with the fallback
//! answers only.

#[cfg(feature = "openai")]
pub mod openai;

use crate::config::FileProviderConfig;
use imitation_application::CompletionProvider;
use std::sync::Arc;
use thiserror::Error;

/// Reasons the remote provider could not be built
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderBuildError {
    #[error("remote provider disabled in configuration")]
    Disabled,

    #[error("no API key configured (set {0} or provider.api_key)")]
    MissingApiKey(String),

    #[error("built without the `openai` feature")]
    NotCompiled,

    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

/// Build the remote completion provider described by `config`
pub fn remote_provider(
    config: &FileProviderConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderBuildError> {
    if !config.enabled {
        return Err(ProviderBuildError::Disabled);
    }
    let api_key = config
        .resolve_api_key()
        .ok_or_else(|| ProviderBuildError::MissingApiKey(config.api_key_env.clone()))?;
    build(config, api_key)
}

#[cfg(feature = "openai")]
fn build(
    config: &FileProviderConfig,
    api_key: String,
) -> Result<Arc<dyn CompletionProvider>, ProviderBuildError> {
    let provider = openai::OpenAiProvider::from_config(config, api_key)?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "openai"))]
fn build(
    _config: &FileProviderConfig,
    _api_key: String,
) -> Result<Arc<dyn CompletionProvider>, ProviderBuildError> {
    Err(ProviderBuildError::NotCompiled)
}
