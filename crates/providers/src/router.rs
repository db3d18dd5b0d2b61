//! Provider selection from configuration.
//!
//! The engine takes its backend as an injected `Arc<dyn Provider>`; this
//! module is the one place that decides which concrete implementation that
//! is, based on `AppConfig`. No global registry — build, inject, done.

use crate::mock::MockProvider;
use crate::openai_compat::OpenAiCompatProvider;
use promptree_core::error::ProviderError;
use promptree_core::provider::Provider;
use promptree_config::AppConfig;
use std::sync::Arc;

/// Build the configured provider.
///
/// Resolution order for the API key: the provider's own `[providers.<name>]`
/// entry, then the top-level `api_key`. Providers that need a key fail fast
/// with `NotConfigured` instead of failing on the first request.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    build_named(config, &config.default_provider)
}

/// Build a specific provider by name.
pub fn build_named(config: &AppConfig, name: &str) -> Result<Arc<dyn Provider>, ProviderError> {
    let provider_config = config.providers.get(name);
    let api_key = provider_config
        .and_then(|p| p.api_key.clone())
        .or_else(|| config.api_key.clone());
    let api_url = provider_config.and_then(|p| p.api_url.clone());

    match name {
        "mock" => Ok(Arc::new(MockProvider::new())),
        "ollama" => Ok(Arc::new(OpenAiCompatProvider::ollama(api_url.as_deref()))),
        "openrouter" => {
            let key = require_key(name, api_key)?;
            Ok(Arc::new(OpenAiCompatProvider::openrouter(key)))
        }
        "openai" => {
            let key = require_key(name, api_key)?;
            Ok(Arc::new(OpenAiCompatProvider::openai(key)))
        }
        other => {
            // Any other name is a custom OpenAI-compatible endpoint and
            // must carry its own api_url.
            let url = api_url.ok_or_else(|| {
                ProviderError::NotConfigured(format!(
                    "provider '{other}' needs an api_url in [providers.{other}]"
                ))
            })?;
            Ok(Arc::new(OpenAiCompatProvider::new(
                other,
                url,
                api_key.unwrap_or_default(),
            )))
        }
    }
}

fn require_key(name: &str, api_key: Option<String>) -> Result<String, ProviderError> {
    api_key.ok_or_else(|| ProviderError::NotConfigured(format!("no API key for provider '{name}'")))
}
