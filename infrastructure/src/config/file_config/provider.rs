//! Completion provider configuration from TOML (`[provider]` section)

use imitation_domain::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible provider settings for the automated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Use the remote provider at all (default: true)
    pub enabled: bool,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the API (can point at any OpenAI-compatible server).
    pub base_url: String,
    pub model: String,
    /// Max tokens per answer; answers are meant to be one or two words.
    pub max_tokens: u32,
    /// Per-request timeout in milliseconds (default: 5000)
    pub timeout_ms: u64,
    /// Persona sent as the system message
    pub system_prompt: String,
    /// Answers used when the provider is unavailable or fails
    pub fallback_answers: Vec<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 10,
            timeout_ms: 5000,
            system_prompt: PromptTemplate::automated_persona().to_string(),
            fallback_answers: PromptTemplate::fallback_answers()
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

impl FileProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured key, else the value of `api_key_env`
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        let non_blank = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };
        self.api_key.clone().and_then(non_blank).or_else(|| {
            std::env::var(&self.api_key_env)
                .ok()
                .and_then(non_blank)
        })
    }
}
