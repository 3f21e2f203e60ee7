//! OpenAI-compatible chat completions provider
//!
//! Asks the model to answer a prompt in the automated player's persona.

use super::ProviderBuildError;
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use imitation_application::{CompletionProvider, ProviderError};
use imitation_domain::{Prompt, PromptTemplate};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderBuildError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderBuildError::Client(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            max_tokens: 10,
            system_prompt: PromptTemplate::automated_persona().to_string(),
        })
    }

    pub fn from_config(
        config: &FileProviderConfig,
        api_key: String,
    ) -> Result<Self, ProviderBuildError> {
        Ok(
            Self::new(api_key, &config.base_url, &config.model, config.timeout())?
                .with_max_tokens(config.max_tokens)
                .with_system_prompt(&config.system_prompt),
        )
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// `base_url` may or may not already carry the `/v1` segment
    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    fn request_body(&self, prompt: &Prompt) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": self.system_prompt},
                {"role": "user", "content": prompt.content()}
            ],
            "max_tokens": self.max_tokens,
        })
    }

    fn parse_completion(body: &serde_json::Value) -> Result<String, ProviderError> {
        let content = body
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| ProviderError::InvalidResponse("missing choices[0].message.content".into()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(ProviderError::EmptyCompletion);
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate_answer(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let answer = Self::parse_completion(&body)?;
        debug!(model = %self.model, "Completion received ({} chars)", answer.len());
        Ok(answer)
    }
}
