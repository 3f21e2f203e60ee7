//! Completion provider port
//!
//! Defines the interface for generating the automated player's answers.

use async_trait::async_trait;
use imitation_domain::{Prompt, PromptTemplate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur while generating an answer
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Timeout")]
    Timeout,
}

/// Source of human-sounding answers for the automated player
///
/// Implementations (adapters) live in the infrastructure layer, except for
/// the always-available [`FallbackAnswers`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Produce an answer to `prompt`
    async fn generate_answer(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}

/// Deterministic fallback: a fixed list of short informal answers
///
/// Picks uniformly at random and never fails.
pub struct FallbackAnswers {
    answers: Vec<String>,
    rng: Mutex<StdRng>,
}

impl FallbackAnswers {
    /// Build from a list of answers; blank entries are dropped and an empty
    /// list falls back to the built-in answers.
    ///
    /// `seed` makes the picks reproducible.
    pub fn new(answers: Vec<String>, seed: Option<u64>) -> Self {
        let mut answers: Vec<String> = answers
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if answers.is_empty() {
            answers = PromptTemplate::fallback_answers()
                .iter()
                .map(|a| a.to_string())
                .collect();
        }

        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };

        Self {
            answers,
            rng: Mutex::new(rng),
        }
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn pick(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let index = rng.random_range(0..self.answers.len());
        self.answers[index].clone()
    }
}

impl Default for FallbackAnswers {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

#[async_trait]
impl CompletionProvider for FallbackAnswers {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn generate_answer(&self, _prompt: &Prompt) -> Result<String, ProviderError> {
        Ok(self.pick())
    }
}
