//! Game parameters: round timing and command surface.
//!
//! [`GameParams`] groups the static parameters that control
//! [`SessionCoordinator`](crate::use_cases::run_session::SessionCoordinator)
//! and [`AnswerCollector`](crate::use_cases::collect_round::AnswerCollector).

use imitation_domain::{NO_ANSWER, Prompt, PromptTemplate};
use std::time::Duration;
use thiserror::Error;

/// Invalid parameter combinations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameParamsError {
    #[error("at least one prompt is required")]
    NoPrompts,

    #[error("round deadline must be greater than zero")]
    ZeroDeadline,

    #[error(
        "pacing delay ({pacing:?}) plus provider timeout ({provider:?}) must be shorter than the round deadline ({deadline:?})"
    )]
    AutomatedAnswerTooSlow {
        pacing: Duration,
        provider: Duration,
        deadline: Duration,
    },

    #[error("command prefix cannot be empty")]
    EmptyPrefix,

    #[error("placeholder for missing answers cannot be empty")]
    EmptyPlaceholder,
}

/// Session control parameters.
#[derive(Debug, Clone)]
pub struct GameParams {
    /// Questions played in order, one round each.
    pub prompts: Vec<Prompt>,
    /// Hard wall-clock limit for a round, measured from the round start.
    pub round_deadline: Duration,
    /// Delay between the first human answer and the automated answer request.
    pub pacing_delay: Duration,
    /// Upper bound on a single completion provider call.
    pub provider_timeout: Duration,
    /// Prefix that marks a chat message as a command.
    pub command_prefix: String,
    /// Recorded for humans who did not answer in time.
    pub no_answer_text: String,
    /// Seed for label and answer-order shuffles.
    pub seed: Option<u64>,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            prompts: PromptTemplate::default_prompts(),
            round_deadline: Duration::from_secs(30),
            pacing_delay: Duration::from_secs(2),
            provider_timeout: Duration::from_secs(5),
            command_prefix: "!".to_string(),
            no_answer_text: NO_ANSWER.to_string(),
            seed: None,
        }
    }
}

impl GameParams {
    // ==================== Builder Methods ====================

    pub fn with_prompts(mut self, prompts: Vec<Prompt>) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_round_deadline(mut self, deadline: Duration) -> Self {
        self.round_deadline = deadline;
        self
    }

    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    pub fn with_no_answer_text(mut self, text: impl Into<String>) -> Self {
        self.no_answer_text = text.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Render a command with the configured prefix, e.g. `` `!join` ``
    pub fn command(&self, usage: &str) -> String {
        format!("`{}{}`", self.command_prefix, usage)
    }

    pub fn validate(&self) -> Result<(), GameParamsError> {
        if self.prompts.is_empty() {
            return Err(GameParamsError::NoPrompts);
        }
        if self.round_deadline.is_zero() {
            return Err(GameParamsError::ZeroDeadline);
        }
        if self.pacing_delay + self.provider_timeout >= self.round_deadline {
            return Err(GameParamsError::AutomatedAnswerTooSlow {
                pacing: self.pacing_delay,
                provider: self.provider_timeout,
                deadline: self.round_deadline,
            });
        }
        if self.command_prefix.trim().is_empty() {
            return Err(GameParamsError::EmptyPrefix);
        }
        if self.no_answer_text.trim().is_empty() {
            return Err(GameParamsError::EmptyPlaceholder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = GameParams::default();
        assert_eq!(params.prompts.len(), 5);
        assert_eq!(params.round_deadline, Duration::from_secs(30));
        assert_eq!(params.pacing_delay, Duration::from_secs(2));
        assert_eq!(params.command_prefix, "!");
        assert_eq!(params.no_answer_text, "No Answer");
        assert!(params.seed.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let params = GameParams::default()
            .with_prompts(vec![Prompt::new("Favorite color?")])
            .with_round_deadline(Duration::from_secs(10))
            .with_command_prefix("/")
            .with_seed(7);

        assert_eq!(params.prompts.len(), 1);
        assert_eq!(params.round_deadline, Duration::from_secs(10));
        assert_eq!(params.command("vote <player#>"), "`/vote <player#>`");
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_slow_automated_answer() {
        let params = GameParams::default()
            .with_round_deadline(Duration::from_secs(6))
            .with_pacing_delay(Duration::from_secs(2))
            .with_provider_timeout(Duration::from_secs(4));
        assert!(matches!(
            params.validate(),
            Err(GameParamsError::AutomatedAnswerTooSlow { .. })
        ));
    }

    #[test]
    fn test_validate_other_errors() {
        assert_eq!(
            GameParams::default().with_prompts(Vec::new()).validate(),
            Err(GameParamsError::NoPrompts)
        );
        assert_eq!(
            GameParams::default()
                .with_round_deadline(Duration::ZERO)
                .validate(),
            Err(GameParamsError::ZeroDeadline)
        );
        assert_eq!(
            GameParams::default().with_command_prefix(" ").validate(),
            Err(GameParamsError::EmptyPrefix)
        );
    }
}
