//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once validated.

mod console;
mod game;
mod provider;

pub use console::FileConsoleConfig;
pub use game::FileGameConfig;
pub use provider::FileProviderConfig;

use imitation_application::{FallbackAnswers, GameParams, GameParamsError};
use imitation_domain::Prompt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("game.prompts[{0}] is blank")]
    BlankPrompt(usize),

    #[error("provider.fallback_answers must contain at least one non-blank answer")]
    NoFallbackAnswers,

    #[error("console.channel cannot be empty")]
    EmptyChannel,

    #[error(transparent)]
    Params(#[from] GameParamsError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Game flow settings
    pub game: FileGameConfig,
    /// Automated player's completion provider
    pub provider: FileProviderConfig,
    /// Local console transport
    pub console: FileConsoleConfig,
}

impl FileConfig {
    /// Convert into validated [`GameParams`]
    pub fn to_game_params(&self) -> Result<GameParams, ConfigValidationError> {
        let prompts = self
            .game
            .prompts
            .iter()
            .enumerate()
            .map(|(i, p)| Prompt::try_new(p.as_str()).ok_or(ConfigValidationError::BlankPrompt(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut params = GameParams::default()
            .with_prompts(prompts)
            .with_round_deadline(self.game.round_deadline())
            .with_pacing_delay(self.game.pacing_delay())
            .with_provider_timeout(self.provider.timeout())
            .with_command_prefix(self.game.command_prefix.clone())
            .with_no_answer_text(self.game.no_answer_text.clone());
        if let Some(seed) = self.game.seed {
            params = params.with_seed(seed);
        }
        params.validate()?;
        Ok(params)
    }

    /// Fallback answers for the automated player, seeded like the game
    pub fn fallback_answers(&self) -> Result<FallbackAnswers, ConfigValidationError> {
        if self.provider.fallback_answers.iter().all(|a| a.trim().is_empty()) {
            return Err(ConfigValidationError::NoFallbackAnswers);
        }
        Ok(FallbackAnswers::new(
            self.provider.fallback_answers.clone(),
            self.game.seed,
        ))
    }

    /// Run every check without building anything
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.console.channel.trim().is_empty() {
            return Err(ConfigValidationError::EmptyChannel);
        }
        self.to_game_params()?;
        self.fallback_answers()?;
        Ok(())
    }
}
