//! Game configuration from TOML (`[game]` section)

use imitation_domain::{NO_ANSWER, PromptTemplate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Questions played in order, one round each
    pub prompts: Vec<String>,
    /// Answer window per question, in seconds (default: 30)
    pub round_deadline_secs: u64,
    /// Delay before the automated answer is requested, in milliseconds (default: 2000)
    pub pacing_delay_ms: u64,
    /// Command prefix (default: "!")
    pub command_prefix: String,
    /// Seed for reproducible shuffles
    pub seed: Option<u64>,
    /// Recorded for players who did not answer in time
    pub no_answer_text: String,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            prompts: PromptTemplate::default_questions()
                .iter()
                .map(|q| q.to_string())
                .collect(),
            round_deadline_secs: 30,
            pacing_delay_ms: 2000,
            command_prefix: "!".to_string(),
            seed: None,
            no_answer_text: NO_ANSWER.to_string(),
        }
    }
}

impl FileGameConfig {
    pub fn round_deadline(&self) -> Duration {
        Duration::from_secs(self.round_deadline_secs)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}
