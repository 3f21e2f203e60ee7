//! Console transport configuration from TOML (`[console]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsoleConfig {
    /// Channel the console lines are posted to (default: "lobby")
    pub channel: String,
}

impl Default for FileConsoleConfig {
    fn default() -> Self {
        Self {
            channel: "lobby".to_string(),
        }
    }
}
