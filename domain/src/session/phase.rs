//! Session phase

use serde::{Deserialize, Serialize};

/// Coarse state of a session
///
/// ```text
/// Registration ──startgame──▶ Active(0) ──▶ … ──▶ Active(last) ──▶ Voting ──reveal──▶ Revealed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players may join
    Registration,
    /// Prompts are being played; `round` is the zero-based prompt index
    Active { round: usize },
    /// All prompts played, votes are being collected
    Voting,
    /// The automated participant has been unmasked
    Revealed,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Registration => "registration",
            Phase::Active { .. } => "active",
            Phase::Voting => "voting",
            Phase::Revealed => "revealed",
        }
    }

    /// Whether labels have been assigned
    pub fn has_started(&self) -> bool {
        !matches!(self, Phase::Registration)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Active { round } => write!(f, "round {}", round + 1),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Phase::Registration.to_string(), "registration");
        assert_eq!(Phase::Active { round: 2 }.to_string(), "round 3");
        assert_eq!(Phase::Voting.to_string(), "voting");
    }

    #[test]
    fn test_has_started() {
        assert!(!Phase::Registration.has_started());
        assert!(Phase::Active { round: 0 }.has_started());
        assert!(Phase::Revealed.has_started());
    }
}
