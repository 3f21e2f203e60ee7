//! Domain error types

use crate::session::phase::Phase;
use thiserror::Error;

/// Domain-level errors
///
/// Most variants are user-input rejections: the command is refused and no
/// state changes. [`UnknownParticipant`](DomainError::UnknownParticipant) and
/// [`UnknownLabel`](DomainError::UnknownLabel) raised after labels are
/// assigned indicate a coordinator bug instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Game already started")]
    AlreadyStarted,

    #[error("Participant already registered")]
    DuplicateParticipant,

    #[error("No players registered")]
    EmptyRoster,

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Not a participant in this game")]
    NotAParticipant,

    #[error("Participant already voted")]
    AlreadyVoted,

    #[error("Invalid vote target: {0}")]
    InvalidTarget(u32),

    #[error("No game running")]
    NotStarted,

    #[error("'{command}' is not accepted during {phase}")]
    WrongPhase { command: &'static str, phase: Phase },
}

impl DomainError {
    /// Check if this error is a recoverable user-input rejection
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            DomainError::UnknownParticipant(_) | DomainError::UnknownLabel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_phase_display() {
        let error = DomainError::WrongPhase {
            command: "vote",
            phase: Phase::Active { round: 0 },
        };
        assert_eq!(error.to_string(), "'vote' is not accepted during round 1");
    }

    #[test]
    fn test_is_rejection() {
        assert!(DomainError::AlreadyVoted.is_rejection());
        assert!(DomainError::InvalidTarget(9).is_rejection());
        assert!(DomainError::EmptyRoster.is_rejection());
        assert!(!DomainError::UnknownParticipant("u1".to_string()).is_rejection());
        assert!(!DomainError::UnknownLabel("Player 7".to_string()).is_rejection());
    }
}
