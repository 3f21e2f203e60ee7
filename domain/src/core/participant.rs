//! Participant identities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a human chat user (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Someone holding a seat in a session
///
/// There is exactly one [`Participant::Automated`] per session; its identity
/// must stay hidden behind a [`Label`](super::label::Label) until the reveal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    Human(UserId),
    Automated,
}

impl Participant {
    pub fn human(id: impl Into<String>) -> Self {
        Participant::Human(UserId::new(id))
    }

    pub fn is_automated(&self) -> bool {
        matches!(self, Participant::Automated)
    }

    pub fn as_human(&self) -> Option<&UserId> {
        match self {
            Participant::Human(id) => Some(id),
            Participant::Automated => None,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Human(id) => write!(f, "{}", id),
            Participant::Automated => write!(f, "<automated>"),
        }
    }
}

impl From<UserId> for Participant {
    fn from(id: UserId) -> Self {
        Participant::Human(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_participant() {
        let p = Participant::human("alice");
        assert!(!p.is_automated());
        assert_eq!(p.as_human(), Some(&UserId::new("alice")));
    }

    #[test]
    fn test_automated_participant() {
        assert!(Participant::Automated.is_automated());
        assert!(Participant::Automated.as_human().is_none());
    }
}
