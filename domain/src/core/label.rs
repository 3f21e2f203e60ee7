//! Anonymous display labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anonymous per-session identity shown as "Player N" (Value Object)
///
/// Numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label(u32);

impl Label {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(Label::new(3).to_string(), "Player 3");
    }

    #[test]
    fn test_label_ordering() {
        let mut labels = vec![Label::new(3), Label::new(1), Label::new(2)];
        labels.sort();
        assert_eq!(labels, vec![Label::new(1), Label::new(2), Label::new(3)]);
    }
}
