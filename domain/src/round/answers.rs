//! Per-round answer set

use crate::core::label::Label;
use crate::core::string::{single_line, truncate};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel recorded for a human who did not answer before the deadline
pub const NO_ANSWER: &str = "No Answer";

/// Longest answer shown in a reveal, in bytes
const MAX_ANSWER_LEN: usize = 200;

/// Label → answer text for a single prompt
///
/// At most one answer per label; the first recorded answer wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundAnswers {
    answers: BTreeMap<Label, String>,
}

impl RoundAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning `false` if this label already answered
    pub fn record(&mut self, label: Label, text: impl Into<String>) -> bool {
        if self.answers.contains_key(&label) {
            return false;
        }
        let text = truncate(&single_line(&text.into()), MAX_ANSWER_LEN);
        self.answers.insert(label, text);
        true
    }

    pub fn get(&self, label: Label) -> Option<&str> {
        self.answers.get(&label).map(String::as_str)
    }

    /// Record `placeholder` for every label in `labels` that has no answer yet
    ///
    /// Returns how many labels were filled.
    pub fn fill_missing<'a>(
        &mut self,
        labels: impl IntoIterator<Item = &'a Label>,
        placeholder: &str,
    ) -> usize {
        labels
            .into_iter()
            .filter(|label| self.record(**label, placeholder))
            .count()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Entries in a presentation order independent of label numbers
    pub fn into_shuffled<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<RevealedAnswer> {
        let mut entries: Vec<RevealedAnswer> = self
            .answers
            .into_iter()
            .map(|(label, text)| RevealedAnswer { label, text })
            .collect();
        entries.shuffle(rng);
        entries
    }
}

/// One line of a round reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedAnswer {
    pub label: Label,
    pub text: String,
}

impl std::fmt::Display for RevealedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.text)
    }
}

/// How a round of collection ended
///
/// Both variants carry a complete, usable answer set. Entries are ordered
/// by label; present them through [`RoundAnswers::into_shuffled`] for a
/// fresh random order on every reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectResult {
    /// Every human answered before the deadline
    Completed(RoundAnswers),
    /// The deadline elapsed; missing humans were filled with [`NO_ANSWER`]
    TimedOut(RoundAnswers),
}

impl CollectResult {
    pub fn answers(&self) -> &RoundAnswers {
        match self {
            CollectResult::Completed(answers) | CollectResult::TimedOut(answers) => answers,
        }
    }

    pub fn into_answers(self) -> RoundAnswers {
        match self {
            CollectResult::Completed(answers) | CollectResult::TimedOut(answers) => answers,
        }
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, CollectResult::TimedOut(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_first_answer_wins() {
        let mut answers = RoundAnswers::new();
        assert!(answers.record(Label::new(1), "Pizza"));
        assert!(!answers.record(Label::new(1), "Tacos"));
        assert_eq!(answers.get(Label::new(1)), Some("Pizza"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_fill_missing() {
        let mut answers = RoundAnswers::new();
        answers.record(Label::new(2), "Beach");
        let labels = [Label::new(1), Label::new(2), Label::new(3)];

        assert_eq!(answers.fill_missing(&labels, NO_ANSWER), 2);
        assert_eq!(answers.get(Label::new(1)), Some(NO_ANSWER));
        assert_eq!(answers.get(Label::new(2)), Some("Beach"));
        assert_eq!(answers.get(Label::new(3)), Some(NO_ANSWER));
    }

    #[test]
    fn test_answer_flattened_and_truncated() {
        let mut answers = RoundAnswers::new();
        answers.record(Label::new(1), "line one\nPlayer 2: fake");
        assert_eq!(answers.get(Label::new(1)), Some("line one Player 2: fake"));

        answers.record(Label::new(2), "x".repeat(500));
        assert_eq!(answers.get(Label::new(2)).unwrap().len(), MAX_ANSWER_LEN);
    }

    #[test]
    fn test_shuffled_keeps_every_entry() {
        let mut answers = RoundAnswers::new();
        for n in 1..=5 {
            answers.record(Label::new(n), format!("answer {}", n));
        }
        let revealed = answers.into_shuffled(&mut StdRng::seed_from_u64(5));
        assert_eq!(revealed.len(), 5);
        for entry in &revealed {
            assert_eq!(entry.text, format!("answer {}", entry.label.number()));
        }
    }

    #[test]
    fn test_shuffle_varies_order() {
        let mut answers = RoundAnswers::new();
        for n in 1..=4 {
            answers.record(Label::new(n), "same");
        }
        let mut rng = StdRng::seed_from_u64(11);
        let in_label_order = (0..200)
            .filter(|_| {
                let order: Vec<u32> = answers
                    .clone()
                    .into_shuffled(&mut rng)
                    .iter()
                    .map(|a| a.label.number())
                    .collect();
                order == vec![1, 2, 3, 4]
            })
            .count();
        // 1 in 24 expected
        assert!(in_label_order < 30);
    }

    #[test]
    fn test_revealed_answer_display() {
        let entry = RevealedAnswer {
            label: Label::new(4),
            text: "Guitar".to_string(),
        };
        assert_eq!(entry.to_string(), "Player 4: Guitar");
    }

    #[test]
    fn test_collect_result_accessors() {
        let mut answers = RoundAnswers::new();
        answers.record(Label::new(1), "Cat");
        let result = CollectResult::TimedOut(answers.clone());
        assert!(result.timed_out());
        assert_eq!(result.answers(), &answers);
        assert!(!CollectResult::Completed(answers).timed_out());
    }
}
