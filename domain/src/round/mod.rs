//! Round domain
//!
//! One round is the answer-collection cycle for a single prompt. Answers are
//! keyed by [`Label`](crate::core::label::Label) so nothing downstream of
//! collection sees raw identities.

pub mod answers;

pub use answers::{CollectResult, NO_ANSWER, RevealedAnswer, RoundAnswers};
