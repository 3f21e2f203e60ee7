//! Domain layer for imitation-game
//!
//! This crate contains the core game logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Labels
//!
//! Every participant, human or automated, plays behind an anonymous
//! "Player N" label. The label bijection is drawn once per session with a
//! fair shuffle and never exposes which label is the automated player
//! until the reveal.
//!
//! ## Phases
//!
//! - **Registration**: players `join`
//! - **Active**: prompts are played one round at a time
//! - **Voting**: each human guesses one label
//! - **Revealed**: the automated label and the correct guessers are announced

pub mod core;
pub mod identity;
pub mod prompt;
pub mod round;
pub mod session;
pub mod vote;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    label::Label,
    participant::{Participant, UserId},
    prompt::Prompt,
};
pub use identity::{IdentityRegistry, LabelAssignment, assign_labels};
pub use prompt::PromptTemplate;
pub use round::{CollectResult, NO_ANSWER, RevealedAnswer, RoundAnswers};
pub use session::{Command, CommandParseError, Phase, Reveal, Session};
pub use vote::VoteTally;
