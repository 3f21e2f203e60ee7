//! Core domain concepts shared across all subdomains.
//!
//! - [`participant::Participant`]: a human player or the disguised automated player
//! - [`label::Label`]: the anonymous "Player N" identity shown to everyone
//! - [`prompt::Prompt`]: a validated question posed each round
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod label;
pub mod participant;
pub mod prompt;
pub mod string;
