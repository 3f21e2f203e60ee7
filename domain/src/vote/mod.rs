//! Vote domain
//!
//! Each registered human gets exactly one guess at which label hides the
//! automated participant.

pub mod tally;

pub use tally::VoteTally;
