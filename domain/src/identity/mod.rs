//! Identity domain
//!
//! Keeps the roster of human players and the hidden bijection between
//! every participant (humans plus the automated player) and their
//! anonymous [`Label`](crate::core::label::Label).

pub mod registry;

pub use registry::{IdentityRegistry, LabelAssignment, assign_labels};
