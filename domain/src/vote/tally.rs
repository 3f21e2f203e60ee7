//! Vote recording and winner computation

use crate::core::error::DomainError;
use crate::core::label::Label;
use crate::core::participant::{Participant, UserId};
use crate::identity::IdentityRegistry;
use std::collections::{BTreeSet, HashMap};

/// One-shot votes from registered humans
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    votes: HashMap<UserId, Label>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `voter`'s guess, validated against the session's identities
    ///
    /// Checks run in order: registration, duplicate vote, target validity.
    /// Nothing is recorded on failure.
    pub fn cast_vote(
        &mut self,
        registry: &IdentityRegistry,
        voter: &UserId,
        target_number: u32,
    ) -> Result<Label, DomainError> {
        if !registry.is_registered(voter) {
            return Err(DomainError::NotAParticipant);
        }
        if self.votes.contains_key(voter) {
            return Err(DomainError::AlreadyVoted);
        }
        let target = registry
            .label_from_number(target_number)
            .ok_or(DomainError::InvalidTarget(target_number))?;

        self.votes.insert(voter.clone(), target);
        Ok(target)
    }

    pub fn vote_of(&self, voter: &UserId) -> Option<Label> {
        self.votes.get(voter).copied()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Labels of the voters who picked `automated`, in numeric order
    ///
    /// Voters are reported by their own label rather than their identity.
    pub fn winners(
        &self,
        registry: &IdentityRegistry,
        automated: Label,
    ) -> Result<BTreeSet<Label>, DomainError> {
        self.votes
            .iter()
            .filter(|(_, target)| **target == automated)
            .map(|(voter, _)| registry.label_for(&Participant::Human(voter.clone())))
            .collect()
    }
}
