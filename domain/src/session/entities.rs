//! Session entity

use super::phase::Phase;
use crate::core::error::DomainError;
use crate::core::label::Label;
use crate::core::participant::UserId;
use crate::core::prompt::Prompt;
use crate::identity::IdentityRegistry;
use crate::vote::VoteTally;
use rand::Rng;
use std::collections::BTreeSet;

/// Outcome of unmasking the automated participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub automated: Label,
    /// Labels of the humans who guessed right
    pub winners: BTreeSet<Label>,
}

/// A single game instance (Entity)
///
/// Every transition validates first and mutates last, so a rejected command
/// leaves the session untouched.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    prompts: Vec<Prompt>,
    registry: IdentityRegistry,
    tally: VoteTally,
}

impl Session {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self {
            phase: Phase::Registration,
            prompts,
            registry: IdentityRegistry::new(),
            tally: VoteTally::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn tally(&self) -> &VoteTally {
        &self.tally
    }

    /// Prompt for the round currently being played
    pub fn current_prompt(&self) -> Option<(usize, &Prompt)> {
        match self.phase {
            Phase::Active { round } => self.prompts.get(round).map(|p| (round, p)),
            _ => None,
        }
    }

    /// Registration → Registration (roster grows)
    pub fn join(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.phase != Phase::Registration {
            return Err(DomainError::AlreadyStarted);
        }
        self.registry.register(user)
    }

    /// Registration → Active(0)
    ///
    /// Assigns labels; returns the number of labelled participants.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, DomainError> {
        if self.phase != Phase::Registration {
            return Err(DomainError::AlreadyStarted);
        }
        let count = self.registry.assign(rng)?.len();
        self.phase = if self.prompts.is_empty() {
            Phase::Voting
        } else {
            Phase::Active { round: 0 }
        };
        Ok(count)
    }

    /// Check that prompts can be played right now
    pub fn ensure_playing(&self) -> Result<(), DomainError> {
        match self.phase {
            Phase::Active { .. } => Ok(()),
            Phase::Registration => Err(DomainError::NotStarted),
            phase => Err(DomainError::WrongPhase {
                command: "play",
                phase,
            }),
        }
    }

    /// Active(i) → Active(i+1), or Voting after the last prompt
    pub fn complete_round(&mut self) -> Result<Phase, DomainError> {
        let Phase::Active { round } = self.phase else {
            return Err(DomainError::WrongPhase {
                command: "play",
                phase: self.phase,
            });
        };
        self.phase = if round + 1 < self.prompts.len() {
            Phase::Active { round: round + 1 }
        } else {
            Phase::Voting
        };
        Ok(self.phase)
    }

    pub fn cast_vote(&mut self, voter: &UserId, target_number: u32) -> Result<Label, DomainError> {
        match self.phase {
            Phase::Voting => self.tally.cast_vote(&self.registry, voter, target_number),
            Phase::Registration => Err(DomainError::NotStarted),
            phase => Err(DomainError::WrongPhase {
                command: "vote",
                phase,
            }),
        }
    }

    /// Voting → Revealed; repeatable once revealed
    pub fn reveal(&mut self) -> Result<Reveal, DomainError> {
        match self.phase {
            Phase::Voting | Phase::Revealed => {}
            Phase::Registration => return Err(DomainError::NotStarted),
            phase => {
                return Err(DomainError::WrongPhase {
                    command: "reveal",
                    phase,
                });
            }
        }
        let automated = self.registry.automated_label()?;
        let winners = self.tally.winners(&self.registry, automated)?;
        self.phase = Phase::Revealed;
        Ok(Reveal { automated, winners })
    }

    /// Discard everything and return to Registration with the same prompts
    pub fn reset(&mut self) {
        *self = Session::new(std::mem::take(&mut self.prompts));
    }
}
