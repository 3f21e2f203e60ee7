//! Participant roster and label assignment

use crate::core::error::DomainError;
use crate::core::label::Label;
use crate::core::participant::{Participant, UserId};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

/// Bijection between session participants and their labels
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct LabelAssignment {
    label_of: HashMap<Participant, Label>,
    participant_of: HashMap<Label, Participant>,
}

impl LabelAssignment {
    pub fn label_for(&self, participant: &Participant) -> Option<Label> {
        self.label_of.get(participant).copied()
    }

    pub fn participant_for(&self, label: Label) -> Option<&Participant> {
        self.participant_of.get(&label)
    }

    /// Number of labelled participants (humans plus the automated one)
    pub fn len(&self) -> usize {
        self.participant_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participant_of.is_empty()
    }
}

/// Assign `Player 1..=N` to the roster plus the automated participant
///
/// The participants are put through a Fisher-Yates shuffle so every
/// permutation is equally likely; this is what hides the automated player.
pub fn assign_labels<R: Rng + ?Sized>(
    roster: &[UserId],
    rng: &mut R,
) -> Result<LabelAssignment, DomainError> {
    if roster.is_empty() {
        return Err(DomainError::EmptyRoster);
    }

    let mut participants: Vec<Participant> =
        roster.iter().cloned().map(Participant::Human).collect();
    participants.push(Participant::Automated);
    participants.shuffle(rng);

    let mut label_of = HashMap::with_capacity(participants.len());
    let mut participant_of = HashMap::with_capacity(participants.len());
    for (i, participant) in participants.into_iter().enumerate() {
        let label = Label::new(i as u32 + 1);
        label_of.insert(participant.clone(), label);
        participant_of.insert(label, participant);
    }

    Ok(LabelAssignment {
        label_of,
        participant_of,
    })
}

/// Roster of registered humans plus, once the game starts, their labels
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    /// Registration order
    roster: Vec<UserId>,
    members: HashSet<UserId>,
    assignment: Option<LabelAssignment>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a human to the roster
    pub fn register(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.assignment.is_some() {
            return Err(DomainError::AlreadyStarted);
        }
        if !self.members.insert(user.clone()) {
            return Err(DomainError::DuplicateParticipant);
        }
        self.roster.push(user);
        Ok(())
    }

    /// Freeze the roster and assign labels
    pub fn assign<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&LabelAssignment, DomainError> {
        if self.assignment.is_some() {
            return Err(DomainError::AlreadyStarted);
        }
        let assignment = assign_labels(&self.roster, rng)?;
        let assigned: &LabelAssignment = self.assignment.insert(assignment);
        Ok(assigned)
    }

    pub fn is_registered(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    pub fn roster(&self) -> &[UserId] {
        &self.roster
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn label_for(&self, participant: &Participant) -> Result<Label, DomainError> {
        self.assignment
            .as_ref()
            .and_then(|a| a.label_for(participant))
            .ok_or_else(|| DomainError::UnknownParticipant(participant.to_string()))
    }

    pub fn participant_for(&self, label: Label) -> Result<&Participant, DomainError> {
        self.assignment
            .as_ref()
            .and_then(|a| a.participant_for(label))
            .ok_or_else(|| DomainError::UnknownLabel(label.to_string()))
    }

    /// Resolve a label number typed by a player
    pub fn label_from_number(&self, number: u32) -> Option<Label> {
        let label = Label::new(number);
        self.assignment
            .as_ref()
            .and_then(|a| a.participant_for(label))
            .map(|_| label)
    }

    pub fn automated_label(&self) -> Result<Label, DomainError> {
        self.label_for(&Participant::Automated)
    }

    /// All labels in play, in numeric order
    pub fn labels(&self) -> Vec<Label> {
        let count = self.assignment.as_ref().map_or(0, LabelAssignment::len);
        (1..=count as u32).map(Label::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap as Counts;

    fn users(names: &[&str]) -> Vec<UserId> {
        names.iter().map(|n| UserId::new(*n)).collect()
    }

    fn registry_with(names: &[&str]) -> IdentityRegistry {
        let mut registry = IdentityRegistry::new();
        for user in users(names) {
            registry.register(user).unwrap();
        }
        registry
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = registry_with(&["alice"]);
        assert_eq!(
            registry.register(UserId::new("alice")),
            Err(DomainError::DuplicateParticipant)
        );
        assert_eq!(registry.roster().len(), 1);
    }

    #[test]
    fn test_register_after_assignment() {
        let mut registry = registry_with(&["alice"]);
        registry.assign(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(
            registry.register(UserId::new("bob")),
            Err(DomainError::AlreadyStarted)
        );
        assert!(!registry.is_registered(&UserId::new("bob")));
    }

    #[test]
    fn test_roster_keeps_registration_order() {
        let registry = registry_with(&["carol", "alice", "bob"]);
        assert_eq!(registry.roster(), users(&["carol", "alice", "bob"]).as_slice());
    }

    #[test]
    fn test_assign_empty_roster() {
        let mut registry = IdentityRegistry::new();
        let result = registry.assign(&mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(DomainError::EmptyRoster)));
        assert!(!registry.is_assigned());
    }

    #[test]
    fn test_assign_twice_rejected() {
        let mut registry = registry_with(&["alice"]);
        registry.assign(&mut StdRng::seed_from_u64(1)).unwrap();
        let again = registry.assign(&mut StdRng::seed_from_u64(2));
        assert!(matches!(again, Err(DomainError::AlreadyStarted)));
    }

    #[test]
    fn test_assignment_is_bijection() {
        let roster = users(&["u1", "u2", "u3", "u4"]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let assignment = assign_labels(&roster, &mut rng).unwrap();
            assert_eq!(assignment.len(), roster.len() + 1);

            let mut seen = HashSet::new();
            let everyone = roster
                .iter()
                .cloned()
                .map(Participant::Human)
                .chain(std::iter::once(Participant::Automated));
            for participant in everyone {
                let label = assignment.label_for(&participant).unwrap();
                assert!((1..=5).contains(&label.number()));
                assert!(seen.insert(label));
                assert_eq!(assignment.participant_for(label), Some(&participant));
            }
        }
    }

    #[test]
    fn test_every_permutation_reachable_and_fair() {
        // 2 humans + automated = 3! = 6 permutations
        let roster = users(&["u1", "u2"]);
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 6000;
        let mut counts: Counts<Vec<u32>, usize> = Counts::new();

        for _ in 0..trials {
            let assignment = assign_labels(&roster, &mut rng).unwrap();
            let key = vec![
                assignment.label_for(&Participant::human("u1")).unwrap().number(),
                assignment.label_for(&Participant::human("u2")).unwrap().number(),
                assignment.label_for(&Participant::Automated).unwrap().number(),
            ];
            *counts.entry(key).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = trials / 6;
        for (perm, count) in &counts {
            // ±20% of the expected 1000 is far outside sampling noise
            assert!(
                count.abs_diff(expected) < expected / 5,
                "permutation {:?} drawn {} times",
                perm,
                count
            );
        }
    }

    #[test]
    fn test_automated_label_spread() {
        let roster = users(&["u1", "u2", "u3"]);
        let mut rng = StdRng::seed_from_u64(99);
        let mut hits = [0usize; 4];
        for _ in 0..4000 {
            let assignment = assign_labels(&roster, &mut rng).unwrap();
            let n = assignment.label_for(&Participant::Automated).unwrap().number();
            hits[n as usize - 1] += 1;
        }
        for count in hits {
            assert!(count.abs_diff(1000) < 200, "count {}", count);
        }
    }

    #[test]
    fn test_lookups_before_assignment() {
        let registry = registry_with(&["alice"]);
        assert!(matches!(
            registry.label_for(&Participant::human("alice")),
            Err(DomainError::UnknownParticipant(_))
        ));
        assert!(matches!(
            registry.participant_for(Label::new(1)),
            Err(DomainError::UnknownLabel(_))
        ));
        assert!(registry.labels().is_empty());
    }

    #[test]
    fn test_lookups_after_assignment() {
        let mut registry = registry_with(&["alice", "bob"]);
        registry.assign(&mut StdRng::seed_from_u64(3)).unwrap();

        let alice = registry.label_for(&Participant::human("alice")).unwrap();
        assert_eq!(
            registry.participant_for(alice).unwrap(),
            &Participant::human("alice")
        );
        assert!(registry.label_for(&Participant::human("mallory")).is_err());
        assert!(registry.participant_for(Label::new(4)).is_err());
        assert_eq!(registry.label_from_number(3), Some(Label::new(3)));
        assert_eq!(registry.label_from_number(0), None);
        assert_eq!(registry.label_from_number(4), None);
        assert_eq!(
            registry.labels(),
            vec![Label::new(1), Label::new(2), Label::new(3)]
        );
    }
}
