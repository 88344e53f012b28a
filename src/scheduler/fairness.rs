use super::SchedError;
use crate::model::{PersonId, Roster};
use std::collections::HashMap;

/// Compteur d'affectations par personne pour une exécution.
#[derive(Debug, Clone, Default)]
pub struct FairnessTracker {
    counts: HashMap<PersonId, u32>,
    order: Vec<PersonId>,
}

impl FairnessTracker {
    /// Tous les compteurs à zéro.
    pub fn initialize(roster: &Roster) -> Self {
        let mut tracker = Self::default();
        for person in &roster.people {
            if tracker.counts.insert(person.id.clone(), 0).is_none() {
                tracker.order.push(person.id.clone());
            }
        }
        tracker
    }

    pub fn increment(&mut self, person: &PersonId) -> Result<u32, SchedError> {
        let count = self
            .counts
            .get_mut(person)
            .ok_or_else(|| SchedError::UnknownPerson(person.as_str().to_string()))?;
        *count += 1;
        Ok(*count)
    }

    pub fn count_of(&self, person: &PersonId) -> u32 {
        self.counts.get(person).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Compteurs dans l'ordre du roster.
    pub fn counts(&self) -> Vec<(&PersonId, u32)> {
        self.order.iter().map(|id| (id, self.count_of(id))).collect()
    }
}
