use crate::model::{Day, Person, Roster};

/// Index jour → personnes disponibles, dans l'ordre du roster.
///
/// Construit une fois par exécution puis lu seulement. Une personne apparaît
/// sous un jour si et seulement si ce jour fait partie de ses disponibilités
/// et de la période demandée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityIndex<'a> {
    entries: Vec<(Day, Vec<&'a Person>)>,
}

impl<'a> AvailabilityIndex<'a> {
    pub fn build(roster: &'a Roster, period: &[Day]) -> Self {
        let mut days = period.to_vec();
        days.sort();
        days.dedup();

        let entries = days
            .into_iter()
            .map(|day| {
                let people = roster.people.iter().filter(|p| p.is_available(day)).collect();
                (day, people)
            })
            .collect();
        Self { entries }
    }

    /// Candidats d'un jour ; vide pour un jour hors période.
    pub fn candidates(&self, day: Day) -> &[&'a Person] {
        self.entries
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, people)| people.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, day: Day) -> usize {
        self.candidates(day).len()
    }

    /// Jours indexés, dans l'ordre naturel.
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.entries.iter().map(|(d, _)| *d)
    }

    /// Ordre de traitement : jours les moins pourvus d'abord, tri stable
    /// (l'ordre naturel départage les égalités).
    pub fn processing_order(&self) -> Vec<Day> {
        let mut order: Vec<Day> = self.days().collect();
        order.sort_by_key(|d| self.count(*d));
        order
    }
}
