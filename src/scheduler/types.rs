use crate::model::{Day, Person, PersonId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Départage des candidats à égalité de compteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Mélange aléatoire avant le tri ; reproductible si `seed` est fourni.
    Shuffle {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Ordre déterministe par identifiant de personne.
    ById,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::Shuffle { seed: None }
    }
}

/// Comportement face à un jour en sous-effectif.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Arrêt au premier jour en sous-effectif (ordre de traitement).
    #[default]
    StopAtFirst,
    /// Continue, puis rapporte tous les jours en sous-effectif.
    CollectAll,
}

/// Options de planification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    pub min_per_day: u32,
    pub max_per_day: u32,
    pub period: Vec<Day>,
    pub tie_break: TieBreak,
    pub failure_policy: FailurePolicy,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            min_per_day: 3,
            max_per_day: 4,
            period: Day::workweek(),
            tie_break: TieBreak::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ScheduleOptions {
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.max_per_day == 0 || self.min_per_day > self.max_per_day {
            return Err(SchedError::InvalidBounds {
                min: self.min_per_day,
                max: self.max_per_day,
            });
        }
        if self.period.is_empty() {
            return Err(SchedError::EmptyPeriod);
        }
        Ok(())
    }
}

/// Jour impossible à pourvoir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub day: Day,
    pub available: usize,
    pub required: u32,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: insufficient staff, {} available, {} required",
            self.day, self.available, self.required
        )
    }
}

/// Équipe retenue pour un jour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Day,
    pub staff: Vec<PersonId>,
}

impl DayPlan {
    pub fn headcount(&self) -> usize {
        self.staff.len()
    }
}

/// Planning produit, dans l'ordre naturel des jours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: Vec<DayPlan>,
}

impl Schedule {
    pub fn plan_for(&self, day: Day) -> Option<&DayPlan> {
        self.days.iter().find(|p| p.day == day)
    }

    pub fn total_assignments(&self) -> usize {
        self.days.iter().map(DayPlan::headcount).sum()
    }

    /// Nombre d'affectations par personne (toutes les personnes du roster,
    /// dans l'ordre du roster, zéro compris).
    pub fn assignment_counts<'a>(&self, roster: &'a Roster) -> Vec<(&'a Person, usize)> {
        let mut counts: BTreeMap<&PersonId, usize> = BTreeMap::new();
        for id in self.days.iter().flat_map(|p| p.staff.iter()) {
            *counts.entry(id).or_default() += 1;
        }
        roster
            .people
            .iter()
            .map(|p| (p, counts.get(&p.id).copied().unwrap_or(0)))
            .collect()
    }

    /// Résout les identifiants d'un jour en personnes du roster.
    pub fn staff_of<'a>(&self, roster: &'a Roster, day: Day) -> Vec<&'a Person> {
        self.plan_for(day)
            .map(|plan| {
                plan.staff
                    .iter()
                    .filter_map(|id| roster.find_person_by_id(id))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("{day}: insufficient staff, {available} available, {required} required")]
    InsufficientStaff {
        day: Day,
        available: usize,
        required: u32,
    },
    #[error("{} day(s) understaffed", .shortfalls.len())]
    Understaffed {
        shortfalls: Vec<Shortfall>,
        partial: Schedule,
    },
    #[error("invalid staffing bounds: min {min}, max {max}")]
    InvalidBounds { min: u32, max: u32 },
    #[error("schedule period contains no day")]
    EmptyPeriod,
    #[error("duplicate person id in roster: {0}")]
    DuplicatePerson(String),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
}

impl SchedError {
    /// Jours en sous-effectif portés par l'erreur, s'il y en a.
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        match self {
            SchedError::InsufficientStaff {
                day,
                available,
                required,
            } => vec![Shortfall {
                day: *day,
                available: *available,
                required: *required,
            }],
            SchedError::Understaffed { shortfalls, .. } => shortfalls.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<Shortfall> for SchedError {
    fn from(s: Shortfall) -> Self {
        SchedError::InsufficientStaff {
            day: s.day,
            available: s.available,
            required: s.required,
        }
    }
}
