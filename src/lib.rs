#![forbid(unsafe_code)]
//! Permanence — répartition hebdomadaire de permanences selon les
//! disponibilités déclarées (sans BD).
//!
//! - Import CSV du roster, stockage JSON.
//! - Jours les moins pourvus traités en premier.
//! - Équité : les personnes les moins affectées passent d'abord.
//! - Départage aléatoire (graine optionnelle) ou par identifiant.

pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use io::ImportError;
pub use model::{Day, Person, PersonId, Roster};
pub use report::{ScheduleRenderer, TextTable};
pub use scheduler::{
    AvailabilityIndex, DayPlan, FailurePolicy, FairnessTracker, SchedError, Schedule,
    ScheduleOptions, Scheduler, Shortfall, TieBreak,
};
pub use storage::{JsonStorage, Storage};
