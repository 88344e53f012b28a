mod assignment;
mod availability;
mod coverage;
mod fairness;
mod types;
mod util;

pub use availability::AvailabilityIndex;
pub use fairness::FairnessTracker;
pub use types::{
    DayPlan, FailurePolicy, SchedError, Schedule, ScheduleOptions, Shortfall, TieBreak,
};

use crate::model::Roster;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scheduler : répartit un roster sur la période selon ses options.
///
/// Chaque appel repart d'un index et de compteurs neufs ; rien n'est
/// partagé entre deux exécutions.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    opts: ScheduleOptions,
}

impl Scheduler {
    pub fn new(opts: ScheduleOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.opts
    }

    /// Planifie avec la source d'aléa dérivée de `tie_break` (graine fixe si
    /// fournie, sinon entropie système).
    pub fn schedule(&self, roster: &Roster) -> Result<Schedule, SchedError> {
        let mut rng = match self.opts.tie_break {
            TieBreak::Shuffle { seed: Some(seed) } => StdRng::seed_from_u64(seed),
            TieBreak::Shuffle { seed: None } => StdRng::from_os_rng(),
            TieBreak::ById => StdRng::seed_from_u64(0),
        };
        self.schedule_with_rng(roster, &mut rng)
    }

    /// Planifie avec une source d'aléa injectée (ignorée en `TieBreak::ById`).
    pub fn schedule_with_rng<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        rng: &mut R,
    ) -> Result<Schedule, SchedError> {
        assignment::assign_fair(roster, &self.opts, rng)
    }

    pub fn availability<'a>(&self, roster: &'a Roster) -> AvailabilityIndex<'a> {
        AvailabilityIndex::build(roster, &self.opts.period)
    }

    /// Jours qui ne peuvent atteindre le minimum, sans rien affecter.
    pub fn detect_shortfalls(&self, roster: &Roster) -> Vec<Shortfall> {
        coverage::detect_shortfalls(self, roster)
    }
}
