use super::{
    util, AvailabilityIndex, DayPlan, FailurePolicy, FairnessTracker, SchedError, Schedule,
    ScheduleOptions, Shortfall, TieBreak,
};
use crate::model::{Person, Roster};
use rand::seq::SliceRandom;
use rand::Rng;

pub(super) fn assign_fair<R: Rng + ?Sized>(
    roster: &Roster,
    opts: &ScheduleOptions,
    rng: &mut R,
) -> Result<Schedule, SchedError> {
    opts.validate()?;
    util::ensure_unique_ids(roster)?;

    let index = AvailabilityIndex::build(roster, &opts.period);
    let mut tracker = FairnessTracker::initialize(roster);
    let order = index.processing_order();

    #[cfg(feature = "logging")]
    tracing::debug!(?order, people = roster.len(), "processing order");

    let min = opts.min_per_day as usize;
    let mut plans: Vec<DayPlan> = Vec::with_capacity(order.len());
    let mut shortfalls: Vec<Shortfall> = Vec::new();

    for day in order {
        let mut candidates: Vec<&Person> = index.candidates(day).to_vec();

        if candidates.len() < min {
            let shortfall = Shortfall {
                day,
                available: candidates.len(),
                required: opts.min_per_day,
            };
            match opts.failure_policy {
                FailurePolicy::StopAtFirst => return Err(shortfall.into()),
                FailurePolicy::CollectAll => {
                    shortfalls.push(shortfall);
                    plans.push(DayPlan {
                        day,
                        staff: Vec::new(),
                    });
                    continue;
                }
            }
        }

        let required = candidates.len().min(opts.max_per_day as usize);
        arrange_ties(&mut candidates, opts.tie_break, rng);
        // tri stable : l'arrangement précédent départage les égalités
        candidates.sort_by_key(|p| tracker.count_of(&p.id));

        let mut staff = Vec::with_capacity(required);
        for person in candidates.into_iter().take(required) {
            tracker.increment(&person.id)?;
            staff.push(person.id.clone());
        }

        #[cfg(feature = "logging")]
        tracing::debug!(%day, selected = staff.len(), "day staffed");

        plans.push(DayPlan { day, staff });
    }

    plans.sort_by_key(|p| p.day);
    let schedule = Schedule { days: plans };

    if shortfalls.is_empty() {
        Ok(schedule)
    } else {
        shortfalls.sort_by_key(|s| s.day);
        Err(SchedError::Understaffed {
            shortfalls,
            partial: schedule,
        })
    }
}

fn arrange_ties<R: Rng + ?Sized>(candidates: &mut [&Person], tie_break: TieBreak, rng: &mut R) {
    match tie_break {
        TieBreak::Shuffle { .. } => candidates.shuffle(rng),
        TieBreak::ById => candidates.sort_by(|a, b| a.id.cmp(&b.id)),
    }
}
