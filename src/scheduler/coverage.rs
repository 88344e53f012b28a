use super::{Scheduler, Shortfall};
use crate::model::Roster;

pub(super) fn detect_shortfalls(scheduler: &Scheduler, roster: &Roster) -> Vec<Shortfall> {
    let required = scheduler.opts.min_per_day;
    let index = scheduler.availability(roster);

    index
        .days()
        .filter_map(|day| {
            let available = index.count(day);
            (available < required as usize).then_some(Shortfall {
                day,
                available,
                required,
            })
        })
        .collect()
}
