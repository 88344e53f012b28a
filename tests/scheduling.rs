#![forbid(unsafe_code)]
use permanence::{
    scheduler::{FailurePolicy, SchedError, ScheduleOptions, Scheduler, TieBreak},
    AvailabilityIndex, Day, FairnessTracker, Person, PersonId, Roster,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn person(id: &str, days: &[Day]) -> Person {
    Person::with_id(PersonId::new(id), id.to_uppercase(), days.iter().copied())
}

fn uniform_roster(n: usize) -> Roster {
    let week = Day::workweek();
    Roster::new((1..=n).map(|i| person(&format!("p{i}"), &week)).collect())
}

fn seeded(seed: u64) -> ScheduleOptions {
    ScheduleOptions {
        tie_break: TieBreak::Shuffle { seed: Some(seed) },
        ..ScheduleOptions::default()
    }
}

fn ids(v: &[&str]) -> Vec<PersonId> {
    v.iter().map(PersonId::new).collect()
}

#[test]
fn five_people_every_day_is_exactly_balanced() {
    let roster = uniform_roster(5);
    for seed in 0..20 {
        let schedule = Scheduler::new(seeded(seed)).schedule(&roster).unwrap();

        assert_eq!(schedule.days.len(), 5);
        for plan in &schedule.days {
            assert_eq!(plan.headcount(), 4);
        }
        assert_eq!(schedule.total_assignments(), 20);
        for (_, count) in schedule.assignment_counts(&roster) {
            assert_eq!(count, 4);
        }
    }
}

#[test]
fn output_follows_natural_day_order() {
    // Mercredi est le plus rare : traité en premier, affiché au milieu.
    let mut people: Vec<Person> = (1..=5)
        .map(|i| {
            person(
                &format!("p{i}"),
                &[Day::Monday, Day::Tuesday, Day::Thursday, Day::Friday],
            )
        })
        .collect();
    for p in people.iter_mut().take(3) {
        p.available_days.insert(Day::Wednesday);
    }
    let roster = Roster::new(people);

    let schedule = Scheduler::new(seeded(7)).schedule(&roster).unwrap();
    let days: Vec<Day> = schedule.days.iter().map(|p| p.day).collect();
    assert_eq!(days, Day::workweek());
    assert_eq!(schedule.plan_for(Day::Wednesday).unwrap().headcount(), 3);
}

#[test]
fn fails_on_the_single_understaffed_day() {
    let week = Day::workweek();
    let without_tuesday = [Day::Monday, Day::Wednesday, Day::Thursday, Day::Friday];
    let roster = Roster::new(vec![
        person("a", &week),
        person("b", &week),
        person("c", &without_tuesday),
        person("d", &without_tuesday),
        person("e", &without_tuesday),
    ]);

    let err = Scheduler::new(seeded(1)).schedule(&roster).unwrap_err();
    match err {
        SchedError::InsufficientStaff {
            day,
            available,
            required,
        } => {
            assert_eq!(day, Day::Tuesday);
            assert_eq!(available, 2);
            assert_eq!(required, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn failure_message_is_displayable() {
    let roster = Roster::new(vec![
        person("a", &[Day::Tuesday]),
        person("b", &[Day::Tuesday]),
    ]);
    let opts = ScheduleOptions {
        period: vec![Day::Tuesday],
        ..seeded(3)
    };
    let err = Scheduler::new(opts).schedule(&roster).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tuesday: insufficient staff, 2 available, 3 required"
    );
}

#[test]
fn stop_at_first_reports_scarcest_day_not_first_calendar_day() {
    let roster = Roster::new(vec![
        person("a", &[Day::Monday, Day::Thursday]),
        person("b", &[Day::Monday, Day::Tuesday, Day::Wednesday, Day::Friday]),
        person("c", &[Day::Tuesday, Day::Wednesday, Day::Friday]),
        person("d", &[Day::Tuesday, Day::Wednesday, Day::Friday]),
    ]);
    // lundi : 2 candidats, jeudi : 1 candidat -> jeudi traité d'abord
    let err = Scheduler::new(seeded(5)).schedule(&roster).unwrap_err();
    let shortfalls = err.shortfalls();
    assert_eq!(shortfalls.len(), 1);
    assert_eq!(shortfalls[0].day, Day::Thursday);
    assert_eq!(shortfalls[0].available, 1);
}

#[test]
fn collect_all_reports_every_shortfall_with_partial_schedule() {
    let week = Day::workweek();
    let no_wed_fri = [Day::Monday, Day::Tuesday, Day::Thursday];
    let roster = Roster::new(vec![
        person("a", &week),
        person("b", &[Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday]),
        person("c", &no_wed_fri),
        person("d", &no_wed_fri),
        person("e", &no_wed_fri),
    ]);
    let opts = ScheduleOptions {
        failure_policy: FailurePolicy::CollectAll,
        ..seeded(11)
    };

    let err = Scheduler::new(opts).schedule(&roster).unwrap_err();
    let SchedError::Understaffed {
        shortfalls,
        partial,
    } = err
    else {
        panic!("expected Understaffed");
    };

    let days: Vec<(Day, usize)> = shortfalls.iter().map(|s| (s.day, s.available)).collect();
    assert_eq!(days, vec![(Day::Wednesday, 2), (Day::Friday, 1)]);
    assert_eq!(partial.days.len(), 5);
    assert_eq!(partial.plan_for(Day::Wednesday).unwrap().headcount(), 0);
    assert_eq!(partial.plan_for(Day::Friday).unwrap().headcount(), 0);
    assert_eq!(partial.plan_for(Day::Monday).unwrap().headcount(), 4);
}

#[test]
fn headcount_is_capped_by_candidates_and_maximum() {
    let roster = Roster::new(vec![
        person("a", &[Day::Monday, Day::Tuesday]),
        person("b", &[Day::Monday, Day::Tuesday]),
        person("c", &[Day::Monday, Day::Tuesday]),
        person("d", &[Day::Tuesday]),
        person("e", &[Day::Tuesday]),
        person("f", &[Day::Tuesday]),
    ]);
    let opts = ScheduleOptions {
        period: vec![Day::Monday, Day::Tuesday],
        ..seeded(2)
    };
    let schedule = Scheduler::new(opts).schedule(&roster).unwrap();
    assert_eq!(schedule.plan_for(Day::Monday).unwrap().headcount(), 3);
    assert_eq!(schedule.plan_for(Day::Tuesday).unwrap().headcount(), 4);
}

#[test]
fn selections_respect_availability_bounds_and_uniqueness() {
    let roster = Roster::new(vec![
        person("a", &Day::workweek()),
        person("b", &[Day::Monday, Day::Wednesday, Day::Friday]),
        person("c", &[Day::Tuesday, Day::Thursday, Day::Friday]),
        person("d", &[Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday]),
        person("e", &Day::workweek()),
        person("f", &[Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday]),
        person("g", &[Day::Wednesday, Day::Thursday]),
    ]);

    for seed in 0..50 {
        let opts = seeded(seed);
        let scheduler = Scheduler::new(opts.clone());
        let index = scheduler.availability(&roster);
        let schedule = scheduler.schedule(&roster).unwrap();

        for plan in &schedule.days {
            let n = plan.headcount();
            assert!(n >= opts.min_per_day as usize && n <= opts.max_per_day as usize);
            assert!(n <= index.count(plan.day));

            let unique: HashSet<&PersonId> = plan.staff.iter().collect();
            assert_eq!(unique.len(), n, "duplicate on {}", plan.day);

            for p in schedule.staff_of(&roster, plan.day) {
                assert!(p.is_available(plan.day));
            }
        }
    }
}

#[test]
fn uniform_availability_stays_within_balance_bound() {
    for people in [6usize, 7, 9] {
        let roster = uniform_roster(people);
        for seed in 0..10 {
            let schedule = Scheduler::new(seeded(seed)).schedule(&roster).unwrap();
            let slots = schedule.total_assignments();
            let bound = slots.div_ceil(people) + 1;
            for (p, count) in schedule.assignment_counts(&roster) {
                assert!(count <= bound, "{} has {count} > {bound}", p.name);
            }
        }
    }
}

#[test]
fn tie_break_by_id_is_deterministic() {
    let roster = uniform_roster(5);
    let opts = ScheduleOptions {
        tie_break: TieBreak::ById,
        ..ScheduleOptions::default()
    };
    let schedule = Scheduler::new(opts).schedule(&roster).unwrap();

    assert_eq!(
        schedule.plan_for(Day::Monday).unwrap().staff,
        ids(&["p1", "p2", "p3", "p4"])
    );
    assert_eq!(
        schedule.plan_for(Day::Tuesday).unwrap().staff,
        ids(&["p5", "p1", "p2", "p3"])
    );
    assert_eq!(
        schedule.plan_for(Day::Friday).unwrap().staff,
        ids(&["p2", "p3", "p4", "p5"])
    );
}

#[test]
fn same_seed_same_schedule() {
    let roster = uniform_roster(8);
    let a = Scheduler::new(seeded(42)).schedule(&roster).unwrap();
    let b = Scheduler::new(seeded(42)).schedule(&roster).unwrap();
    assert_eq!(a, b);
}

#[test]
fn injected_rng_is_reproducible() {
    let roster = uniform_roster(8);
    let scheduler = Scheduler::default();
    let a = scheduler
        .schedule_with_rng(&roster, &mut StdRng::seed_from_u64(9))
        .unwrap();
    let b = scheduler
        .schedule_with_rng(&roster, &mut StdRng::seed_from_u64(9))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn weekend_days_only_when_in_period() {
    let roster = Roster::new(vec![
        person("a", &[Day::Saturday, Day::Sunday]),
        person("b", &[Day::Saturday, Day::Sunday]),
    ]);
    let opts = ScheduleOptions {
        min_per_day: 1,
        max_per_day: 1,
        period: vec![Day::Sunday, Day::Saturday],
        tie_break: TieBreak::ById,
        ..ScheduleOptions::default()
    };
    let schedule = Scheduler::new(opts).schedule(&roster).unwrap();
    let days: Vec<Day> = schedule.days.iter().map(|p| p.day).collect();
    assert_eq!(days, vec![Day::Saturday, Day::Sunday]);
    assert_eq!(schedule.plan_for(Day::Saturday).unwrap().staff, ids(&["a"]));
    assert_eq!(schedule.plan_for(Day::Sunday).unwrap().staff, ids(&["b"]));
}

#[test]
fn invalid_options_are_rejected() {
    let roster = uniform_roster(5);

    let inverted = ScheduleOptions {
        min_per_day: 5,
        max_per_day: 4,
        ..ScheduleOptions::default()
    };
    assert!(matches!(
        Scheduler::new(inverted).schedule(&roster),
        Err(SchedError::InvalidBounds { min: 5, max: 4 })
    ));

    let no_days = ScheduleOptions {
        period: Vec::new(),
        ..ScheduleOptions::default()
    };
    assert!(matches!(
        Scheduler::new(no_days).schedule(&roster),
        Err(SchedError::EmptyPeriod)
    ));
}

#[test]
fn duplicate_ids_are_rejected() {
    let roster = Roster::new(vec![
        person("a", &Day::workweek()),
        person("a", &Day::workweek()),
        person("b", &Day::workweek()),
    ]);
    let err = Scheduler::default().schedule(&roster).unwrap_err();
    assert!(matches!(err, SchedError::DuplicatePerson(ref id) if id == "a"));
}

#[test]
fn detect_shortfalls_lists_all_days_below_minimum() {
    let roster = Roster::new(vec![
        person("a", &Day::workweek()),
        person("b", &Day::workweek()),
        person("c", &[Day::Monday, Day::Friday]),
    ]);
    let shortfalls = Scheduler::default().detect_shortfalls(&roster);
    let days: Vec<Day> = shortfalls.iter().map(|s| s.day).collect();
    assert_eq!(days, vec![Day::Tuesday, Day::Wednesday, Day::Thursday]);
    assert!(shortfalls.iter().all(|s| s.available == 2 && s.required == 3));
}

#[test]
fn availability_index_follows_roster_order() {
    let roster = Roster::new(vec![
        person("c", &[Day::Monday]),
        person("a", &[Day::Monday, Day::Tuesday]),
        person("b", &[Day::Tuesday]),
    ]);
    let index = AvailabilityIndex::build(&roster, &Day::workweek());

    let monday: Vec<&str> = index
        .candidates(Day::Monday)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(monday, vec!["c", "a"]);
    assert_eq!(index.count(Day::Tuesday), 2);
    assert_eq!(index.count(Day::Friday), 0);
    assert!(index.candidates(Day::Saturday).is_empty());

    let again = AvailabilityIndex::build(&roster, &Day::workweek());
    assert_eq!(index, again);
}

#[test]
fn availability_index_of_empty_roster() {
    let roster = Roster::default();
    let index = AvailabilityIndex::build(&roster, &Day::workweek());
    assert_eq!(index.days().count(), 5);
    assert!(index.days().all(|d| index.count(d) == 0));
}

#[test]
fn processing_order_is_scarcest_first_and_stable() {
    let mut people = Vec::new();
    let counts = [
        (Day::Monday, 5),
        (Day::Tuesday, 3),
        (Day::Wednesday, 4),
        (Day::Thursday, 3),
        (Day::Friday, 5),
    ];
    for i in 0..5 {
        let days: Vec<Day> = counts
            .iter()
            .filter(|(_, n)| i < *n)
            .map(|(d, _)| *d)
            .collect();
        people.push(person(&format!("p{i}"), &days));
    }
    let roster = Roster::new(people);
    let index = AvailabilityIndex::build(&roster, &Day::workweek());
    assert_eq!(
        index.processing_order(),
        vec![
            Day::Tuesday,
            Day::Thursday,
            Day::Wednesday,
            Day::Monday,
            Day::Friday
        ]
    );
}

#[test]
fn fairness_tracker_counts_and_rejects_strangers() {
    let roster = uniform_roster(2);
    let mut tracker = FairnessTracker::initialize(&roster);
    let p1 = PersonId::new("p1");

    assert_eq!(tracker.count_of(&p1), 0);
    assert_eq!(tracker.increment(&p1).unwrap(), 1);
    assert_eq!(tracker.increment(&p1).unwrap(), 2);
    assert_eq!(tracker.count_of(&PersonId::new("p2")), 0);
    assert_eq!(tracker.total(), 2);

    let stranger = PersonId::new("zz");
    assert!(matches!(
        tracker.increment(&stranger),
        Err(SchedError::UnknownPerson(ref id)) if id == "zz"
    ));
    assert_eq!(tracker.count_of(&stranger), 0);

    let counts: Vec<(String, u32)> = tracker
        .counts()
        .into_iter()
        .map(|(id, n)| (id.as_str().to_string(), n))
        .collect();
    assert_eq!(counts, vec![("p1".to_string(), 2), ("p2".to_string(), 0)]);
}
