use crate::model::Roster;
use crate::scheduler::{AvailabilityIndex, Schedule, Shortfall};
use std::fmt::Write;

/// Permet de customiser le rendu d'un planning (texte, HTML, etc.).
pub trait ScheduleRenderer {
    fn render(&self, roster: &Roster, schedule: &Schedule) -> String;
}

/// Tableau texte : `jour | effectif | équipe`, puis le total par personne.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextTable;

impl ScheduleRenderer for TextTable {
    fn render(&self, roster: &Roster, schedule: &Schedule) -> String {
        let mut out = String::new();
        for plan in &schedule.days {
            let names: Vec<&str> = schedule
                .staff_of(roster, plan.day)
                .into_iter()
                .map(|p| p.name.as_str())
                .collect();
            let staff = if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            };
            let _ = writeln!(
                out,
                "{:<9} | {} | {}",
                plan.day.name(),
                plan.headcount(),
                staff
            );
        }
        out.push_str("\nAssignments:\n");
        for (person, count) in schedule.assignment_counts(roster) {
            let _ = writeln!(out, "  {}: {}", person.name, count);
        }
        out
    }
}

/// Une ligne par jour en sous-effectif.
pub fn render_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Disponibilités par jour comparées au minimum requis.
pub fn render_availability(index: &AvailabilityIndex<'_>, min_per_day: u32) -> String {
    let mut out = String::new();
    for day in index.days() {
        let count = index.count(day);
        let status = if count < min_per_day as usize {
            "SHORT"
        } else {
            "ok"
        };
        let _ = writeln!(out, "{:<9} | {} available | {}", day.name(), count, status);
    }
    out
}
