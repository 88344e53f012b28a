use crate::model::{Day, Person, PersonId, Roster};
use crate::scheduler::Schedule;
use anyhow::Context;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use thiserror::Error;

/// Erreurs de chargement d'un roster (avant toute planification).
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot access file {path}: {reason}")]
    FileAccessDenied { path: String, reason: String },
    #[error("unsupported or malformed file: {0}")]
    InvalidFileFormat(String),
    #[error("no usable row found in input")]
    EmptyData,
}

/// Import d'un roster CSV sans en-tête : `nom,jours...`.
///
/// Les jours peuvent tenir dans une seule cellule (`"lundi, mardi"`,
/// `周一，周三`) ou occuper les colonnes suivantes. Les libellés inconnus
/// sont ignorés. Une première ligne `name`/`姓名` est traitée comme en-tête.
/// Les identifiants sont numérotés à partir de 1 (voir [`row_id`]).
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> Result<Roster, ImportError> {
    import_roster_csv_from(path, 1)
}

/// Comme [`import_roster_csv`], numérotation à partir de `first`
/// (ajout à un roster existant).
pub fn import_roster_csv_from<P: AsRef<Path>>(
    path: P,
    first: usize,
) -> Result<Roster, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ImportError::FileAccessDenied {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_roster_csv_from(file, first)
}

pub fn parse_roster_csv<R: std::io::Read>(input: R) -> Result<Roster, ImportError> {
    parse_roster_csv_from(input, 1)
}

pub fn parse_roster_csv_from<R: std::io::Read>(
    input: R,
    first: usize,
) -> Result<Roster, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut people = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| ImportError::InvalidFileFormat(e.to_string()))?;
        let Some(name) = rec.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if row == 0 && is_header(name) {
            continue;
        }
        let days = rec.iter().skip(1).flat_map(parse_days);
        let id = row_id(first + people.len());
        people.push(Person::with_id(id, name, days));
    }

    if people.is_empty() {
        return Err(ImportError::EmptyData);
    }
    Ok(Roster::new(people))
}

/// Identifiant stable d'une personne importée : `p0001`, `p0002`...
/// Zéro-paddé pour que l'ordre des identifiants suive l'ordre d'import.
pub fn row_id(n: usize) -> PersonId {
    PersonId::new(format!("p{n:04}"))
}

fn is_header(cell: &str) -> bool {
    cell.eq_ignore_ascii_case("name") || cell == "姓名"
}

/// Découpe une cellule de disponibilités en jours reconnus.
pub fn parse_days(cell: &str) -> Vec<Day> {
    cell.split([',', '，', ';', '、'])
        .filter_map(Day::parse_label)
        .collect()
}

/// Export CSV du planning: header `day,headcount,staff`
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    schedule: &Schedule,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["day", "headcount", "staff"])?;
    let mut count = itoa::Buffer::new();
    for plan in &schedule.days {
        let names: Vec<&str> = schedule
            .staff_of(roster, plan.day)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        w.write_record([
            plan.day.name(),
            count.format(plan.headcount()),
            names.join(", ").as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct StaffRef<'a> {
    id: &'a PersonId,
    name: &'a str,
}

#[derive(Serialize)]
struct DayRow<'a> {
    day: Day,
    headcount: usize,
    staff: Vec<StaffRef<'a>>,
}

/// Export JSON du planning (jolie mise en forme), noms résolus.
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    schedule: &Schedule,
) -> anyhow::Result<()> {
    let rows: Vec<DayRow<'_>> = schedule
        .days
        .iter()
        .map(|plan| DayRow {
            day: plan.day,
            headcount: plan.headcount(),
            staff: schedule
                .staff_of(roster, plan.day)
                .into_iter()
                .map(|p| StaffRef {
                    id: &p.id,
                    name: p.name.as_str(),
                })
                .collect(),
        })
        .collect();
    let s = serde_json::to_string_pretty(&rows)?;
    fs::write(path.as_ref(), s)
        .with_context(|| format!("writing {}", path.as_ref().display()))?;
    Ok(())
}
