use super::SchedError;
use crate::model::Roster;
use std::collections::HashSet;

/// Le suivi d'équité repose sur l'unicité des identifiants.
pub(super) fn ensure_unique_ids(roster: &Roster) -> Result<(), SchedError> {
    let mut seen = HashSet::with_capacity(roster.len());
    for person in &roster.people {
        if !seen.insert(&person.id) {
            return Err(SchedError::DuplicatePerson(person.id.as_str().to_string()));
        }
    }
    Ok(())
}
