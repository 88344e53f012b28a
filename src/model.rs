use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Jour planifiable. L'ordre de déclaration est l'ordre naturel (affichage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Semaine ouvrée par défaut (lundi → vendredi).
    pub fn workweek() -> Vec<Day> {
        Self::ALL[..5].to_vec()
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Interprète un libellé de jour : anglais (`Monday`, `mon`), français
    /// (`lundi`), chinois (`周一`, `星期一`, `一`) ou numéro ISO (`1`..`7`).
    pub fn parse_label(raw: &str) -> Option<Day> {
        let label = raw.trim();
        let label = label
            .strip_prefix("星期")
            .or_else(|| label.strip_prefix('周'))
            .unwrap_or(label)
            .trim();
        if label.is_empty() {
            return None;
        }
        if let Ok(wd) = label.parse::<Weekday>() {
            return Some(wd.into());
        }
        if let Ok(n) = label.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Day::ALL.get(i)).copied();
        }
        let day = match label.to_lowercase().as_str() {
            "lundi" | "lun" | "一" => Day::Monday,
            "mardi" | "mar" | "二" => Day::Tuesday,
            "mercredi" | "mer" | "三" => Day::Wednesday,
            "jeudi" | "jeu" | "四" => Day::Thursday,
            "vendredi" | "ven" | "五" => Day::Friday,
            "samedi" | "sam" | "六" => Day::Saturday,
            "dimanche" | "dim" | "日" | "天" => Day::Sunday,
            _ => return None,
        };
        Some(day)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::parse_label(s).ok_or_else(|| format!("unknown day label: {s}"))
    }
}

impl From<Weekday> for Day {
    fn from(wd: Weekday) -> Self {
        match wd {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

/// Personne et ses jours de disponibilité.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub available_days: BTreeSet<Day>,
}

impl Person {
    pub fn new<N: Into<String>, I: IntoIterator<Item = Day>>(name: N, days: I) -> Self {
        Self::with_id(PersonId::random(), name, days)
    }

    pub fn with_id<N: Into<String>, I: IntoIterator<Item = Day>>(
        id: PersonId,
        name: N,
        days: I,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            available_days: days.into_iter().collect(),
        }
    }

    pub fn is_available(&self, day: Day) -> bool {
        self.available_days.contains(&day)
    }
}

/// Roster complet : l'ordre des personnes est l'ordre d'import.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn find_person_by_id<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_person_by_name<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name == name)
    }
}
