//! Person module - the read-only view of a member record
//!
//! Person records belong to the host application. The engine only reads the
//! identifier, birth date and gender.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Host-assigned person identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub i64);

impl PersonId {
    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for PersonId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<i64>()
            .map(PersonId)
            .map_err(|e| format!("Invalid person id '{}': {}", s, e))
    }
}

/// Recorded gender, normalized from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Missing, empty or unrecognized
    #[default]
    Unknown,
}

impl Gender {
    /// Normalize a free-text gender value
    ///
    /// # Examples
    ///
    /// ```
    /// use kindred_domain::Gender;
    ///
    /// assert_eq!(Gender::normalize(" Femenino "), Gender::Female);
    /// assert_eq!(Gender::normalize("M"), Gender::Male);
    /// assert_eq!(Gender::normalize(""), Gender::Unknown);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "m" | "male" | "man" | "masculino" | "hombre" => Gender::Male,
            "f" | "female" | "woman" | "femenino" | "mujer" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    /// Short storage code ("m", "f" or "")
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
            Gender::Unknown => "",
        }
    }

    /// Whether a gender is recorded at all
    pub fn is_known(&self) -> bool {
        !matches!(self, Gender::Unknown)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        };
        f.write_str(text)
    }
}

/// A person as consumed by the kinship engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Host identifier
    pub id: PersonId,

    /// Display name
    pub full_name: String,

    /// Birth date, when recorded
    pub birth_date: Option<NaiveDate>,

    /// Normalized gender
    pub gender: Gender,
}

impl Person {
    /// Create a person with no birth date and unknown gender
    pub fn new(id: PersonId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            birth_date: None,
            gender: Gender::Unknown,
        }
    }

    /// Set the birth date
    pub fn born(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Set the gender
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Completed years of age on the given date
    pub fn age_on(&self, date: NaiveDate) -> Option<i32> {
        self.birth_date.map(|born| completed_years(born, date))
    }
}

/// Whole years elapsed from `from` to `to` (negative when `to` is earlier)
pub fn completed_years(from: NaiveDate, to: NaiveDate) -> i32 {
    if to < from {
        return -completed_years(to, from);
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_gender_synonyms() {
        assert_eq!(Gender::normalize("hombre"), Gender::Male);
        assert_eq!(Gender::normalize("Woman"), Gender::Female);
        assert_eq!(Gender::normalize("mujer"), Gender::Female);
        assert_eq!(Gender::normalize("nonbinary"), Gender::Unknown);
        assert!(!Gender::normalize("   ").is_known());
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let person = Person::new(PersonId(1), "Ana").born(date(1990, 6, 15));
        assert_eq!(person.age_on(date(2020, 6, 14)), Some(29));
        assert_eq!(person.age_on(date(2020, 6, 15)), Some(30));
        assert_eq!(Person::new(PersonId(2), "Beto").age_on(date(2020, 1, 1)), None);
    }

    #[test]
    fn test_completed_years_is_antisymmetric() {
        let a = date(1960, 3, 1);
        let b = date(1972, 2, 28);
        assert_eq!(completed_years(a, b), 11);
        assert_eq!(completed_years(b, a), -11);
    }

    #[test]
    fn test_person_id_parse() {
        assert_eq!("#42".parse::<PersonId>().unwrap(), PersonId(42));
        assert_eq!(" 7 ".parse::<PersonId>().unwrap(), PersonId(7));
        assert!("abc".parse::<PersonId>().is_err());
    }
}
