//! Weekly schedules and the "is this tracker due today" rule.
//!
//! Days are numbered Monday-first: Monday = 1 … Sunday = 7. The same
//! numbering is used for storage (`"1,3,5"`), for the wire format and for
//! converting a calendar date, so a schedule written on one path always
//! matches on the other.

use crate::error::AppError;
use crate::models::Tracker;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Day of week for a calendar date (1=Monday, 7=Sunday).
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    pub fn number(self) -> u8 {
        u8::from(self)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = AppError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Weekday::Monday),
            2 => Ok(Weekday::Tuesday),
            3 => Ok(Weekday::Wednesday),
            4 => Ok(Weekday::Thursday),
            5 => Ok(Weekday::Friday),
            6 => Ok(Weekday::Saturday),
            7 => Ok(Weekday::Sunday),
            other => Err(AppError::InvalidInput {
                field: "schedule",
                reason: format!("day must be 1-7, got {other}"),
            }),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Non-empty set of weekdays on which a habit is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct Schedule(BTreeSet<Weekday>);

impl Schedule {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Result<Self, AppError> {
        let days: BTreeSet<Weekday> = days.into_iter().collect();
        if days.is_empty() {
            return Err(AppError::InvalidInput {
                field: "schedule",
                reason: "at least one day required".into(),
            });
        }
        Ok(Self(days))
    }

    /// Every day of the week.
    pub fn daily() -> Self {
        Self(Weekday::ALL.into_iter().collect())
    }

    /// Parse the stored comma-separated form, e.g. `"1,3,5"`.
    pub fn parse(days: &str) -> Result<Self, AppError> {
        let mut parsed = BTreeSet::new();
        for part in days.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let number: u8 = part.parse().map_err(|_| AppError::InvalidInput {
                field: "schedule",
                reason: format!("invalid day: '{part}'"),
            })?;
            parsed.insert(Weekday::try_from(number)?);
        }
        Self::new(parsed)
    }

    /// Comma-separated storage form, Monday first.
    pub fn to_storage(&self) -> String {
        self.0
            .iter()
            .map(|d| d.number().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    pub fn is_every_day(&self) -> bool {
        self.0.len() == Weekday::ALL.len()
    }

    /// Short label for a schedule summary, e.g. "Mon, Wed, Fri" or "Every day".
    pub fn summary(&self) -> String {
        if self.is_every_day() {
            return "Every day".to_string();
        }
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TryFrom<Vec<Weekday>> for Schedule {
    type Error = AppError;

    fn try_from(days: Vec<Weekday>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<Schedule> for Vec<Weekday> {
    fn from(schedule: Schedule) -> Self {
        schedule.0.into_iter().collect()
    }
}

/// Whether `tracker` is due on `date`.
///
/// Irregular events (no schedule) are due every day; habits only on the
/// weekdays of their schedule.
pub fn is_due(tracker: &Tracker, date: NaiveDate) -> bool {
    match &tracker.schedule {
        None => true,
        Some(schedule) => schedule.contains(Weekday::of(date)),
    }
}
