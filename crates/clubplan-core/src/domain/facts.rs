//! Problem facts: immutable inputs for one solve.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Age group of a team, ordered from youngest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    U6,
    U7,
    U8,
    U10,
    U11,
    U12,
    U14,
    U16,
    U19,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 10] = [
        AgeGroup::U6,
        AgeGroup::U7,
        AgeGroup::U8,
        AgeGroup::U10,
        AgeGroup::U11,
        AgeGroup::U12,
        AgeGroup::U14,
        AgeGroup::U16,
        AgeGroup::U19,
        AgeGroup::Senior,
    ];

    /// Oldest age a player in this group may have.
    pub const fn max_age(self) -> i64 {
        match self {
            AgeGroup::U6 => 6,
            AgeGroup::U7 => 7,
            AgeGroup::U8 => 8,
            AgeGroup::U10 => 10,
            AgeGroup::U11 => 11,
            AgeGroup::U12 => 12,
            AgeGroup::U14 => 14,
            AgeGroup::U16 => 16,
            AgeGroup::U19 => 19,
            AgeGroup::Senior => 99,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeGroup::Senior => f.write_str("SENIOR"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
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

    /// Numeric value, 1 = Monday .. 7 = Sunday.
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Zero-based index, usable for per-day arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True if the two days are next to each other, Sunday wrapping to Monday.
    pub fn is_adjacent_to(self, other: Weekday) -> bool {
        let diff = self.value().abs_diff(other.value());
        diff == 1 || diff == 6
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
            Weekday::Sunday => "SUNDAY",
        };
        f.write_str(name)
    }
}

/// A trainer who can be assigned to sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub max_hours_per_week: u32,
    #[serde(default)]
    pub trainable_age_groups: BTreeSet<AgeGroup>,
    #[serde(default)]
    pub preferred_team_id: Option<String>,
}

impl Trainer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hours_per_week: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hours_per_week,
            trainable_age_groups: BTreeSet::new(),
            preferred_team_id: None,
        }
    }

    pub fn with_age_groups(mut self, groups: impl IntoIterator<Item = AgeGroup>) -> Self {
        self.trainable_age_groups.extend(groups);
        self
    }

    pub fn with_preferred_team(mut self, team_id: impl Into<String>) -> Self {
        self.preferred_team_id = Some(team_id.into());
        self
    }

    pub fn can_train(&self, group: AgeGroup) -> bool {
        self.trainable_age_groups.contains(&group)
    }

    pub fn prefers(&self, team: &Team) -> bool {
        self.preferred_team_id.as_deref() == Some(team.id.as_str())
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A team that needs a number of weekly trainings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub age_group: AgeGroup,
    /// Roster size, counted against the field capacity.
    pub size: u32,
    pub trainings_per_week: u32,
    #[serde(default)]
    pub available_days: BTreeSet<Weekday>,
    /// Inclusive.
    pub earliest_hour: u32,
    /// Exclusive.
    pub latest_hour: u32,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age_group: AgeGroup,
        size: u32,
        trainings_per_week: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age_group,
            size,
            trainings_per_week,
            available_days: BTreeSet::new(),
            earliest_hour: 0,
            latest_hour: 24,
        }
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.available_days.extend(days);
        self
    }

    pub fn with_hours(mut self, earliest_hour: u32, latest_hour: u32) -> Self {
        self.earliest_hour = earliest_hour;
        self.latest_hour = latest_hour;
        self
    }

    /// True if the team may train in this slot.
    pub fn accepts(&self, slot: &TimeSlot) -> bool {
        self.available_days.contains(&slot.day_of_week)
            && slot.start_hour >= self.earliest_hour
            && slot.start_hour < self.latest_hour
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A one-hour slot on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub day_of_week: Weekday,
    pub start_hour: u32,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>, day_of_week: Weekday, start_hour: u32) -> Self {
        Self {
            id: id.into(),
            day_of_week,
            start_hour,
        }
    }

    pub fn end_hour(&self) -> u32 {
        self.start_hour + 1
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:00", self.day_of_week, self.start_hour)
    }
}

/// The single shared field and its player capacity per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub id: String,
    pub capacity: u32,
}

impl FieldConfig {
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}
