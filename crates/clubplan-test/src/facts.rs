//! Terse fact constructors.

use clubplan_core::{AgeGroup, Team, TimeSlot, Trainer, Weekday};

/// A trainer with id and name `id`.
pub fn trainer(id: &str, max_hours: u32, groups: &[AgeGroup]) -> Trainer {
    Trainer::new(id, id, max_hours).with_age_groups(groups.iter().copied())
}

/// A team with id and name `id`.
pub fn team(
    id: &str,
    group: AgeGroup,
    size: u32,
    trainings: u32,
    days: &[Weekday],
    hours: (u32, u32),
) -> Team {
    Team::new(id, id, group, size, trainings)
        .with_days(days.iter().copied())
        .with_hours(hours.0, hours.1)
}

/// Slot id in the `mon-17` form.
pub fn slot_id(day: Weekday, hour: u32) -> String {
    let name = day.to_string().to_lowercase();
    format!("{}-{hour}", &name[..3])
}

pub fn slot(day: Weekday, hour: u32) -> TimeSlot {
    TimeSlot::new(slot_id(day, hour), day, hour)
}
