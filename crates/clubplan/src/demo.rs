//! Built-in demo dataset.
//!
//! Five teams from U8 to U16 with eleven weekly trainings, five trainers,
//! and one-hour slots Monday to Friday from 17:00 to 21:00 on a field for
//! 60 players.

use clubplan_core::{AgeGroup, SolveRequest, Team, TimeSlot, Trainer, Weekday};

const WEEKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

pub const DEMO_FIELD_CAPACITY: u32 = 60;

pub fn demo_club() -> SolveRequest {
    SolveRequest {
        trainers: demo_trainers(),
        teams: demo_teams(),
        time_slots: demo_slots(),
        field_capacity: DEMO_FIELD_CAPACITY,
    }
}

fn demo_trainers() -> Vec<Trainer> {
    vec![
        Trainer::new("ann", "Ann", 4)
            .with_age_groups([AgeGroup::U8, AgeGroup::U10])
            .with_preferred_team("u8-bees"),
        Trainer::new("ben", "Ben", 4).with_age_groups([AgeGroup::U10, AgeGroup::U12]),
        Trainer::new("cleo", "Cleo", 5)
            .with_age_groups([AgeGroup::U12, AgeGroup::U14])
            .with_preferred_team("u14-wolves"),
        Trainer::new("dan", "Dan", 5)
            .with_age_groups([AgeGroup::U14, AgeGroup::U16])
            .with_preferred_team("u16-bears"),
        Trainer::new("eva", "Eva", 3).with_age_groups([AgeGroup::U8, AgeGroup::U16]),
    ]
}

fn demo_teams() -> Vec<Team> {
    vec![
        Team::new("u8-bees", "U8 Bees", AgeGroup::U8, 12, 2)
            .with_days(WEEKDAYS)
            .with_hours(17, 19),
        Team::new("u10-foxes", "U10 Foxes", AgeGroup::U10, 14, 2)
            .with_days([
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
            ])
            .with_hours(17, 20),
        Team::new("u12-hawks", "U12 Hawks", AgeGroup::U12, 16, 2)
            .with_days(WEEKDAYS)
            .with_hours(18, 21),
        Team::new("u14-wolves", "U14 Wolves", AgeGroup::U14, 18, 2)
            .with_days([
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ])
            .with_hours(18, 21),
        Team::new("u16-bears", "U16 Bears", AgeGroup::U16, 20, 3)
            .with_days(WEEKDAYS)
            .with_hours(19, 21),
    ]
}

fn demo_slots() -> Vec<TimeSlot> {
    WEEKDAYS
        .iter()
        .flat_map(|&day| {
            (17..21).map(move |hour| {
                let name = day.to_string().to_lowercase();
                TimeSlot::new(format!("{}-{hour}", &name[..3]), day, hour)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_club_is_well_formed() {
        let request = demo_club();
        assert!(request.issues().is_empty());
        assert_eq!(request.session_count(), 11);
        assert_eq!(request.time_slots.len(), 20);
        assert_eq!(request.time_slots[0].id, "mon-17");
    }

    #[test]
    fn trainer_hours_cover_every_session() {
        let request = demo_club();
        let hours: u32 = request.trainers.iter().map(|t| t.max_hours_per_week).sum();
        assert!(hours as usize >= request.session_count());
    }
}
