//! The small club dataset.
//!
//! Three trainers with four weekly hours each and three youth teams with two
//! trainings each, Monday to Friday between 17:00 and 20:00. A 60 player
//! field fits any two teams at once, so a feasible schedule exists.

use clubplan_core::{AgeGroup, SolveRequest, TrainingSchedule, Weekday};

use crate::facts::{slot, team, trainer};

const WEEKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

pub fn small_club_request() -> SolveRequest {
    let trainers = vec![
        trainer("coach-a", 4, &[AgeGroup::U8, AgeGroup::U10]).with_preferred_team("u8a"),
        trainer("coach-b", 4, &[AgeGroup::U10, AgeGroup::U12]),
        trainer("coach-c", 4, &[AgeGroup::U12, AgeGroup::U8]).with_preferred_team("u12a"),
    ];

    let teams = vec![
        team("u8a", AgeGroup::U8, 12, 2, &WEEKDAYS, (17, 19)),
        team("u10a", AgeGroup::U10, 14, 2, &WEEKDAYS, (17, 20)),
        team("u12a", AgeGroup::U12, 16, 2, &WEEKDAYS, (17, 20)),
    ];

    let time_slots = WEEKDAYS
        .iter()
        .flat_map(|&day| (17..20).map(move |hour| slot(day, hour)))
        .collect();

    SolveRequest {
        trainers,
        teams,
        time_slots,
        field_capacity: 60,
    }
}

/// The small club request as an unassigned schedule.
pub fn small_club_schedule() -> TrainingSchedule {
    small_club_request().into_schedule()
}
