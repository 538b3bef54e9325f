//! Tests for the domain model.

use super::*;
use crate::score::HardSoftScore;

fn request() -> SolveRequest {
    SolveRequest {
        trainers: vec![
            Trainer::new("t1", "Ann", 4).with_age_groups([AgeGroup::U8, AgeGroup::U10]),
            Trainer::new("t2", "Bob", 4)
                .with_age_groups([AgeGroup::U12])
                .with_preferred_team("u12a"),
        ],
        teams: vec![
            Team::new("u8a", "U8 A", AgeGroup::U8, 12, 2)
                .with_days([Weekday::Monday, Weekday::Wednesday])
                .with_hours(17, 19),
            Team::new("u12a", "U12 A", AgeGroup::U12, 16, 3)
                .with_days([Weekday::Tuesday])
                .with_hours(18, 20),
        ],
        time_slots: vec![
            TimeSlot::new("mon-17", Weekday::Monday, 17),
            TimeSlot::new("tue-18", Weekday::Tuesday, 18),
        ],
        field_capacity: 60,
    }
}

#[test]
fn test_into_schedule_creates_one_session_per_training() {
    let req = request();
    assert_eq!(req.session_count(), 5);

    let schedule = req.into_schedule();
    assert_eq!(schedule.sessions.len(), 5);

    let ids: Vec<&str> = schedule.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["session-1", "session-2", "session-3", "session-4", "session-5"]);
    assert_eq!(schedule.sessions[0].team, 0);
    assert_eq!(schedule.sessions[4].team, 1);
    assert!(schedule.sessions.iter().all(|s| !s.is_assigned()));
    assert_eq!(schedule.field_capacity(), Some(60));
    assert_eq!(schedule.field_configs[0].id, "field");
    assert_eq!(schedule.score, None);
    assert_eq!(schedule.solver_status, SolverStatus::NotSolving);
}

#[test]
fn test_assignment_counts() {
    let mut schedule = request().into_schedule();
    schedule.sessions[0].time_slot = Some(0);
    schedule.sessions[0].trainer = Some(0);
    schedule.sessions[1].time_slot = Some(1);

    assert_eq!(schedule.assigned_count(), 1);
    assert_eq!(schedule.unassigned_count(), 4);
    assert_eq!(schedule.unassigned_variable_count(), 9 - 1);
    assert!(!schedule.is_initialized());
    assert_eq!(schedule.session_slot(0).map(|s| s.id.as_str()), Some("mon-17"));
    assert_eq!(schedule.session_trainer(1), None);
    assert_eq!(schedule.session_team(4).id, "u12a");
}

#[test]
fn test_dangling_reference() {
    let mut schedule = request().into_schedule();
    assert_eq!(schedule.dangling_reference(), None);
    schedule.sessions[2].trainer = Some(7);
    assert!(schedule.dangling_reference().is_some());
}

#[test]
fn test_planning_solution_score() {
    let mut schedule = request().into_schedule();
    schedule.set_score(Some(HardSoftScore::of(-1, 3)));
    assert_eq!(schedule.score(), Some(HardSoftScore::of(-1, 3)));
}

#[test]
fn test_weekday_adjacency() {
    assert_eq!(Weekday::Monday.value(), 1);
    assert_eq!(Weekday::Sunday.value(), 7);
    assert!(Weekday::Monday.is_adjacent_to(Weekday::Tuesday));
    assert!(Weekday::Sunday.is_adjacent_to(Weekday::Monday));
    assert!(!Weekday::Monday.is_adjacent_to(Weekday::Wednesday));
    assert!(!Weekday::Friday.is_adjacent_to(Weekday::Friday));
}

#[test]
fn test_team_accepts_slot() {
    let team = Team::new("u8a", "U8 A", AgeGroup::U8, 12, 2)
        .with_days([Weekday::Monday])
        .with_hours(17, 19);
    assert!(team.accepts(&TimeSlot::new("a", Weekday::Monday, 17)));
    assert!(team.accepts(&TimeSlot::new("b", Weekday::Monday, 18)));
    assert!(!team.accepts(&TimeSlot::new("c", Weekday::Monday, 19)));
    assert!(!team.accepts(&TimeSlot::new("d", Weekday::Monday, 16)));
    assert!(!team.accepts(&TimeSlot::new("e", Weekday::Tuesday, 17)));
}

#[test]
fn test_time_slot_display() {
    let slot = TimeSlot::new("mon-17", Weekday::Monday, 17);
    assert_eq!(slot.to_string(), "MONDAY 17:00");
    assert_eq!(slot.end_hour(), 18);
}

#[test]
fn test_age_groups() {
    assert_eq!(AgeGroup::U8.max_age(), 8);
    assert_eq!(AgeGroup::Senior.max_age(), 99);
    assert_eq!(AgeGroup::Senior.to_string(), "SENIOR");
    assert_eq!(AgeGroup::U14.to_string(), "U14");
}

#[test]
fn test_trainer_preference() {
    let req = request();
    assert!(req.trainers[1].prefers(&req.teams[1]));
    assert!(!req.trainers[0].prefers(&req.teams[1]));
}

#[test]
fn test_issues() {
    let mut req = request();
    assert!(req.issues().is_empty());
    assert!(req.validate().is_ok());

    req.teams[0].available_days.clear();
    req.teams.push(Team::new("sen", "Seniors", AgeGroup::Senior, 20, 1).with_days([Weekday::Friday]));
    let issues = req.issues();
    assert!(issues.iter().any(|i| i.contains("u8a has no available days")));
    assert!(issues.iter().any(|i| i.contains("no trainer is qualified for team sen")));
    assert!(req.validate().is_err());
}

#[test]
fn test_request_json_field_names() {
    let json = r#"{
        "trainers": [{"id": "t1", "name": "Ann", "maxHoursPerWeek": 4,
                      "trainableAgeGroups": ["U8", "SENIOR"], "preferredTeamId": "u8a"}],
        "teams": [{"id": "u8a", "name": "U8 A", "ageGroup": "U8", "size": 12,
                   "trainingsPerWeek": 2, "availableDays": ["MONDAY", "SUNDAY"],
                   "earliestHour": 17, "latestHour": 19}],
        "timeSlots": [{"id": "mon-17", "dayOfWeek": "MONDAY", "startHour": 17}],
        "fieldCapacity": 60
    }"#;
    let req: SolveRequest = serde_json::from_str(json).unwrap();
    assert!(req.trainers[0].can_train(AgeGroup::Senior));
    assert_eq!(req.trainers[0].preferred_team_id.as_deref(), Some("u8a"));
    assert!(req.teams[0].available_days.contains(&Weekday::Sunday));
    assert_eq!(req.time_slots[0].day_of_week, Weekday::Monday);
    assert_eq!(req.field_capacity, 60);
}

#[test]
fn test_status_serialization() {
    let json = serde_json::to_string(&SolverStatus::SolvingActive).unwrap();
    assert_eq!(json, "\"SOLVING_ACTIVE\"");
    assert_eq!(SolverStatus::NotSolving.as_str(), "NOT_SOLVING");
    assert!(SolverStatus::SolvingScheduled.is_solving());
    assert!(!SolverStatus::Failed.is_solving());
}
