use clubplan_core::{AgeGroup, HardSoftScore, PlanningSolution, TrainingSchedule, Weekday};
use clubplan_test::{slot, team, trainer, ScheduleBuilder};

use super::{ScoreDirector, TypedScoreDirector};
use crate::rules::{create_constraints, score_schedule, ClubConstraints, TRAINER_CONFLICT};

fn session_count(s: &TrainingSchedule) -> usize {
    s.sessions.len()
}

/// Two U10 sessions, both on Monday 17:00 with the same trainer.
fn clashing() -> TrainingSchedule {
    ScheduleBuilder::new(60)
        .trainer(trainer("ann", 4, &[AgeGroup::U10]))
        .team(team(
            "u10a",
            AgeGroup::U10,
            14,
            2,
            &[Weekday::Monday, Weekday::Wednesday],
            (17, 19),
        ))
        .slot(slot(Weekday::Monday, 17))
        .slot(slot(Weekday::Wednesday, 17))
        .assign(0, 0, 0)
        .assign(1, 0, 0)
        .build()
}

fn typed(schedule: TrainingSchedule) -> TypedScoreDirector<TrainingSchedule, ClubConstraints> {
    TypedScoreDirector::new(schedule, create_constraints(), session_count)
}

#[test]
fn typed_initializes_lazily() {
    let mut director = typed(clashing());
    assert!(!director.is_initialized());
    assert_eq!(director.get_score(), HardSoftScore::ZERO);

    let score = director.calculate_score();
    assert!(director.is_initialized());
    assert_eq!(score, score_schedule(director.working_solution()));
    // Trainer conflict, team conflict and same day.
    assert_eq!(score.hard(), -3);
}

#[test]
fn typed_calculate_sets_solution_score() {
    let mut director = typed(clashing());
    let score = director.calculate_score();
    assert_eq!(director.working_solution().score(), Some(score));
    assert_eq!(director.clone_working_solution().score, Some(score));
}

#[test]
fn typed_do_change_applies_delta() {
    let mut director = typed(clashing());
    director.calculate_score();

    let score = director.do_change(1, |s| s.sessions[1].time_slot = Some(1));
    assert_eq!(score.hard(), 0);
    assert_eq!(score, score_schedule(director.working_solution()));
}

#[test]
fn typed_changes_before_initialization_are_deferred() {
    let mut director = typed(clashing());
    director.before_variable_changed(1);
    director.working_solution_mut().sessions[1].time_slot = Some(1);
    director.after_variable_changed(1);
    assert!(!director.is_initialized());
    assert_eq!(director.calculate_score().hard(), 0);
}

#[test]
fn typed_reset_starts_over() {
    let mut director = typed(clashing());
    director.calculate_score();
    director.working_solution_mut().sessions[1].time_slot = Some(1);
    director.reset();

    assert!(!director.is_initialized());
    assert_eq!(director.get_score(), HardSoftScore::ZERO);
    assert_eq!(director.calculate_score().hard(), 0);
}

#[test]
fn typed_explain_lists_matches() {
    let director = typed(clashing());
    let explanation = director.explain();

    assert_eq!(explanation.score, score_schedule(director.working_solution()));
    let conflict = explanation.constraint(TRAINER_CONFLICT).unwrap();
    assert_eq!(conflict.match_count(), 1);
    assert_eq!(director.constraint_count(), 14);
}

#[test]
fn typed_debug_shows_state() {
    let director = typed(clashing());
    let debug = format!("{director:?}");
    assert!(debug.contains("TypedScoreDirector"));
    assert!(debug.contains("constraint_count: 14"));
}

#[test]
fn typed_through_trait_object() {
    let mut director: Box<dyn ScoreDirector<TrainingSchedule>> = Box::new(typed(clashing()));
    assert!(director.is_incremental());
    assert_eq!(director.entity_count(), 2);

    director.calculate_score();
    director.before_variable_changed(0);
    director.working_solution_mut().sessions[0].time_slot = Some(1);
    director.after_variable_changed(0);
    assert_eq!(director.calculate_score().hard(), 0);
}

#[test]
fn typed_take_solution_keeps_score() {
    let mut director = typed(clashing());
    assert_eq!(director.calculate_score().hard(), -3);

    let after = director.do_change(1, |s| s.sessions[1].time_slot = Some(1));
    assert_eq!(after.hard(), 0);
    assert_eq!(director.take_solution().score, Some(after));
}

#[test]
fn typed_matches_full_recompute_over_changes() {
    let mut director = typed(clashing());
    director.calculate_score();

    for (session, slot) in [(0, 1), (1, 1), (0, 0)] {
        let score = director.do_change(session, |s| s.sessions[session].time_slot = Some(slot));
        assert_eq!(score, score_schedule(director.working_solution()));
    }
}
