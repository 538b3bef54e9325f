use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clubplan_core::{AgeGroup, HardSoftScore, PlanningSolution, TrainingSchedule, Weekday};
use clubplan_scoring::{create_constraints, ClubConstraints, ScoreDirector, TypedScoreDirector};
use clubplan_test::{team, trainer, ScheduleBuilder};
use tokio::sync::mpsc;

use super::{PhaseScope, SolverScope};

type Director = TypedScoreDirector<TrainingSchedule, ClubConstraints>;

/// One U10 team, both sessions on Monday 17:00.
fn clashing() -> Director {
    let schedule = ScheduleBuilder::new(60)
        .trainer(trainer("ann", 4, &[AgeGroup::U10]))
        .team(team(
            "u10a",
            AgeGroup::U10,
            14,
            2,
            &[Weekday::Monday, Weekday::Wednesday],
            (17, 19),
        ))
        .slots(&[Weekday::Monday, Weekday::Wednesday], 17..19)
        .assign(0, 0, 0)
        .assign(1, 0, 0)
        .build();
    TypedScoreDirector::new(schedule, create_constraints(), session_count)
}

fn session_count(s: &TrainingSchedule) -> usize {
    s.sessions.len()
}

fn move_session(scope: &mut SolverScope<TrainingSchedule, Director>, session: usize, slot: usize) {
    let director = scope.score_director_mut();
    director.before_variable_changed(session);
    director.working_solution_mut().sessions[session].time_slot = Some(slot);
    director.after_variable_changed(session);
}

#[test]
fn first_update_always_records_best() {
    let mut scope = SolverScope::with_seed(clashing(), 7);
    scope.start_solving();
    assert!(scope.best_score().is_none());

    assert!(scope.update_best_solution());
    let best = *scope.best_score().unwrap();
    assert!(best.hard() < 0);
    assert_eq!(scope.best_solution().unwrap().score(), Some(best));
}

#[test]
fn only_strictly_better_scores_replace_best() {
    let mut scope = SolverScope::with_seed(clashing(), 7);
    scope.start_solving();
    scope.update_best_solution();

    // Same score again is not a new best.
    assert!(!scope.update_best_solution());

    // Wednesday 17:00 removes the slot and day clashes.
    move_session(&mut scope, 1, 2);
    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score().unwrap().hard(), 0);

    // Moving back is worse and leaves the best untouched.
    move_session(&mut scope, 1, 0);
    assert!(!scope.update_best_solution());
    assert_eq!(scope.best_score().unwrap().hard(), 0);
    assert_eq!(scope.best_solution().unwrap().sessions[1].time_slot, Some(2));
}

#[test]
fn new_best_solutions_are_sent() {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut scope = SolverScope::with_seed(clashing(), 7).with_best_solution_sender(sender);
    scope.start_solving();

    scope.update_best_solution();
    scope.update_best_solution();
    move_session(&mut scope, 1, 2);
    scope.update_best_solution();
    drop(scope);

    let mut published: Vec<HardSoftScore> = Vec::new();
    while let Ok((solution, score)) = receiver.try_recv() {
        assert_eq!(solution.score, Some(score));
        published.push(score);
    }
    assert_eq!(published.len(), 2);
    assert!(published[1] > published[0]);
}

#[test]
fn unimproved_steps_reset_on_new_best() {
    let mut scope = SolverScope::with_seed(clashing(), 7);
    scope.start_solving();
    scope.update_best_solution();

    scope.increment_step_count();
    scope.increment_step_count();
    assert_eq!(scope.unimproved_step_count(), 2);

    move_session(&mut scope, 1, 2);
    scope.update_best_solution();
    assert_eq!(scope.unimproved_step_count(), 0);
    assert_eq!(scope.total_step_count(), 2);
}

#[test]
fn terminate_flag_is_observed() {
    let flag = Arc::new(AtomicBool::new(false));
    let scope = SolverScope::with_seed(clashing(), 7).with_terminate_early_flag(flag.clone());
    assert!(!scope.is_terminate_early());
    flag.store(true, Ordering::SeqCst);
    assert!(scope.is_terminate_early());
}

#[test]
fn take_falls_back_to_working_solution() {
    let scope = SolverScope::with_seed(clashing(), 7);
    let solution = scope.take_best_or_working_solution();
    assert_eq!(solution.sessions.len(), 2);
}

#[test]
fn phase_steps_count_towards_solver() {
    let mut scope = SolverScope::with_seed(clashing(), 7);
    scope.start_solving();
    scope.update_best_solution();

    let mut phase = PhaseScope::new(&mut scope, 1);
    assert_eq!(phase.phase_index(), 1);
    assert!(phase.starting_score().is_some());
    phase.increment_step_count();
    phase.increment_step_count();
    assert_eq!(phase.step_count(), 2);
    assert_eq!(scope.total_step_count(), 2);
}
