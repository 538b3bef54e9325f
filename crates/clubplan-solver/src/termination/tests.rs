use std::time::Duration;

use clubplan_config::TerminationConfig;
use clubplan_core::{AgeGroup, HardSoftScore, TrainingSchedule, Weekday};
use clubplan_scoring::{create_constraints, ClubConstraints, TypedScoreDirector};
use clubplan_test::{team, trainer, ScheduleBuilder};

use super::*;
use crate::scope::SolverScope;

type Director = TypedScoreDirector<TrainingSchedule, ClubConstraints>;

fn session_count(s: &TrainingSchedule) -> usize {
    s.sessions.len()
}

/// Two sessions of one team; `clash` puts both in the same slot.
fn scope(clash: bool) -> SolverScope<TrainingSchedule, Director> {
    let second_slot = if clash { 0 } else { 2 };
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
        .assign(1, second_slot, 0)
        .build();
    let director = TypedScoreDirector::new(schedule, create_constraints(), session_count);
    let mut scope = SolverScope::with_seed(director, 1);
    scope.start_solving();
    scope.update_best_solution();
    scope
}

#[test]
fn step_count_terminates_at_limit() {
    let mut scope = scope(true);
    let term = StepCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn time_termination_needs_a_started_solve() {
    let schedule = scope(true).take_best_or_working_solution();
    let unstarted = SolverScope::with_seed(
        TypedScoreDirector::new(schedule, create_constraints(), session_count),
        1,
    );
    assert!(!TimeTermination::millis(0).is_terminated(&unstarted));

    let started = scope(true);
    assert!(TimeTermination::millis(0).is_terminated(&started));
    assert!(!TimeTermination::seconds(3600).is_terminated(&started));
}

#[test]
fn unimproved_counts_steps_since_best() {
    let mut scope = scope(true);
    let term = UnimprovedStepCountTermination::new(2);

    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn best_score_feasible_checks_hard_level() {
    assert!(!BestScoreFeasibleTermination.is_terminated(&scope(true)));
    assert!(BestScoreFeasibleTermination.is_terminated(&scope(false)));
}

#[test]
fn best_score_target() {
    let scope = scope(false);
    let reached = BestScoreTermination::new(HardSoftScore::of(0, -100));
    let unreached = BestScoreTermination::new(HardSoftScore::of(0, 100));
    assert!(reached.is_terminated(&scope));
    assert!(!unreached.is_terminated(&scope));
}

#[test]
fn or_fires_when_any_child_fires() {
    let mut scope = scope(true);
    let term = OrTermination::new((
        TimeTermination::seconds(3600),
        StepCountTermination::new(1),
        None::<BestScoreFeasibleTermination>,
    ));

    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn from_config_always_bounds_time() {
    let term = from_config(&TerminationConfig::default());
    let (time, steps, unimproved, feasible) = &term.0;
    assert_eq!(time.limit(), Duration::from_secs(30));
    assert!(steps.is_none());
    assert!(unimproved.is_none());
    assert!(feasible.is_none());
    assert!(!term.is_terminated(&scope(false)));
}

#[test]
fn from_config_adds_set_limits() {
    let config = TerminationConfig {
        seconds_spent_limit: Some(5),
        step_count_limit: Some(10),
        best_score_feasible: true,
        ..TerminationConfig::default()
    };
    let term = from_config(&config);
    assert_eq!(term.0 .0.limit(), Duration::from_secs(5));
    assert!(term.0 .1.is_some());
    assert!(term.0 .3.is_some());

    assert!(!term.is_terminated(&scope(true)));
    assert!(term.is_terminated(&scope(false)));
}
