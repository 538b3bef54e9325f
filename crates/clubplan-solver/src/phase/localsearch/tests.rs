use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clubplan_config::{LocalSearchConfig, TerminationConfig};
use clubplan_core::{AgeGroup, HardSoftScore, TrainingSchedule, Weekday};
use clubplan_scoring::{create_constraints, score_schedule, ClubConstraints, TypedScoreDirector};
use clubplan_test::{slot, small_club_schedule, team, trainer, ScheduleBuilder};
use tokio::sync::mpsc;

use super::*;
use crate::heuristic::{MoveSampler, TrainingMove};
use crate::phase::{construct_schedule, Phase};
use crate::scope::SolverScope;
use crate::termination::{
    BestScoreFeasibleTermination, OrTermination, StepCountTermination, TimeTermination,
};

type Director = TypedScoreDirector<TrainingSchedule, ClubConstraints>;

fn session_count(s: &TrainingSchedule) -> usize {
    s.sessions.len()
}

fn started_scope(schedule: TrainingSchedule, seed: u64) -> SolverScope<TrainingSchedule, Director> {
    let director = TypedScoreDirector::new(schedule, create_constraints(), session_count);
    let mut scope = SolverScope::with_seed(director, seed);
    scope.start_solving();
    scope.update_best_solution();
    scope
}

/// Small club with every session on Monday 17:00 with coach-a.
fn crowded_club() -> TrainingSchedule {
    let mut schedule = small_club_schedule();
    for session in &mut schedule.sessions {
        session.time_slot = Some(0);
        session.trainer = Some(0);
    }
    schedule
}

fn hill_climbing<T>(termination: T) -> LocalSearchPhase<HillClimbingAcceptor, T> {
    LocalSearchPhase::new(
        MoveSampler::new(32, 0.2),
        HillClimbingAcceptor,
        MoveTabuList::new(5),
        termination,
    )
}

#[test]
fn tabu_list_forgets_oldest_moves() {
    let mut tabu = MoveTabuList::new(2);
    tabu.record(TrainingMove::change_trainer(0, 1));
    tabu.record(TrainingMove::change_trainer(1, 1));
    tabu.record(TrainingMove::swap(0, 1));

    assert_eq!(tabu.len(), 2);
    assert!(!tabu.is_tabu(&TrainingMove::change_trainer(0, 1)));
    assert!(tabu.is_tabu(&TrainingMove::change_trainer(1, 1)));
    assert!(tabu.is_tabu(&TrainingMove::swap(1, 0)));

    tabu.clear();
    assert!(tabu.is_empty());
}

#[test]
fn zero_sized_tabu_list_stays_empty() {
    let mut tabu = MoveTabuList::new(0);
    tabu.record(TrainingMove::change_trainer(0, 1));
    assert!(tabu.is_empty());
    assert!(!tabu.is_tabu(&TrainingMove::change_trainer(0, 1)));
}

#[test]
fn step_limit_is_honoured() {
    let mut scope = started_scope(crowded_club(), 1);
    let mut phase = hill_climbing(StepCountTermination::new(25));
    phase.solve(&mut scope);

    assert_eq!(scope.total_step_count(), 25);
    assert!(scope.moves_evaluated() >= 25);
}

#[test]
fn search_never_loses_the_best_score() {
    let mut scope = started_scope(crowded_club(), 5);
    let initial = *scope.best_score().unwrap();

    let mut phase = hill_climbing(StepCountTermination::new(200));
    phase.solve(&mut scope);

    let best = *scope.best_score().unwrap();
    assert!(best > initial);
    assert_eq!(best, score_schedule(scope.best_solution().unwrap()));
    // Hill climbing never steps down, so the working schedule is the best one.
    assert_eq!(scope.calculate_score(), best);
}

#[test]
fn incremental_score_matches_full_recalculation() {
    let schedule = construct_schedule(small_club_schedule(), 8);
    let mut scope = started_scope(schedule, 8);

    let mut phase = LocalSearchPhase::from_config(
        &LocalSearchConfig::default(),
        &TerminationConfig {
            step_count_limit: Some(300),
            ..TerminationConfig::default()
        },
    );
    phase.solve(&mut scope);

    let working = scope.working_solution().clone();
    assert_eq!(scope.calculate_score(), score_schedule(&working));
}

#[test]
fn small_club_becomes_feasible() {
    let schedule = construct_schedule(small_club_schedule(), 21);
    let mut scope = started_scope(schedule, 21);

    let mut phase = LocalSearchPhase::new(
        MoveSampler::new(64, 0.2),
        ConfiguredAcceptor::LateAcceptance(LateAcceptanceAcceptor::new(50)),
        MoveTabuList::new(10),
        OrTermination((
            StepCountTermination::new(3000),
            BestScoreFeasibleTermination,
        )),
    );
    phase.solve(&mut scope);

    let best = scope.best_solution().unwrap();
    assert_eq!(best.score.map(|s| s.hard()), Some(0));
    assert_eq!(score_schedule(best).hard(), 0);
}

#[test]
fn published_scores_only_improve() {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let director = TypedScoreDirector::new(crowded_club(), create_constraints(), session_count);
    let mut scope = SolverScope::with_seed(director, 3).with_best_solution_sender(sender);
    scope.start_solving();
    scope.update_best_solution();

    let mut phase = LocalSearchPhase::new(
        MoveSampler::new(16, 0.5),
        ConfiguredAcceptor::SimulatedAnnealing(SimulatedAnnealingAcceptor::new(50.0, 0.99)),
        MoveTabuList::new(10),
        StepCountTermination::new(300),
    );
    phase.solve(&mut scope);
    drop(scope);

    let mut published: Vec<HardSoftScore> = Vec::new();
    while let Ok((solution, score)) = receiver.try_recv() {
        assert_eq!(score_schedule(&solution), score);
        published.push(score);
    }
    assert!(published.len() > 1);
    assert!(published.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn terminate_flag_stops_before_first_step() {
    let flag = Arc::new(AtomicBool::new(true));
    let director = TypedScoreDirector::new(crowded_club(), create_constraints(), session_count);
    let mut scope = SolverScope::with_seed(director, 3).with_terminate_early_flag(flag);
    scope.start_solving();
    scope.update_best_solution();

    let mut phase = hill_climbing(TimeTermination::seconds(60));
    phase.solve(&mut scope);

    assert_eq!(scope.total_step_count(), 0);
    assert_eq!(scope.working_solution().sessions, crowded_club().sessions);
}

#[test]
fn phase_ends_without_doable_moves() {
    // One session, one slot, one trainer: nothing can change.
    let schedule = ScheduleBuilder::new(60)
        .trainer(trainer("ann", 4, &[AgeGroup::U10]))
        .team(team("u10a", AgeGroup::U10, 14, 1, &[Weekday::Monday], (17, 19)))
        .slot(slot(Weekday::Monday, 17))
        .assign(0, 0, 0)
        .build();
    let mut scope = started_scope(schedule, 3);

    let mut phase = hill_climbing(TimeTermination::seconds(60));
    phase.solve(&mut scope);

    assert_eq!(scope.total_step_count(), 0);
    assert_eq!(scope.best_score().unwrap().hard(), 0);
}
