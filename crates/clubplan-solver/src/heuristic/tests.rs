use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use clubplan_core::{AgeGroup, TrainingSchedule, Weekday};
use clubplan_scoring::{
    create_constraints, score_schedule, ClubConstraints, ScoreDirector, TypedScoreDirector,
};
use clubplan_test::{small_club_schedule, team, trainer, ScheduleBuilder};

use super::*;

/// Two U10 sessions, Monday 17:00 with ann and Wednesday 17:00 with bob.
fn two_sessions() -> ScheduleBuilder {
    ScheduleBuilder::new(60)
        .trainer(trainer("ann", 4, &[AgeGroup::U10]))
        .trainer(trainer("bob", 4, &[AgeGroup::U10]))
        .team(team(
            "u10a",
            AgeGroup::U10,
            14,
            2,
            &[Weekday::Monday, Weekday::Wednesday],
            (17, 19),
        ))
        .slots(&[Weekday::Monday, Weekday::Wednesday], 17..19)
}

fn assigned() -> TrainingSchedule {
    two_sessions().assign(0, 0, 0).assign(1, 2, 1).build()
}

fn session_count(s: &TrainingSchedule) -> usize {
    s.sessions.len()
}

fn director(schedule: TrainingSchedule) -> TypedScoreDirector<TrainingSchedule, ClubConstraints> {
    TypedScoreDirector::new(schedule, create_constraints(), session_count)
}

#[test]
fn swap_is_canonical() {
    assert_eq!(TrainingMove::swap(3, 1), TrainingMove::Swap { a: 1, b: 3 });
    assert_eq!(TrainingMove::swap(1, 3), TrainingMove::swap(3, 1));
    assert_eq!(TrainingMove::swap(1, 3).sessions().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(
        TrainingMove::change_trainer(4, 0).sessions().collect::<Vec<_>>(),
        vec![4]
    );
}

#[test]
fn doability() {
    let schedule = assigned();

    assert!(TrainingMove::change_time_slot(0, 1).is_doable(&schedule));
    assert!(!TrainingMove::change_time_slot(0, 0).is_doable(&schedule));
    assert!(!TrainingMove::change_time_slot(0, 9).is_doable(&schedule));
    assert!(!TrainingMove::change_time_slot(5, 1).is_doable(&schedule));

    assert!(TrainingMove::change_trainer(0, 1).is_doable(&schedule));
    assert!(!TrainingMove::change_trainer(0, 0).is_doable(&schedule));

    assert!(TrainingMove::swap(0, 1).is_doable(&schedule));
    assert!(!TrainingMove::swap(1, 1).is_doable(&schedule));

    let twins = two_sessions().assign(0, 0, 0).assign(1, 0, 0).build();
    assert!(!TrainingMove::swap(0, 1).is_doable(&twins));
}

#[test]
fn changes_skip_unassigned_sessions() {
    let schedule = two_sessions().assign(0, 0, 0).build();
    assert!(!TrainingMove::change_time_slot(1, 1).is_doable(&schedule));
    assert!(!TrainingMove::change_trainer(1, 1).is_doable(&schedule));
    // Swapping keeps both sessions either assigned or unassigned.
    assert!(TrainingMove::swap(0, 1).is_doable(&schedule));
}

#[test]
fn do_move_returns_its_undo() {
    let original = assigned();
    let mut director = director(original.clone());
    director.calculate_score();

    for m in [
        TrainingMove::change_time_slot(0, 3),
        TrainingMove::change_trainer(1, 0),
        TrainingMove::swap(0, 1),
    ] {
        let undo = m.do_move(&mut director).unwrap();
        assert_ne!(director.working_solution().sessions, original.sessions);
        assert_eq!(
            director.calculate_score(),
            score_schedule(director.working_solution())
        );

        undo.do_move(&mut director).unwrap();
        assert_eq!(director.working_solution().sessions, original.sessions);
        assert_eq!(director.calculate_score(), score_schedule(&original));
    }
}

#[test]
fn do_move_ignores_undoable_moves() {
    let mut director = director(assigned());
    assert!(TrainingMove::change_time_slot(0, 0).do_move(&mut director).is_none());
    assert_eq!(director.working_solution().sessions, assigned().sessions);
}

#[test]
fn swap_exchanges_both_variables() {
    let mut director = director(assigned());
    TrainingMove::swap(0, 1).do_move(&mut director);

    let sessions = &director.working_solution().sessions;
    assert_eq!((sessions[0].time_slot, sessions[0].trainer), (Some(2), Some(1)));
    assert_eq!((sessions[1].time_slot, sessions[1].trainer), (Some(0), Some(0)));
}

#[test]
fn evaluate_leaves_schedule_unchanged() {
    let mut director = director(assigned());
    let before = director.calculate_score();

    // Both sessions on Monday.
    let m = TrainingMove::change_time_slot(1, 1);
    let score = m.evaluate(&mut director).unwrap();

    let mut moved = assigned();
    moved.sessions[1].time_slot = Some(1);
    assert_eq!(score, score_schedule(&moved));
    assert_eq!(score.hard(), before.hard() - 1);

    assert_eq!(director.working_solution().sessions, assigned().sessions);
    assert_eq!(director.calculate_score(), before);
    assert_eq!(m.score_delta(&mut director).unwrap(), score - before);
}

#[test]
fn all_moves_enumerates_doable_moves() {
    let schedule = assigned();
    let moves: Vec<TrainingMove> = all_moves(&schedule).collect();

    // Three other slots and one other trainer per session, plus the swap.
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().all(|m| m.is_doable(&schedule)));
    assert_eq!(moves.last(), Some(&TrainingMove::swap(0, 1)));
}

#[test]
fn sampler_respects_sample_size() {
    let mut schedule = small_club_schedule();
    for (i, session) in schedule.sessions.iter_mut().enumerate() {
        session.time_slot = Some(i);
        session.trainer = Some(i % 3);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let moves: Vec<TrainingMove> = MoveSampler::new(20, 0.2)
        .sample(&schedule, &mut rng)
        .collect();
    assert_eq!(moves.len(), 20);
    assert!(moves.iter().all(|m| m.is_doable(&schedule)));
}

#[test]
fn sampler_is_reproducible() {
    let schedule = assigned();
    let sampler = MoveSampler::new(16, 0.3);

    let mut first_rng = ChaCha8Rng::seed_from_u64(5);
    let mut second_rng = ChaCha8Rng::seed_from_u64(5);
    let first: Vec<_> = sampler.sample(&schedule, &mut first_rng).collect();
    let second: Vec<_> = sampler.sample(&schedule, &mut second_rng).collect();
    assert_eq!(first, second);
}

#[test]
fn swap_ratio_controls_move_kinds() {
    let schedule = assigned();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let swaps: Vec<_> = MoveSampler::new(8, 1.0).sample(&schedule, &mut rng).collect();
    assert!(!swaps.is_empty());
    assert!(swaps.iter().all(|m| matches!(m, TrainingMove::Swap { .. })));

    let changes: Vec<_> = MoveSampler::new(8, 0.0).sample(&schedule, &mut rng).collect();
    assert_eq!(changes.len(), 8);
    assert!(changes.iter().all(|m| !matches!(m, TrainingMove::Swap { .. })));
}

#[test]
fn sampler_on_unassigned_schedule_ends() {
    let schedule = small_club_schedule();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Every session is unassigned and all swaps exchange equal pairs.
    assert_eq!(MoveSampler::new(10, 0.5).sample(&schedule, &mut rng).count(), 0);
    assert_eq!(all_moves(&schedule).count(), 0);
}
