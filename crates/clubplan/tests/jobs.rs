//! Concurrent jobs on one manager.

use std::collections::HashSet;

use clubplan::prelude::*;
use clubplan_test::small_club_request;

#[test]
fn concurrent_jobs_finish_independently() {
    let config = SolverConfig::new()
        .with_random_seed(9)
        .with_step_limit(200)
        .with_termination_seconds(20)
        .with_pool_size(2);
    let manager = SolverManager::new(config).unwrap();

    let ids: Vec<String> = (0..3).map(|_| manager.submit(small_club_request())).collect();
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 3);

    let schedules: Vec<TrainingSchedule> = ids
        .iter()
        .map(|id| manager.wait_for(id).unwrap())
        .collect();

    for (id, schedule) in ids.iter().zip(&schedules) {
        assert_eq!(schedule.solver_status, SolverStatus::NotSolving);
        assert_eq!(manager.get_status(id).unwrap().score, schedule.score);
    }
    // Same seed and input give the same schedule on every worker.
    assert!(schedules
        .windows(2)
        .all(|pair| pair[0].sessions == pair[1].sessions));
}

#[test]
fn status_is_queryable_while_solving() {
    let config = SolverConfig::new()
        .with_random_seed(3)
        .with_termination_seconds(60)
        .with_pool_size(1);
    let manager = SolverManager::new(config).unwrap();
    let job_id = manager.submit(small_club_request());

    let status = manager.get_status(&job_id).unwrap();
    assert!(status.solver_status.is_solving());
    let snapshot = manager.get_schedule(&job_id).unwrap();
    assert_eq!(snapshot.sessions.len(), 6);

    let stopped = manager.stop(&job_id).unwrap();
    assert_eq!(stopped.solver_status, SolverStatus::NotSolving);
    assert!(manager.is_finished(&job_id).unwrap());
}
