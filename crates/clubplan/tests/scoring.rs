//! Incremental scoring checked against full recalculation.

use clubplan::demo::demo_club;
use clubplan::score_schedule;
use clubplan_scoring::{create_constraints, TypedScoreDirector};
use clubplan_test::small_club_schedule;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn session_count(schedule: &clubplan::TrainingSchedule) -> usize {
    schedule.sessions.len()
}

fn random_changes_agree(schedule: clubplan::TrainingSchedule, seed: u64) {
    let slots = schedule.time_slots.len();
    let trainers = schedule.trainers.len();
    let sessions = schedule.sessions.len();
    let mut director = TypedScoreDirector::new(schedule, create_constraints(), session_count);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..400 {
        let idx = rng.random_range(0..sessions);
        let slot = (!rng.random_bool(0.1)).then(|| rng.random_range(0..slots));
        let trainer = (!rng.random_bool(0.1)).then(|| rng.random_range(0..trainers));

        let incremental = director.do_change(idx, |s| {
            s.sessions[idx].time_slot = slot;
            s.sessions[idx].trainer = trainer;
        });
        assert_eq!(incremental, score_schedule(director.working_solution()));
    }
}

#[test]
fn small_club_random_changes() {
    random_changes_agree(small_club_schedule(), 17);
}

#[test]
fn demo_club_random_changes() {
    random_changes_agree(demo_club().into_schedule(), 23);
}
