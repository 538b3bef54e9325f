//! Move selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use clubplan_config::LocalSearchConfig;
use clubplan_core::TrainingSchedule;

use super::moves::TrainingMove;

/// Random move sampler.
///
/// Each step draws up to `sample_size` doable moves. A draw is a swap with
/// probability `swap_move_ratio`, otherwise a change of the time slot or
/// the trainer of one session (even odds). Draws that are not doable are
/// retried, up to a bounded number of attempts.
#[derive(Debug, Clone)]
pub struct MoveSampler {
    sample_size: usize,
    swap_move_ratio: f64,
}

impl MoveSampler {
    /// Draws allowed per requested move before a sample ends short.
    const ATTEMPTS_PER_MOVE: usize = 4;

    pub fn new(sample_size: usize, swap_move_ratio: f64) -> Self {
        Self {
            sample_size,
            swap_move_ratio: swap_move_ratio.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &LocalSearchConfig) -> Self {
        Self::new(config.move_sample_size, config.swap_move_ratio)
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Lazily yields up to `sample_size` doable moves for `schedule`.
    pub fn sample<'a>(
        &self,
        schedule: &'a TrainingSchedule,
        rng: &'a mut ChaCha8Rng,
    ) -> SampledMoves<'a> {
        SampledMoves {
            schedule,
            rng,
            swap_move_ratio: self.swap_move_ratio,
            remaining: self.sample_size,
            attempts_left: self.sample_size.saturating_mul(Self::ATTEMPTS_PER_MOVE),
        }
    }
}

/// Iterator returned by [`MoveSampler::sample`].
pub struct SampledMoves<'a> {
    schedule: &'a TrainingSchedule,
    rng: &'a mut ChaCha8Rng,
    swap_move_ratio: f64,
    remaining: usize,
    attempts_left: usize,
}

impl SampledMoves<'_> {
    fn draw(&mut self) -> Option<TrainingMove> {
        let sessions = self.schedule.sessions.len();
        if sessions == 0 {
            return None;
        }

        if sessions > 1 && self.rng.random_bool(self.swap_move_ratio) {
            let a = self.rng.random_range(0..sessions);
            let b = self.rng.random_range(0..sessions);
            return Some(TrainingMove::swap(a, b));
        }

        let session = self.rng.random_range(0..sessions);
        let slots = self.schedule.time_slots.len();
        let trainers = self.schedule.trainers.len();
        let change_slot = match (slots, trainers) {
            (0, 0) => return None,
            (_, 0) => true,
            (0, _) => false,
            _ => self.rng.random_bool(0.5),
        };

        if change_slot {
            let time_slot = self.rng.random_range(0..slots);
            Some(TrainingMove::change_time_slot(session, time_slot))
        } else {
            let trainer = self.rng.random_range(0..trainers);
            Some(TrainingMove::change_trainer(session, trainer))
        }
    }
}

impl Iterator for SampledMoves<'_> {
    type Item = TrainingMove;

    fn next(&mut self) -> Option<TrainingMove> {
        while self.remaining > 0 && self.attempts_left > 0 {
            self.attempts_left -= 1;
            let Some(candidate) = self.draw() else {
                self.attempts_left = 0;
                break;
            };
            if candidate.is_doable(self.schedule) {
                self.remaining -= 1;
                return Some(candidate);
            }
        }
        None
    }
}

/// Every doable move of `schedule`, in a fixed order: time slot changes,
/// trainer changes, then swaps.
pub fn all_moves(schedule: &TrainingSchedule) -> impl Iterator<Item = TrainingMove> + '_ {
    let sessions = schedule.sessions.len();
    let slot_changes = (0..sessions).flat_map(move |session| {
        (0..schedule.time_slots.len())
            .map(move |slot| TrainingMove::change_time_slot(session, slot))
    });
    let trainer_changes = (0..sessions).flat_map(move |session| {
        (0..schedule.trainers.len())
            .map(move |trainer| TrainingMove::change_trainer(session, trainer))
    });
    let swaps = (0..sessions)
        .flat_map(move |a| (a + 1..sessions).map(move |b| TrainingMove::swap(a, b)));

    slot_changes
        .chain(trainer_changes)
        .chain(swaps)
        .filter(move |m| m.is_doable(schedule))
}
