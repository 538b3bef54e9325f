//! Hill climbing acceptor.

use rand_chacha::ChaCha8Rng;

use clubplan_core::PlanningSolution;

use super::Acceptor;

/// Accepts only moves that do not worsen the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl<S: PlanningSolution> Acceptor<S> for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        _rng: &mut ChaCha8Rng,
    ) -> bool {
        move_score >= last_step_score
    }
}
