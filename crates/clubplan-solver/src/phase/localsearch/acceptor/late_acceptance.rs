//! Late acceptance acceptor.

use std::fmt::Debug;

use rand_chacha::ChaCha8Rng;

use clubplan_core::PlanningSolution;

use super::Acceptor;

/// Late acceptance acceptor - accepts moves that are no worse than the
/// step score from `late_acceptance_size` steps ago.
///
/// # Example
///
/// ```
/// use clubplan_core::TrainingSchedule;
/// use clubplan_solver::phase::localsearch::LateAcceptanceAcceptor;
///
/// let acceptor = LateAcceptanceAcceptor::<TrainingSchedule>::new(400);
/// ```
pub struct LateAcceptanceAcceptor<S: PlanningSolution> {
    late_acceptance_size: usize,
    /// Circular buffer of historical step scores.
    score_history: Vec<Option<S::Score>>,
    current_index: usize,
}

impl<S: PlanningSolution> Debug for LateAcceptanceAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("current_index", &self.current_index)
            .finish()
    }
}

impl<S: PlanningSolution> Clone for LateAcceptanceAcceptor<S> {
    fn clone(&self) -> Self {
        Self {
            late_acceptance_size: self.late_acceptance_size,
            score_history: self.score_history.clone(),
            current_index: self.current_index,
        }
    }
}

impl<S: PlanningSolution> LateAcceptanceAcceptor<S> {
    /// Creates a late acceptance acceptor keeping `late_acceptance_size`
    /// historical scores (at least one).
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }
}

impl<S: PlanningSolution> Default for LateAcceptanceAcceptor<S> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<S: PlanningSolution> Acceptor<S> for LateAcceptanceAcceptor<S> {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        _rng: &mut ChaCha8Rng,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        self.score_history.fill(Some(*initial_score));
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &S::Score) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
