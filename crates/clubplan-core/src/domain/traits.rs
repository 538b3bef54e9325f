//! Core domain traits

use crate::score::Score;

/// A planning solution: problem facts, planning entities and a score.
///
/// Score directors and the local search driver are written against this
/// trait so they can hold any solution whose score they compute.
///
/// # Thread Safety
///
/// Planning solutions must be `Send + Sync` so best snapshots can be handed
/// to consumer threads.
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);

    /// Returns true if every planning variable has been assigned.
    fn is_initialized(&self) -> bool {
        true
    }
}
