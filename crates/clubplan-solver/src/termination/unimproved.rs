//! Termination based on lack of improvement.

use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates if the best score has not improved for a number of steps.
///
/// The solver scope records the step of the last new best, so this
/// termination carries no state of its own.
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D>
    for UnimprovedStepCountTermination
{
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.unimproved_step_count() >= self.limit
    }
}
