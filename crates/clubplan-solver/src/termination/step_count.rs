//! Step count termination.

use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a number of local search steps.
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for StepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.total_step_count() >= self.limit
    }
}
