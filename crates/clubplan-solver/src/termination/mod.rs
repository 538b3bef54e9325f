//! Termination conditions for the solver.
//!
//! Every job must stop within bounded wall-clock time, so
//! [`from_config`] always includes a [`TimeTermination`]. Cooperative
//! cancellation is not a termination: the terminate-early flag lives in the
//! [`SolverScope`] and is checked by the phases directly.

mod best_score;
mod composite;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use clubplan_config::TerminationConfig;
use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

use crate::scope::SolverScope;

pub use best_score::{BestScoreFeasibleTermination, BestScoreTermination};
pub use composite::OrTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

/// Trait for determining when to stop solving.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;
}

/// An absent termination never fires.
impl<S, D, T> Termination<S, D> for Option<T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    T: Termination<S, D>,
{
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        self.as_ref()
            .is_some_and(|termination| termination.is_terminated(solver_scope))
    }
}

/// The termination built from a [`TerminationConfig`].
pub type ConfiguredTermination = OrTermination<(
    TimeTermination,
    Option<StepCountTermination>,
    Option<UnimprovedStepCountTermination>,
    Option<BestScoreFeasibleTermination>,
)>;

/// Builds the termination for a job: the time limit (30 seconds unless
/// configured) plus every optional limit that is set.
pub fn from_config(config: &TerminationConfig) -> ConfiguredTermination {
    OrTermination::new((
        TimeTermination::new(config.time_limit()),
        config.step_count_limit.map(StepCountTermination::new),
        config
            .unimproved_step_count_limit
            .map(UnimprovedStepCountTermination::new),
        config
            .best_score_feasible
            .then_some(BestScoreFeasibleTermination),
    ))
}

#[cfg(test)]
mod tests;
