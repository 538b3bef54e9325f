//! Score-based termination conditions.

use clubplan_core::{PlanningSolution, Score};
use clubplan_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when the best score reaches or exceeds a target.
///
/// # Example
///
/// ```
/// use clubplan_core::HardSoftScore;
/// use clubplan_solver::termination::BestScoreTermination;
///
/// let term = BestScoreTermination::new(HardSoftScore::of(0, -10));
/// ```
#[derive(Debug, Clone)]
pub struct BestScoreTermination<Sc: Score> {
    target_score: Sc,
}

impl<Sc: Score> BestScoreTermination<Sc> {
    pub fn new(target_score: Sc) -> Self {
        Self { target_score }
    }
}

impl<S, Sc, D> Termination<S, D> for BestScoreTermination<Sc>
where
    S: PlanningSolution<Score = Sc>,
    Sc: Score,
    D: ScoreDirector<S>,
{
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope
            .best_score()
            .is_some_and(|score| *score >= self.target_score)
    }
}

/// Terminates as soon as the best score is feasible.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScoreFeasibleTermination;

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for BestScoreFeasibleTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.best_score().is_some_and(|score| score.is_feasible())
    }
}
