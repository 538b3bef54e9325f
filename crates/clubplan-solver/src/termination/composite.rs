//! Composite termination.

use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Combines a tuple of terminations; terminates when ANY child terminates.
///
/// # Examples
///
/// ```
/// use clubplan_solver::termination::{OrTermination, StepCountTermination, TimeTermination};
///
/// // 30 seconds or 1000 steps, whichever comes first.
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     StepCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<S, D, $($T),+> Termination<S, D> for OrTermination<($($T,)+)>
        where
            S: PlanningSolution,
            D: ScoreDirector<S>,
            $($T: Termination<S, D>,)+
        {
            fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
                $((self.0).$idx.is_terminated(solver_scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
