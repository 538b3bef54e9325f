//! Solver phases.
//!
//! Phases run in sequence over one [`SolverScope`]:
//! - [`ConstructionPhase`]: assigns every unassigned session
//! - [`localsearch::LocalSearchPhase`]: improves the assignment until a
//!   termination fires

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

use crate::scope::SolverScope;

pub use construction::{construct_schedule, place_session, ConstructionPhase};

/// A phase of the solving process.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Executes this phase.
    ///
    /// The phase modifies the working solution in the solver scope and
    /// records new best solutions as it finds them.
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
