//! Scope hierarchy for the solving process.
//!
//! - [`SolverScope`]: one solve, owns the score director, RNG and best solution
//! - [`PhaseScope`]: one phase, borrows the solver scope and counts its steps

mod phase;
mod solver;

pub use phase::PhaseScope;
pub use solver::SolverScope;

#[cfg(test)]
mod tests;
