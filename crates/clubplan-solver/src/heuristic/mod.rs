//! Moves and move selection for the local search.
//!
//! - [`TrainingMove`]: change one session's time slot or trainer, or swap
//!   the assignments of two sessions
//! - [`MoveSampler`]: draws a bounded random sample of doable moves per step
//! - [`all_moves`]: exhaustive enumeration, used when sampling comes up empty

mod moves;
mod selector;

pub use moves::TrainingMove;
pub use selector::{all_moves, MoveSampler, SampledMoves};

#[cfg(test)]
mod tests;
