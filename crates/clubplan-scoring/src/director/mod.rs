//! Score director implementations.
//!
//! The score director owns the working solution and keeps its score current.
//! [`TypedScoreDirector`] scores incrementally over a tuple `ConstraintSet`.

mod traits;

pub mod typed;

#[cfg(test)]
mod tests;

pub use traits::ScoreDirector;
pub use typed::TypedScoreDirector;
