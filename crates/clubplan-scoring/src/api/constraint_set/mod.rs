// Typed constraint sets for incremental scoring.

mod incremental;

#[cfg(test)]
mod tests;

pub use incremental::{ConstraintResult, ConstraintSet, IncrementalConstraint};
