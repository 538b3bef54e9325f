//! Constraint API.
//!
//! This module provides:
//! - `ConstraintSet` trait for tuple-based constraint evaluation
//! - `IncrementalConstraint` trait for incremental scoring
//! - Analysis types for score explanation

pub mod analysis;
pub mod constraint_set;


pub use analysis::{
    ConstraintAnalysis, ConstraintJustification, DetailedConstraintMatch, EntityRef, Indictment,
    IndictmentMap, ScoreExplanation,
};
pub use constraint_set::{ConstraintSet, IncrementalConstraint};
