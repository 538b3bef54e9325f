//! Incremental constraint scoring for clubplan.
//!
//! This crate turns a [`TrainingSchedule`](clubplan_core::TrainingSchedule)
//! into a comparable [`HardSoftScore`](clubplan_core::HardSoftScore):
//! - `IncrementalConstraint` and tuple-based `ConstraintSet`s
//! - Three reusable rule shapes (per session, per pair, per group)
//! - The fourteen scheduling rules in [`rules`]
//! - The incremental `TypedScoreDirector`
//! - Score explanation and per-session indictments
//!
//! # Incremental protocol
//!
//! Before a session's variables change, the director retracts it from every
//! rule; after the change it inserts it again. Each rule keeps grouping
//! indexes keyed on the values seen at insertion time, so only the rules
//! and groups touched by the moved session are re-evaluated.

pub mod api;
pub mod constraint;
pub mod director;
pub mod rules;

pub use api::analysis::{
    ConstraintAnalysis, ConstraintJustification, DetailedConstraintMatch, EntityRef, Indictment,
    IndictmentMap, ScoreExplanation,
};
pub use api::constraint_set::{ConstraintResult, ConstraintSet, IncrementalConstraint};
pub use constraint::{SessionGroupConstraint, SessionPairConstraint, SessionUniConstraint};
pub use director::{ScoreDirector, TypedScoreDirector};
pub use rules::{create_constraints, explain_schedule, score_schedule, ClubConstraints};
