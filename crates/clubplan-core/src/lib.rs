//! clubplan core - shared types for the training scheduler
//!
//! This crate provides the fundamental building blocks:
//! - Score types for comparing schedules
//! - Constraint identity used by scoring and reporting
//! - The fact model (trainers, teams, time slots, field capacity)
//! - The assignment model (training sessions and the schedule aggregate)

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

#[cfg(test)]
mod constraint_tests;

pub use constraint::{ConstraintRef, ImpactType, CONSTRAINT_PACKAGE};
pub use domain::{
    AgeGroup, FieldConfig, PlanningSolution, SolveRequest, SolverStatus, Team, TimeSlot, Trainer,
    TrainingSchedule, TrainingSession, Weekday,
};
pub use error::{ClubPlanError, Result};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreLevel, ScoreParseError};
