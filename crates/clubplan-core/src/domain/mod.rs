//! Domain model for training schedules.
//!
//! Facts ([`Trainer`], [`Team`], [`TimeSlot`], [`FieldConfig`]) are immutable
//! inputs for one solve. [`TrainingSession`]s are the planning entities: each
//! holds two index-or-null fields pointing into the schedule's fact arrays,
//! and moves mutate those indices directly.

mod facts;
mod request;
mod schedule;
mod traits;

#[cfg(test)]
mod tests;

pub use facts::{AgeGroup, FieldConfig, Team, TimeSlot, Trainer, Weekday};
pub use request::SolveRequest;
pub use schedule::{SolverStatus, TrainingSchedule, TrainingSession};
pub use traits::PlanningSolution;
