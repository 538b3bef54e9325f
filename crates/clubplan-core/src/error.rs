//! Error types for clubplan

use thiserror::Error;

/// Main error type for clubplan operations.
///
/// Infeasible schedules are not errors: they carry a negative hard score.
#[derive(Debug, Error)]
pub enum ClubPlanError {
    /// Structurally unusable input, reported by explicit validation only.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No job was ever submitted under this id.
    #[error("No schedule found for job id: {0}")]
    JobNotFound(String),

    /// The solver faulted while working on this job.
    #[error("Solving failed for job id {job_id}: {reason}")]
    SolveFailed { job_id: String, reason: String },

    /// Error during score calculation
    #[error("Score calculation error: {0}")]
    ScoreCalculation(String),

    /// Solver was cancelled before completion
    #[error("Solver was cancelled")]
    Cancelled,

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for clubplan operations
pub type Result<T> = std::result::Result<T, ClubPlanError>;
