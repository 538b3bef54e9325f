//! clubplan - weekly training scheduler for youth sports clubs
//!
//! Assigns every required training session of every team a weekly time
//! slot and a trainer, honouring hard rules (availability, qualification,
//! conflicts, field capacity, trainer workload) and optimizing soft ones
//! (spread-out days, early slots for young teams, compact trainer days,
//! stable and preferred trainers).
//!
//! # Example
//!
//! ```rust
//! use clubplan::prelude::*;
//!
//! let score = HardSoftScore::of(0, -12);
//! assert!(score.is_feasible());
//! assert_eq!(score.to_string(), "0hard/-12soft");
//!
//! let config = SolverConfig::new().with_random_seed(7).with_step_limit(200);
//! let result = solve_schedule(clubplan::demo::demo_club().into_schedule(), config);
//! assert_eq!(result.solution.unassigned_count(), 0);
//! ```

pub mod console;
pub mod demo;
pub mod report;
pub mod run;

// Score types
pub use clubplan_core::{HardSoftScore, Score, ScoreLevel};

// Domain model
pub use clubplan_core::{
    AgeGroup, FieldConfig, SolveRequest, SolverStatus, Team, TimeSlot, Trainer, TrainingSchedule,
    TrainingSession, Weekday,
};

pub use clubplan_core::{ClubPlanError, Result};

pub use clubplan_config::{AcceptorConfig, ConfigError, SolverConfig};

pub use run::{solve_request, SolveOutput};

// Scoring
pub use clubplan_scoring::{explain_schedule, rules, score_schedule};

// Solving and job management
pub use clubplan_solver::{
    analyze_score, analyze_sessions, solve_schedule, ConstraintMatchInfo, JobStatus,
    ScoreAnalysis, SessionAnalysis, SolveResult, Solver, SolverManager, ViolationInfo,
};

pub mod prelude {
    pub use super::{
        AgeGroup, HardSoftScore, Score, SolveRequest, SolverConfig, SolverManager, SolverStatus,
        Team, TimeSlot, Trainer, TrainingSchedule, Weekday,
    };
    pub use super::{analyze_score, analyze_sessions, score_schedule, solve_schedule};
}
