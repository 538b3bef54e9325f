//! Synchronous solve through a [`SolverManager`], as the CLI runs it.

use serde::Serialize;

use clubplan_config::SolverConfig;
use clubplan_core::{Result, SolveRequest, TrainingSchedule};
use clubplan_solver::{ScoreAnalysis, SessionAnalysis, SolverManager};

/// Final schedule of one job with both reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveOutput {
    pub job_id: String,
    pub schedule: TrainingSchedule,
    pub score_analysis: ScoreAnalysis,
    pub session_analysis: Vec<SessionAnalysis>,
}

/// Submits `request` as a single job, waits for it and collects the reports.
///
/// # Errors
///
/// Fails for an invalid `config` or when the job faults.
pub fn solve_request(request: SolveRequest, config: SolverConfig) -> Result<SolveOutput> {
    let manager = SolverManager::new(config)?;
    let job_id = manager.submit(request);
    let schedule = manager.wait_for(&job_id)?;
    let score_analysis = manager.get_score_analysis(&job_id)?;
    let session_analysis = manager.get_session_analysis(&job_id)?;

    Ok(SolveOutput {
        job_id,
        schedule,
        score_analysis,
        session_analysis,
    })
}
