//! Job management for concurrent solves.
//!
//! The [`SolverManager`] runs every submitted schedule as an independent job
//! on a bounded worker pool and keeps the best-so-far schedule of each job
//! queryable by id.
//!
//! # Job lifecycle
//!
//! 1. `submit` registers the job as `SOLVING_SCHEDULED` and queues it
//! 2. A worker marks it `SOLVING_ACTIVE` and runs a [`Solver`]
//! 3. Each new best schedule travels over a channel to a publisher thread,
//!    which stores it on the job and calls the listener, so readers never
//!    see a schedule mid-move
//! 4. The job ends `NOT_SOLVING` with the best schedule, or `FAILED` when
//!    the solver faulted
//!
//! Cancellation is cooperative: `terminate_early` sets a flag the solver
//! checks before every step.

mod analysis;
mod job;


use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

use clubplan_config::SolverConfig;
use clubplan_core::{
    ClubPlanError, HardSoftScore, Result, SolveRequest, SolverStatus, TrainingSchedule,
};

use crate::solver::Solver;

pub use analysis::{
    analyze_score, analyze_sessions, violation_message, ConstraintMatchInfo, ScoreAnalysis,
    SessionAnalysis, ViolationInfo, UNASSIGNED,
};
pub use job::SolveJob;

/// Callback invoked with every new best schedule of a job, and once more
/// with the final schedule.
pub type BestSolutionListener = Arc<dyn Fn(&TrainingSchedule) + Send + Sync>;

type JobRef = Arc<RwLock<SolveJob>>;

/// Score and status of a job, without the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub score: Option<HardSoftScore>,
    pub solver_status: SolverStatus,
}

/// Runs solve jobs on a worker pool and answers queries about them.
pub struct SolverManager {
    config: SolverConfig,
    pool: rayon::ThreadPool,
    jobs: RwLock<HashMap<String, JobRef>>,
}

impl fmt::Debug for SolverManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverManager")
            .field("config", &self.config)
            .field("pool_size", &self.pool.current_num_threads())
            .field("jobs", &self.jobs.read().len())
            .finish()
    }
}

impl SolverManager {
    /// Creates a manager with `config.manager.pool_size` worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`ClubPlanError::InvalidInput`] for an invalid configuration.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|err| ClubPlanError::InvalidInput(err.to_string()))?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.manager.pool_size)
            .thread_name(|i| format!("clubplan-worker-{i}"))
            .build()
            .map_err(|err| ClubPlanError::Internal(err.to_string()))?;

        Ok(Self {
            config,
            pool,
            jobs: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds the schedule for `request` and queues it. Returns the job id.
    ///
    /// Structural problems in the request are logged, not rejected; they
    /// show up as hard score.
    pub fn submit(&self, request: SolveRequest) -> String {
        let issues = request.issues();
        let job_id = self.spawn_job(request.into_schedule(), None);
        if !issues.is_empty() {
            warn!(event = "job_input_issues", job_id = %job_id, issues = %issues.join("; "));
        }
        job_id
    }

    /// Queues an already built schedule, keeping any assignments it has.
    pub fn submit_schedule(&self, schedule: TrainingSchedule) -> String {
        self.spawn_job(schedule, None)
    }

    /// Like [`submit`](Self::submit), calling `listener` with every new best
    /// schedule and with the final one.
    pub fn solve_and_listen<L>(&self, request: SolveRequest, listener: L) -> String
    where
        L: Fn(&TrainingSchedule) + Send + Sync + 'static,
    {
        self.spawn_job(request.into_schedule(), Some(Arc::new(listener)))
    }

    /// Submits `request` and blocks until the job ends.
    pub fn solve(&self, request: SolveRequest) -> Result<TrainingSchedule> {
        let job_id = self.submit(request);
        self.wait_for(&job_id)
    }

    fn spawn_job(&self, schedule: TrainingSchedule, listener: Option<BestSolutionListener>) -> String {
        let job_id = Uuid::new_v4().to_string();
        let job = Arc::new(RwLock::new(SolveJob::new(job_id.clone(), schedule.clone())));
        self.jobs.write().insert(job_id.clone(), job.clone());

        info!(
            event = "job_submitted",
            job_id = %job_id,
            sessions = schedule.sessions.len(),
        );

        let config = self.config.clone();
        self.pool.spawn(move || run_job(job, schedule, config, listener));
        job_id
    }

    fn job(&self, job_id: &str) -> Result<JobRef> {
        self.jobs
            .read()
            .get(job_id)
            .cloned()
            .ok_or_else(|| ClubPlanError::JobNotFound(job_id.to_string()))
    }

    /// Best-so-far schedule of a job, tagged with its status.
    ///
    /// # Errors
    ///
    /// [`ClubPlanError::JobNotFound`] for unknown ids and
    /// [`ClubPlanError::SolveFailed`] for jobs whose solver faulted.
    pub fn get_schedule(&self, job_id: &str) -> Result<TrainingSchedule> {
        self.job(job_id)?.read().snapshot()
    }

    /// Current score and status. Failed jobs report [`SolverStatus::Failed`].
    pub fn get_status(&self, job_id: &str) -> Result<JobStatus> {
        let job = self.job(job_id)?;
        let job = job.read();
        Ok(JobStatus {
            score: job.score(),
            solver_status: job.status,
        })
    }

    /// Asks the job's solver to stop at its next step.
    pub fn terminate_early(&self, job_id: &str) -> Result<()> {
        self.job(job_id)?.read().request_termination();
        info!(event = "job_terminate_requested", job_id = %job_id);
        Ok(())
    }

    /// Terminates the job early and returns its final schedule.
    pub fn stop(&self, job_id: &str) -> Result<TrainingSchedule> {
        self.terminate_early(job_id)?;
        self.wait_for(job_id)
    }

    /// Blocks until the job ends and returns its final schedule.
    pub fn wait_for(&self, job_id: &str) -> Result<TrainingSchedule> {
        let job = self.job(job_id)?;
        let completion = job.read().completion();
        completion.wait();
        let snapshot = job.read().snapshot();
        snapshot
    }

    /// Waits at most `timeout` for the job to end. Returns true if it did.
    pub fn wait_for_timeout(&self, job_id: &str, timeout: Duration) -> Result<bool> {
        let completion = self.job(job_id)?.read().completion();
        Ok(completion.wait_for(timeout))
    }

    pub fn is_finished(&self, job_id: &str) -> Result<bool> {
        let completion = self.job(job_id)?.read().completion();
        Ok(completion.is_done())
    }

    /// Score report of the job's current schedule.
    pub fn get_score_analysis(&self, job_id: &str) -> Result<ScoreAnalysis> {
        let schedule = self.get_schedule(job_id)?;
        Ok(analyze_score(&schedule))
    }

    /// Per-session report of the job's current schedule.
    pub fn get_session_analysis(&self, job_id: &str) -> Result<Vec<SessionAnalysis>> {
        let schedule = self.get_schedule(job_id)?;
        Ok(analyze_sessions(&schedule))
    }

    /// Ids of all known jobs, sorted.
    pub fn list_jobs(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.jobs.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Forgets a job, terminating it if it is still running, and returns
    /// its last schedule.
    pub fn remove_job(&self, job_id: &str) -> Result<TrainingSchedule> {
        let job = self
            .jobs
            .write()
            .remove(job_id)
            .ok_or_else(|| ClubPlanError::JobNotFound(job_id.to_string()))?;
        let job = job.read();
        job.request_termination();
        job.snapshot()
    }
}

/// Body of a worker: solves one job and records the outcome.
fn run_job(
    job: JobRef,
    schedule: TrainingSchedule,
    config: SolverConfig,
    listener: Option<BestSolutionListener>,
) {
    let (job_id, terminate_flag) = {
        let mut guard = job.write();
        guard.start();
        (guard.id.clone(), guard.terminate_flag())
    };
    info!(event = "job_started", job_id = %job_id);

    if let Some(reason) = schedule.dangling_reference() {
        fail_job(&job, &job_id, reason);
        return;
    }

    let (sender, receiver) = mpsc::unbounded_channel();
    let publisher = match spawn_publisher(&job_id, job.clone(), receiver, listener.clone()) {
        Ok(handle) => handle,
        Err(err) => {
            fail_job(&job, &job_id, format!("could not start publisher: {err}"));
            return;
        }
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
        Solver::new(config)
            .with_terminate_flag(terminate_flag)
            .with_best_solution_sender(sender)
            .solve(schedule)
    }));

    if publisher.join().is_err() {
        warn!(event = "listener_panicked", job_id = %job_id);
    }

    match outcome {
        Ok(result) => {
            let mut final_schedule = result.solution;
            final_schedule.solver_status = SolverStatus::NotSolving;
            if let Some(listener) = &listener {
                let notified = panic::catch_unwind(AssertUnwindSafe(|| listener(&final_schedule)));
                if notified.is_err() {
                    warn!(event = "listener_panicked", job_id = %job_id);
                }
            }

            let mut guard = job.write();
            let terminated_early = guard.is_terminate_requested();
            guard.finish(final_schedule);
            drop(guard);

            info!(
                event = "job_finished",
                job_id = %job_id,
                score = %result.score,
                steps = result.stats.step_count,
                moves_evaluated = result.stats.moves_evaluated,
                duration_ms = result.stats.elapsed.as_millis() as u64,
                terminated_early = terminated_early,
            );
        }
        Err(payload) => fail_job(&job, &job_id, panic_message(payload.as_ref())),
    }
}

/// Stores every published best schedule on the job and forwards it to the
/// listener. Ends when the solver drops its sender.
fn spawn_publisher(
    job_id: &str,
    job: JobRef,
    mut receiver: mpsc::UnboundedReceiver<(TrainingSchedule, HardSoftScore)>,
    listener: Option<BestSolutionListener>,
) -> std::io::Result<JoinHandle<()>> {
    let short_id: String = job_id.chars().take(8).collect();
    thread::Builder::new()
        .name(format!("clubplan-publish-{short_id}"))
        .spawn(move || {
            while let Some((mut schedule, _score)) = receiver.blocking_recv() {
                schedule.solver_status = SolverStatus::SolvingActive;
                if let Some(listener) = &listener {
                    listener(&schedule);
                }
                job.write().publish(schedule);
            }
        })
}

fn fail_job(job: &JobRef, job_id: &str, reason: String) {
    error!(event = "job_failed", job_id = %job_id, reason = %reason);
    job.write().fail(reason);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("solver panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("solver panicked: {message}")
    } else {
        "solver panicked".to_string()
    }
}
