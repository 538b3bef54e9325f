//! State of one solve job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use clubplan_core::{ClubPlanError, HardSoftScore, Result, SolverStatus, TrainingSchedule};

/// A solving job that can be queried for its current state.
///
/// `schedule` always holds a complete snapshot: the submitted schedule
/// until the first best solution arrives, then the latest best one.
#[derive(Debug)]
pub struct SolveJob {
    pub id: String,
    pub status: SolverStatus,
    pub schedule: TrainingSchedule,
    /// Reason the solver faulted; set together with [`SolverStatus::Failed`].
    pub error: Option<String>,
    terminate_flag: Arc<AtomicBool>,
    completion: Arc<Completion>,
}

impl SolveJob {
    pub fn new(id: String, schedule: TrainingSchedule) -> Self {
        Self {
            id,
            status: SolverStatus::SolvingScheduled,
            schedule,
            error: None,
            terminate_flag: Arc::new(AtomicBool::new(false)),
            completion: Arc::new(Completion::default()),
        }
    }

    /// Flag shared with the job's solver.
    pub fn terminate_flag(&self) -> Arc<AtomicBool> {
        self.terminate_flag.clone()
    }

    pub fn request_termination(&self) {
        self.terminate_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_terminate_requested(&self) -> bool {
        self.terminate_flag.load(Ordering::SeqCst)
    }

    pub(crate) fn completion(&self) -> Arc<Completion> {
        self.completion.clone()
    }

    pub fn score(&self) -> Option<HardSoftScore> {
        self.schedule.score
    }

    /// The current schedule tagged with the job status, or the recorded
    /// failure.
    pub fn snapshot(&self) -> Result<TrainingSchedule> {
        if let Some(reason) = &self.error {
            return Err(ClubPlanError::SolveFailed {
                job_id: self.id.clone(),
                reason: reason.clone(),
            });
        }
        let mut schedule = self.schedule.clone();
        schedule.solver_status = self.status;
        Ok(schedule)
    }

    pub(crate) fn start(&mut self) {
        self.status = SolverStatus::SolvingActive;
    }

    pub(crate) fn publish(&mut self, schedule: TrainingSchedule) {
        if self.status.is_solving() {
            self.schedule = schedule;
        }
    }

    pub(crate) fn finish(&mut self, mut schedule: TrainingSchedule) {
        schedule.solver_status = SolverStatus::NotSolving;
        self.schedule = schedule;
        self.status = SolverStatus::NotSolving;
        self.completion.mark_done();
    }

    pub(crate) fn fail(&mut self, reason: String) {
        self.status = SolverStatus::Failed;
        self.schedule.solver_status = SolverStatus::Failed;
        self.error = Some(reason);
        self.completion.mark_done();
    }
}

/// One-shot completion signal of a job.
#[derive(Debug, Default)]
pub(crate) struct Completion {
    done: Mutex<bool>,
    cond: Condvar,
}

impl Completion {
    fn mark_done(&self) {
        let mut done = self.done.lock();
        *done = true;
        self.cond.notify_all();
    }

    pub(crate) fn is_done(&self) -> bool {
        *self.done.lock()
    }

    pub(crate) fn wait(&self) {
        let mut done = self.done.lock();
        while !*done {
            self.cond.wait(&mut done);
        }
    }

    /// Returns false if the job is still running after `timeout`.
    pub(crate) fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut done = self.done.lock();
        while !*done {
            if self.cond.wait_until(&mut done, deadline).timed_out() {
                break;
            }
        }
        *done
    }
}
