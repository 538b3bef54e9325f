//! Solver implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use clubplan_config::SolverConfig;
use clubplan_core::{HardSoftScore, PlanningSolution, Score, TrainingSchedule};
use clubplan_scoring::{create_constraints, score_schedule, ClubConstraints, TypedScoreDirector};

use crate::phase::localsearch::LocalSearchPhase;
use crate::phase::{ConstructionPhase, Phase};
use crate::scope::SolverScope;

/// Score director used for every solve.
pub type ClubScoreDirector = TypedScoreDirector<TrainingSchedule, ClubConstraints>;

/// Channel end receiving `(best schedule, best score)` snapshots.
pub type BestSolutionSender = mpsc::UnboundedSender<(TrainingSchedule, HardSoftScore)>;

/// Where a solver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverState {
    /// Building the initial assignment and its first score.
    #[default]
    Initializing,
    /// Running local search.
    Searching,
    /// Done; the best schedule has been returned.
    Terminated,
}

/// Statistics of one finished solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Local search steps taken.
    pub step_count: u64,
    /// Candidate moves scored.
    pub moves_evaluated: u64,
    pub elapsed: Duration,
}

impl SolverStats {
    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated as f64 / secs
        } else {
            0.0
        }
    }
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Best schedule found, with its score set.
    pub solution: TrainingSchedule,
    pub score: HardSoftScore,
    pub stats: SolverStats,
}

/// Solves one training schedule: a construction phase followed by local
/// search, both driven by a [`SolverConfig`].
///
/// # Example
///
/// ```
/// use clubplan_config::SolverConfig;
/// use clubplan_core::{AgeGroup, SolveRequest, Team, TimeSlot, Trainer, Weekday};
/// use clubplan_solver::Solver;
///
/// let request = SolveRequest {
///     trainers: vec![Trainer::new("t1", "Ann", 4).with_age_groups([AgeGroup::U8])],
///     teams: vec![Team::new("u8a", "U8 A", AgeGroup::U8, 12, 1)
///         .with_days([Weekday::Monday])
///         .with_hours(17, 19)],
///     time_slots: vec![TimeSlot::new("mon-17", Weekday::Monday, 17)],
///     field_capacity: 60,
/// };
///
/// let config = SolverConfig::new().with_random_seed(7).with_step_limit(10);
/// let result = Solver::new(config).solve(request.into_schedule());
/// assert_eq!(result.score.hard(), 0);
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    state: SolverState,
    terminate_early_flag: Arc<AtomicBool>,
    best_solution_sender: Option<BestSolutionSender>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            state: SolverState::Initializing,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            best_solution_sender: None,
        }
    }

    /// Shares a cancellation flag with the caller; setting it stops the
    /// solve at the next step.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = flag;
        self
    }

    /// Publishes every new best schedule on `sender`. The sender is dropped
    /// when the solve ends, which closes the channel.
    pub fn with_best_solution_sender(mut self, sender: BestSolutionSender) -> Self {
        self.best_solution_sender = Some(sender);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Requests early termination. Thread-safe through the shared flag.
    pub fn terminate_early(&self) {
        self.terminate_early_flag.store(true, Ordering::SeqCst);
    }

    /// Runs both phases and returns the best schedule seen.
    ///
    /// Never fails on infeasible input; infeasibility shows in the score.
    pub fn solve(&mut self, schedule: TrainingSchedule) -> SolveResult {
        self.set_state(SolverState::Initializing);

        let entity_count = schedule.sessions.len();
        let value_count = schedule.time_slots.len() + schedule.trainers.len();
        let seed = self.config.random_seed.unwrap_or_else(rand::random);

        let director: ClubScoreDirector =
            TypedScoreDirector::new(schedule, create_constraints(), session_count);
        let mut solver_scope = SolverScope::with_seed(director, seed)
            .with_terminate_early_flag(self.terminate_early_flag.clone());
        if let Some(sender) = self.best_solution_sender.take() {
            solver_scope = solver_scope.with_best_solution_sender(sender);
        }

        info!(
            event = "solve_start",
            entity_count = entity_count,
            value_count = value_count,
            time_limit_secs = self.config.termination.time_limit().as_secs(),
            seed = seed,
        );
        solver_scope.start_solving();

        let mut construction = ConstructionPhase;
        construction.solve(&mut solver_scope);

        self.set_state(SolverState::Searching);
        let mut local_search = LocalSearchPhase::from_config(
            &self.config.local_search,
            &self.config.termination,
        );
        local_search.solve(&mut solver_scope);

        self.set_state(SolverState::Terminated);
        let stats = SolverStats {
            step_count: solver_scope.total_step_count(),
            moves_evaluated: solver_scope.moves_evaluated(),
            elapsed: solver_scope.elapsed().unwrap_or_default(),
        };

        let mut solution = solver_scope.take_best_or_working_solution();
        let score = match solution.score() {
            Some(score) => score,
            None => {
                let score = score_schedule(&solution);
                solution.set_score(Some(score));
                score
            }
        };

        info!(
            event = "solve_end",
            score = %score,
            feasible = score.is_feasible(),
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            duration_ms = stats.elapsed.as_millis() as u64,
        );

        SolveResult {
            solution,
            score,
            stats,
        }
    }

    fn set_state(&mut self, state: SolverState) {
        debug!(event = "solver_state", state = ?state);
        self.state = state;
    }
}

fn session_count(schedule: &TrainingSchedule) -> usize {
    schedule.sessions.len()
}

/// Solves `schedule` with `config` on the calling thread.
pub fn solve_schedule(schedule: TrainingSchedule, config: SolverConfig) -> SolveResult {
    Solver::new(config).solve(schedule)
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
