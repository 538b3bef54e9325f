//! Phase-level scope.

use std::time::{Duration, Instant};

use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

use super::SolverScope;

/// Scope for a single phase of solving.
///
/// # Type Parameters
/// * `'a` - Lifetime of the solver scope reference
/// * `S` - The planning solution type
/// * `D` - The score director type
pub struct PhaseScope<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    solver_scope: &'a mut SolverScope<S, D>,
    phase_index: usize,
    starting_score: Option<S::Score>,
    step_count: u64,
    start_time: Instant,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> PhaseScope<'a, S, D> {
    pub fn new(solver_scope: &'a mut SolverScope<S, D>, phase_index: usize) -> Self {
        let starting_score = solver_scope.best_score().copied();
        Self {
            solver_scope,
            phase_index,
            starting_score,
            step_count: 0,
            start_time: Instant::now(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Best score when the phase started.
    pub fn starting_score(&self) -> Option<&S::Score> {
        self.starting_score.as_ref()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Increments both the phase and the solver step count.
    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
        self.step_count
    }

    /// Steps per second over the phase so far.
    pub fn speed(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.step_count as f64 / secs) as u64
        } else {
            0
        }
    }

    pub fn solver_scope(&self) -> &SolverScope<S, D> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<S, D> {
        self.solver_scope
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        self.solver_scope.score_director_mut()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.solver_scope.calculate_score()
    }

    pub fn update_best_solution(&mut self) -> bool {
        self.solver_scope.update_best_solution()
    }
}
