//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tracing::debug;

use clubplan_core::PlanningSolution;
use clubplan_scoring::ScoreDirector;

/// Top-level scope for the entire solving process.
///
/// Holds the working solution (through its score director), the best
/// solution seen so far and the search RNG. Every strictly better best
/// solution is cloned and sent to the optional best-solution channel, so
/// consumers only ever see complete snapshots.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    total_step_count: u64,
    last_improvement_step: u64,
    moves_evaluated: u64,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    best_solution_sender: Option<mpsc::UnboundedSender<(S, S::Score)>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    pub fn new(score_director: D) -> Self {
        Self::with_seed(score_director, rand::random())
    }

    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            start_time: None,
            total_step_count: 0,
            last_improvement_step: 0,
            moves_evaluated: 0,
            terminate_early_flag: None,
            best_solution_sender: None,
        }
    }

    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = Some(flag);
        self
    }

    /// Sends `(solution, score)` for every new best solution.
    pub fn with_best_solution_sender(
        mut self,
        sender: mpsc::UnboundedSender<(S, S::Score)>,
    ) -> Self {
        self.best_solution_sender = Some(sender);
        self
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.last_improvement_step = 0;
        self.moves_evaluated = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    /// Splits the scope into the director and the RNG for callers that
    /// need both at once.
    pub fn director_and_rng_mut(&mut self) -> (&mut D, &mut ChaCha8Rng) {
        (&mut self.score_director, &mut self.rng)
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Snapshots the working solution if it beats the best score.
    ///
    /// Returns true if a new best was recorded.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let is_better = match &self.best_score {
            None => true,
            Some(best) => current_score > *best,
        };
        if !is_better {
            return false;
        }

        let mut snapshot = self.score_director.clone_working_solution();
        snapshot.set_score(Some(current_score));
        if let Some(sender) = &self.best_solution_sender {
            // A closed channel only means nobody listens any more.
            let _ = sender.send((snapshot.clone(), current_score));
        }
        self.best_solution = Some(snapshot);
        self.best_score = Some(current_score);
        self.last_improvement_step = self.total_step_count;

        debug!(
            event = "new_best",
            step = self.total_step_count,
            score = %current_score,
        );
        true
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best solution last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    pub fn increment_moves_evaluated(&mut self) {
        self.moves_evaluated += 1;
    }

    pub fn moves_evaluated(&self) -> u64 {
        self.moves_evaluated
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Consumes the scope, returning the best solution, or the working
    /// solution if no best was ever recorded.
    pub fn take_best_or_working_solution(self) -> S {
        match self.best_solution {
            Some(best) => best,
            None => self.score_director.clone_working_solution(),
        }
    }
}
