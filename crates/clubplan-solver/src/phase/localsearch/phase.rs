//! Local search phase implementation.

use std::time::Instant;

use tracing::{debug, info, trace};

use clubplan_config::{LocalSearchConfig, TerminationConfig};
use clubplan_core::{HardSoftScore, TrainingSchedule};
use clubplan_scoring::ScoreDirector;

use super::{Acceptor, ConfiguredAcceptor, MoveTabuList};
use crate::heuristic::{all_moves, MoveSampler, TrainingMove};
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};
use crate::termination::{self, ConfiguredTermination, Termination};

/// Local search phase that improves an assigned schedule.
///
/// Every step:
/// 1. Samples candidate moves (all doable moves if the sample is empty)
/// 2. Scores each candidate by applying and undoing it
/// 3. Drops candidates the acceptor rejects, and tabu candidates unless
///    they beat the best score
/// 4. Takes the best remaining candidate and records its undo as tabu
///
/// A step without an accepted candidate leaves the schedule unchanged. The
/// phase ends when the termination fires, the terminate-early flag is set,
/// or no doable move exists.
///
/// # Type Parameters
/// * `A` - The acceptor type
/// * `T` - The termination type
#[derive(Debug)]
pub struct LocalSearchPhase<A, T> {
    name: &'static str,
    sampler: MoveSampler,
    acceptor: A,
    tabu: MoveTabuList,
    termination: T,
    candidates: Vec<TrainingMove>,
}

impl<A, T> LocalSearchPhase<A, T>
where
    A: Acceptor<TrainingSchedule>,
{
    pub fn new(sampler: MoveSampler, acceptor: A, tabu: MoveTabuList, termination: T) -> Self {
        let candidates = Vec::with_capacity(sampler.sample_size());
        Self {
            name: "Local Search",
            sampler,
            acceptor,
            tabu,
            termination,
            candidates,
        }
    }

    /// Sets the phase name used in log events.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl LocalSearchPhase<ConfiguredAcceptor<TrainingSchedule>, ConfiguredTermination> {
    /// Builds the phase described by the local search and termination
    /// configuration.
    pub fn from_config(local_search: &LocalSearchConfig, termination: &TerminationConfig) -> Self {
        let acceptor = ConfiguredAcceptor::from_config(&local_search.acceptor);
        let name = acceptor.name();
        Self::new(
            MoveSampler::from_config(local_search),
            acceptor,
            MoveTabuList::new(local_search.tabu_size),
            termination::from_config(termination),
        )
        .with_name(name)
    }
}

impl<A, T> LocalSearchPhase<A, T> {
    fn fill_candidates<D>(&mut self, solver_scope: &mut SolverScope<TrainingSchedule, D>)
    where
        D: ScoreDirector<TrainingSchedule>,
    {
        self.candidates.clear();
        let (director, rng) = solver_scope.director_and_rng_mut();
        let schedule = director.working_solution();
        self.candidates.extend(self.sampler.sample(schedule, rng));
        if self.candidates.is_empty() {
            self.candidates.extend(all_moves(schedule));
        }
    }
}

impl<A, T, D> Phase<TrainingSchedule, D> for LocalSearchPhase<A, T>
where
    A: Acceptor<TrainingSchedule>,
    T: Termination<TrainingSchedule, D>,
    D: ScoreDirector<TrainingSchedule>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<TrainingSchedule, D>) {
        let mut phase_scope = PhaseScope::new(solver_scope, 1);
        info!(event = "phase_start", phase = self.name, phase_index = 1);

        let mut last_step_score = phase_scope.calculate_score();
        self.acceptor.phase_started(&last_step_score);
        self.tabu.clear();

        let mut last_progress_time = Instant::now();
        let mut last_progress_moves = phase_scope.solver_scope().moves_evaluated();

        loop {
            let solver = phase_scope.solver_scope();
            if solver.is_terminate_early() || self.termination.is_terminated(solver) {
                break;
            }

            self.fill_candidates(phase_scope.solver_scope_mut());
            if self.candidates.is_empty() {
                debug!(event = "no_moves", phase = self.name);
                break;
            }

            let best_score = phase_scope.solver_scope().best_score().copied();
            let mut picked: Option<(usize, HardSoftScore)> = None;

            for (idx, candidate) in self.candidates.iter().enumerate() {
                let scope = phase_scope.solver_scope_mut();
                let Some(move_score) = candidate.evaluate(scope.score_director_mut()) else {
                    continue;
                };
                scope.increment_moves_evaluated();

                let aspiration = best_score.is_some_and(|best| move_score > best);
                if !aspiration && self.tabu.is_tabu(candidate) {
                    continue;
                }
                if !self
                    .acceptor
                    .is_accepted(&last_step_score, &move_score, scope.rng())
                {
                    continue;
                }
                let improves_pick = match picked {
                    Some((_, picked_score)) => move_score > picked_score,
                    None => true,
                };
                if improves_pick {
                    picked = Some((idx, move_score));
                }
            }

            let step = phase_scope.increment_step_count();
            if let Some((idx, _)) = picked {
                let step_move = self.candidates[idx];
                if let Some(undo) = step_move.do_move(phase_scope.score_director_mut()) {
                    self.tabu.record(undo);
                }
                last_step_score = phase_scope.calculate_score();
                phase_scope.update_best_solution();
                trace!(
                    event = "step",
                    step = step,
                    step_move = %step_move,
                    score = %last_step_score,
                    accepted = true,
                );
            } else {
                trace!(event = "step", step = step, accepted = false);
            }
            self.acceptor.step_ended(&last_step_score);

            if last_progress_time.elapsed().as_secs() >= 1 {
                let moves_evaluated = phase_scope.solver_scope().moves_evaluated();
                let elapsed_secs = last_progress_time.elapsed().as_secs_f64();
                let speed = ((moves_evaluated - last_progress_moves) as f64 / elapsed_secs) as u64;
                let best = phase_scope
                    .solver_scope()
                    .best_score()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                debug!(
                    event = "progress",
                    steps = phase_scope.step_count(),
                    speed = speed,
                    score = best,
                );
                last_progress_time = Instant::now();
                last_progress_moves = moves_evaluated;
            }
        }

        let score = phase_scope
            .solver_scope()
            .best_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        info!(
            event = "phase_end",
            phase = self.name,
            phase_index = 1,
            duration_ms = phase_scope.elapsed().as_millis() as u64,
            steps = phase_scope.step_count(),
            speed = phase_scope.speed(),
            score = score,
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
