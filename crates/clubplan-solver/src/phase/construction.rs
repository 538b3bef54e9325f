//! Initial assignment of training sessions.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use clubplan_core::TrainingSchedule;
use clubplan_scoring::ScoreDirector;

use super::Phase;
use crate::scope::{PhaseScope, SolverScope};

/// Picks a (time slot, trainer) pair for one session.
///
/// The slot is drawn from the slots the team accepts, preferring days the
/// team has no session on yet, and falls back to any slot. The trainer is
/// drawn from trainers qualified for the team's age group and falls back to
/// any trainer. Returns `None` when there are no slots or no trainers at
/// all; the result does not need to be feasible.
pub fn place_session(
    schedule: &TrainingSchedule,
    session_idx: usize,
    rng: &mut ChaCha8Rng,
) -> Option<(usize, usize)> {
    if schedule.time_slots.is_empty() || schedule.trainers.is_empty() {
        return None;
    }

    let team_idx = schedule.sessions[session_idx].team;
    let team = &schedule.teams[team_idx];

    let used_days: Vec<_> = schedule
        .sessions
        .iter()
        .enumerate()
        .filter(|(idx, s)| *idx != session_idx && s.team == team_idx)
        .filter_map(|(_, s)| s.time_slot)
        .map(|slot| schedule.time_slots[slot].day_of_week)
        .collect();

    let accepted: Vec<usize> = (0..schedule.time_slots.len())
        .filter(|&slot| team.accepts(&schedule.time_slots[slot]))
        .collect();
    let fresh_day: Vec<usize> = accepted
        .iter()
        .copied()
        .filter(|&slot| !used_days.contains(&schedule.time_slots[slot].day_of_week))
        .collect();

    let time_slot = if !fresh_day.is_empty() {
        fresh_day[rng.random_range(0..fresh_day.len())]
    } else if !accepted.is_empty() {
        accepted[rng.random_range(0..accepted.len())]
    } else {
        rng.random_range(0..schedule.time_slots.len())
    };

    let qualified: Vec<usize> = (0..schedule.trainers.len())
        .filter(|&t| schedule.trainers[t].can_train(team.age_group))
        .collect();
    let trainer = if qualified.is_empty() {
        rng.random_range(0..schedule.trainers.len())
    } else {
        qualified[rng.random_range(0..qualified.len())]
    };

    Some((time_slot, trainer))
}

/// Assigns every unassigned session of `schedule` without scoring it.
///
/// Deterministic for a given seed. Sessions that already have both
/// variables keep them. A session that cannot be placed ends with neither
/// variable set.
pub fn construct_schedule(mut schedule: TrainingSchedule, seed: u64) -> TrainingSchedule {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for idx in 0..schedule.sessions.len() {
        if schedule.sessions[idx].is_assigned() {
            continue;
        }
        let placement = place_session(&schedule, idx, &mut rng);
        let session = &mut schedule.sessions[idx];
        match placement {
            Some((time_slot, trainer)) => {
                session.time_slot = Some(time_slot);
                session.trainer = Some(trainer);
            }
            None => session.clear(),
        }
    }
    schedule
}

/// Construction phase: places every session that is not fully assigned,
/// through the score director so incremental scoring stays in sync.
/// Sessions that cannot be placed are left with neither variable set.
///
/// Records the result as the first best solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructionPhase;

impl ConstructionPhase {
    const NAME: &'static str = "Construction Heuristic";
}

impl<D: ScoreDirector<TrainingSchedule>> Phase<TrainingSchedule, D> for ConstructionPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<TrainingSchedule, D>) {
        let mut phase_scope = PhaseScope::new(solver_scope, 0);
        info!(event = "phase_start", phase = Self::NAME, phase_index = 0);

        let session_count = phase_scope.solver_scope().working_solution().sessions.len();
        let mut placed = 0u64;

        for idx in 0..session_count {
            if phase_scope.solver_scope().is_terminate_early() {
                break;
            }
            let (director, rng) = phase_scope.solver_scope_mut().director_and_rng_mut();
            if director.working_solution().sessions[idx].is_assigned() {
                continue;
            }
            let Some((time_slot, trainer)) = place_session(director.working_solution(), idx, rng)
            else {
                if director.working_solution().sessions[idx].is_half_assigned() {
                    director.before_variable_changed(idx);
                    director.working_solution_mut().sessions[idx].clear();
                    director.after_variable_changed(idx);
                }
                continue;
            };

            director.before_variable_changed(idx);
            let session = &mut director.working_solution_mut().sessions[idx];
            session.time_slot = Some(time_slot);
            session.trainer = Some(trainer);
            director.after_variable_changed(idx);
            placed += 1;
        }

        phase_scope.update_best_solution();

        let duration = phase_scope.elapsed();
        let speed = if duration.as_secs_f64() > 0.0 {
            (placed as f64 / duration.as_secs_f64()) as u64
        } else {
            0
        };
        let score = phase_scope
            .solver_scope()
            .best_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());

        info!(
            event = "phase_end",
            phase = Self::NAME,
            phase_index = 0,
            duration_ms = duration.as_millis() as u64,
            steps = placed,
            speed = speed,
            score = score,
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
