//! Moves over training sessions.

use std::fmt;

use clubplan_core::{HardSoftScore, TrainingSchedule};
use clubplan_scoring::ScoreDirector;

/// An atomic, reversible change to the assignment of one or two sessions.
///
/// Moves are plain values holding indices into the schedule. Applying one
/// goes through the score director's before/after notifications, so the
/// incremental score stays in step with the working solution.
///
/// Change moves only apply to sessions that already have both variables,
/// which keeps a session either fully assigned or fully unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingMove {
    ChangeTimeSlot { session: usize, time_slot: usize },
    ChangeTrainer { session: usize, trainer: usize },
    /// Exchanges the (time slot, trainer) pairs of two sessions; `a < b`.
    Swap { a: usize, b: usize },
}

impl TrainingMove {
    pub fn change_time_slot(session: usize, time_slot: usize) -> Self {
        TrainingMove::ChangeTimeSlot { session, time_slot }
    }

    pub fn change_trainer(session: usize, trainer: usize) -> Self {
        TrainingMove::ChangeTrainer { session, trainer }
    }

    /// A swap with its session indices in canonical order.
    pub fn swap(a: usize, b: usize) -> Self {
        TrainingMove::Swap {
            a: a.min(b),
            b: a.max(b),
        }
    }

    /// Returns true if applying the move would change the schedule.
    pub fn is_doable(&self, schedule: &TrainingSchedule) -> bool {
        let sessions = &schedule.sessions;
        match *self {
            TrainingMove::ChangeTimeSlot { session, time_slot } => {
                time_slot < schedule.time_slots.len()
                    && sessions
                        .get(session)
                        .is_some_and(|s| s.is_assigned() && s.time_slot != Some(time_slot))
            }
            TrainingMove::ChangeTrainer { session, trainer } => {
                trainer < schedule.trainers.len()
                    && sessions
                        .get(session)
                        .is_some_and(|s| s.is_assigned() && s.trainer != Some(trainer))
            }
            TrainingMove::Swap { a, b } => match (sessions.get(a), sessions.get(b)) {
                (Some(first), Some(second)) => {
                    a != b
                        && (first.time_slot, first.trainer) != (second.time_slot, second.trainer)
                }
                _ => false,
            },
        }
    }

    /// Sessions whose variables this move writes.
    pub fn sessions(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match *self {
            TrainingMove::ChangeTimeSlot { session, .. }
            | TrainingMove::ChangeTrainer { session, .. } => (session, None),
            TrainingMove::Swap { a, b } => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// Applies the move and returns the move that undoes it.
    ///
    /// Returns `None` without touching the schedule when the move is not
    /// doable.
    pub fn do_move<D>(&self, director: &mut D) -> Option<TrainingMove>
    where
        D: ScoreDirector<TrainingSchedule> + ?Sized,
    {
        if !self.is_doable(director.working_solution()) {
            return None;
        }

        match *self {
            TrainingMove::ChangeTimeSlot { session, time_slot } => {
                let previous = director.working_solution().sessions[session].time_slot?;
                director.before_variable_changed(session);
                director.working_solution_mut().sessions[session].time_slot = Some(time_slot);
                director.after_variable_changed(session);
                Some(TrainingMove::change_time_slot(session, previous))
            }
            TrainingMove::ChangeTrainer { session, trainer } => {
                let previous = director.working_solution().sessions[session].trainer?;
                director.before_variable_changed(session);
                director.working_solution_mut().sessions[session].trainer = Some(trainer);
                director.after_variable_changed(session);
                Some(TrainingMove::change_trainer(session, previous))
            }
            TrainingMove::Swap { a, b } => {
                director.before_variable_changed(a);
                director.before_variable_changed(b);
                let sessions = &mut director.working_solution_mut().sessions;
                let (slot, trainer) = (sessions[a].time_slot, sessions[a].trainer);
                sessions[a].time_slot = sessions[b].time_slot;
                sessions[a].trainer = sessions[b].trainer;
                sessions[b].time_slot = slot;
                sessions[b].trainer = trainer;
                director.after_variable_changed(a);
                director.after_variable_changed(b);
                Some(*self)
            }
        }
    }

    /// Score the schedule would have after this move.
    ///
    /// The move is applied, scored and undone, so the working solution is
    /// unchanged afterwards.
    pub fn evaluate<D>(&self, director: &mut D) -> Option<HardSoftScore>
    where
        D: ScoreDirector<TrainingSchedule> + ?Sized,
    {
        let undo = self.do_move(director)?;
        let score = director.calculate_score();
        undo.do_move(director);
        Some(score)
    }

    /// Change in score this move would cause.
    pub fn score_delta<D>(&self, director: &mut D) -> Option<HardSoftScore>
    where
        D: ScoreDirector<TrainingSchedule> + ?Sized,
    {
        let before = director.calculate_score();
        self.evaluate(director).map(|after| after - before)
    }
}

impl fmt::Display for TrainingMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingMove::ChangeTimeSlot { session, time_slot } => {
                write!(f, "session #{session} -> slot #{time_slot}")
            }
            TrainingMove::ChangeTrainer { session, trainer } => {
                write!(f, "session #{session} -> trainer #{trainer}")
            }
            TrainingMove::Swap { a, b } => write!(f, "session #{a} <-> session #{b}"),
        }
    }
}
