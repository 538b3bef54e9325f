//! The assignment model: sessions and the schedule aggregate.

use serde::{Deserialize, Serialize};

use super::facts::{FieldConfig, Team, TimeSlot, Trainer};
use super::traits::PlanningSolution;
use crate::score::HardSoftScore;

/// Lifecycle state of a solve, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    #[default]
    NotSolving,
    SolvingScheduled,
    SolvingActive,
    /// The solver faulted; the job holds an error instead of a result.
    Failed,
}

impl SolverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStatus::NotSolving => "NOT_SOLVING",
            SolverStatus::SolvingScheduled => "SOLVING_SCHEDULED",
            SolverStatus::SolvingActive => "SOLVING_ACTIVE",
            SolverStatus::Failed => "FAILED",
        }
    }

    pub fn is_solving(&self) -> bool {
        matches!(self, SolverStatus::SolvingScheduled | SolverStatus::SolvingActive)
    }
}

/// A single weekly training of one team.
///
/// `team` is fixed at creation. `time_slot` and `trainer` index into the
/// owning schedule's `time_slots` and `trainers`; `None` means unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: String,
    pub team: usize,
    pub time_slot: Option<usize>,
    pub trainer: Option<usize>,
}

impl TrainingSession {
    pub fn new(id: impl Into<String>, team: usize) -> Self {
        Self {
            id: id.into(),
            team,
            time_slot: None,
            trainer: None,
        }
    }

    pub fn with_assignment(mut self, time_slot: usize, trainer: usize) -> Self {
        self.time_slot = Some(time_slot);
        self.trainer = Some(trainer);
        self
    }

    /// Both variables set.
    pub fn is_assigned(&self) -> bool {
        self.time_slot.is_some() && self.trainer.is_some()
    }

    /// Exactly one variable set.
    pub fn is_half_assigned(&self) -> bool {
        self.time_slot.is_some() != self.trainer.is_some()
    }

    /// Number of unset variables, 0 to 2.
    pub fn missing_variable_count(&self) -> usize {
        usize::from(self.time_slot.is_none()) + usize::from(self.trainer.is_none())
    }

    pub fn clear(&mut self) {
        self.time_slot = None;
        self.trainer = None;
    }
}

/// A problem instance and its current assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSchedule {
    pub trainers: Vec<Trainer>,
    pub teams: Vec<Team>,
    pub time_slots: Vec<TimeSlot>,
    pub field_configs: Vec<FieldConfig>,
    pub sessions: Vec<TrainingSession>,
    #[serde(default)]
    pub score: Option<HardSoftScore>,
    #[serde(default)]
    pub solver_status: SolverStatus,
}

impl TrainingSchedule {
    pub fn new(
        trainers: Vec<Trainer>,
        teams: Vec<Team>,
        time_slots: Vec<TimeSlot>,
        field_configs: Vec<FieldConfig>,
        sessions: Vec<TrainingSession>,
    ) -> Self {
        Self {
            trainers,
            teams,
            time_slots,
            field_configs,
            sessions,
            score: None,
            solver_status: SolverStatus::NotSolving,
        }
    }

    /// Capacity of the shared field, if one is configured.
    pub fn field_capacity(&self) -> Option<u32> {
        self.field_configs.first().map(|f| f.capacity)
    }

    pub fn session_team(&self, session_idx: usize) -> &Team {
        &self.teams[self.sessions[session_idx].team]
    }

    pub fn session_slot(&self, session_idx: usize) -> Option<&TimeSlot> {
        self.sessions[session_idx]
            .time_slot
            .map(|slot| &self.time_slots[slot])
    }

    pub fn session_trainer(&self, session_idx: usize) -> Option<&Trainer> {
        self.sessions[session_idx]
            .trainer
            .map(|trainer| &self.trainers[trainer])
    }

    pub fn assigned_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_assigned()).count()
    }

    pub fn unassigned_count(&self) -> usize {
        self.sessions.len() - self.assigned_count()
    }

    /// Number of unset planning variables across all sessions.
    pub fn unassigned_variable_count(&self) -> usize {
        self.sessions
            .iter()
            .map(TrainingSession::missing_variable_count)
            .sum()
    }

    /// Checks that every session points inside the fact arrays.
    pub fn dangling_reference(&self) -> Option<String> {
        self.sessions.iter().find_map(|s| {
            if s.team >= self.teams.len() {
                Some(format!("session {} references team #{}", s.id, s.team))
            } else if s.time_slot.is_some_and(|t| t >= self.time_slots.len()) {
                Some(format!("session {} references a missing time slot", s.id))
            } else if s.trainer.is_some_and(|t| t >= self.trainers.len()) {
                Some(format!("session {} references a missing trainer", s.id))
            } else {
                None
            }
        })
    }
}

impl PlanningSolution for TrainingSchedule {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.sessions.iter().all(TrainingSession::is_assigned)
    }
}
