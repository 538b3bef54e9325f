//! Solve requests: the facts a caller supplies for one solve.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::facts::{FieldConfig, Team, TimeSlot, Trainer};
use super::schedule::{TrainingSchedule, TrainingSession};
use crate::error::{ClubPlanError, Result};

/// Id of the single field config derived from a request.
pub const FIELD_CONFIG_ID: &str = "field";

/// Input dataset for one solve.
///
/// # Example
///
/// ```
/// use clubplan_core::{AgeGroup, SolveRequest, Team, TimeSlot, Trainer, Weekday};
///
/// let request = SolveRequest {
///     trainers: vec![Trainer::new("t1", "Ann", 4).with_age_groups([AgeGroup::U8])],
///     teams: vec![Team::new("u8a", "U8 A", AgeGroup::U8, 12, 2)],
///     time_slots: vec![TimeSlot::new("mon-17", Weekday::Monday, 17)],
///     field_capacity: 60,
/// };
///
/// let schedule = request.into_schedule();
/// assert_eq!(schedule.sessions.len(), 2);
/// assert_eq!(schedule.sessions[1].id, "session-2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    #[serde(default)]
    pub trainers: Vec<Trainer>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    pub field_capacity: u32,
}

impl SolveRequest {
    /// Builds the unassigned schedule: one session per required training.
    ///
    /// Never fails. Problems in the facts show up as hard score later.
    pub fn into_schedule(self) -> TrainingSchedule {
        let mut sessions = Vec::new();
        let mut counter = 0usize;
        for (team_idx, team) in self.teams.iter().enumerate() {
            for _ in 0..team.trainings_per_week {
                counter += 1;
                sessions.push(TrainingSession::new(format!("session-{counter}"), team_idx));
            }
        }

        TrainingSchedule::new(
            self.trainers,
            self.teams,
            self.time_slots,
            vec![FieldConfig::new(FIELD_CONFIG_ID, self.field_capacity)],
            sessions,
        )
    }

    /// Lists structural problems that make a feasible schedule unlikely.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.teams.is_empty() {
            issues.push("no teams".to_string());
        }
        if self.trainers.is_empty() {
            issues.push("no trainers".to_string());
        }
        if self.time_slots.is_empty() {
            issues.push("no time slots".to_string());
        }

        for team in &self.teams {
            if team.available_days.is_empty() {
                issues.push(format!("team {} has no available days", team.id));
            }
            if team.earliest_hour >= team.latest_hour {
                issues.push(format!(
                    "team {} has an empty hour window {}..{}",
                    team.id, team.earliest_hour, team.latest_hour
                ));
            }
            if !self.trainers.iter().any(|t| t.can_train(team.age_group)) {
                issues.push(format!(
                    "no trainer is qualified for team {} ({})",
                    team.id, team.age_group
                ));
            }
        }

        push_duplicates(&mut issues, "trainer", self.trainers.iter().map(|t| &t.id));
        push_duplicates(&mut issues, "team", self.teams.iter().map(|t| &t.id));
        push_duplicates(&mut issues, "time slot", self.time_slots.iter().map(|t| &t.id));

        issues
    }

    /// Rejects requests with any structural issue.
    pub fn validate(&self) -> Result<()> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ClubPlanError::InvalidInput(issues.join("; ")))
        }
    }

    pub fn session_count(&self) -> usize {
        self.teams.iter().map(|t| t.trainings_per_week as usize).sum()
    }
}

fn push_duplicates<'a>(
    issues: &mut Vec<String>,
    kind: &str,
    ids: impl Iterator<Item = &'a String>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(format!("duplicate {kind} id {id}"));
        }
    }
}
