//! Score and per-session reports for a schedule.
//!
//! Both reports are derived from a fresh [`explain_schedule`] pass, so they
//! do not depend on the score stored on the schedule.

use serde::{Deserialize, Serialize};

use clubplan_core::{HardSoftScore, ScoreLevel, TrainingSchedule};
use clubplan_scoring::rules::{
    FIELD_CAPACITY, MAX_SESSIONS_PER_TRAINER_DAY, TEAM_CONFLICT, TEAM_NON_CONSECUTIVE_DAYS,
    TEAM_SEPARATE_DAYS, TEAM_SLOT_AVAILABILITY, TRAINER_CONFLICT, TRAINER_CONSISTENCY,
    TRAINER_MAX_HOURS, TRAINER_MAX_PER_DAY, TRAINER_NO_GAPS, TRAINER_PREFERRED_TEAM,
    TRAINER_QUALIFICATION, UNASSIGNED_SESSION, YOUNGEST_TEAMS_FIRST,
};
use clubplan_scoring::explain_schedule;

/// Shown for a session variable that has no value.
pub const UNASSIGNED: &str = "Unassigned";

/// Total score and the rules that contribute to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnalysis {
    pub hard_score: i64,
    pub soft_score: i64,
    pub assigned_sessions: usize,
    pub unassigned_sessions: usize,
    pub total_sessions: usize,
    /// Rules with a non-zero score, in rule order.
    pub constraint_matches: Vec<ConstraintMatchInfo>,
}

/// One rule's share of the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintMatchInfo {
    pub name: String,
    pub package: String,
    /// Value on `level`: the hard part when it is non-zero, else the soft part.
    pub score: i64,
    pub match_count: usize,
    pub level: ScoreLevel,
}

/// Assignment of one session and the rule matches it takes part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalysis {
    pub session_id: String,
    pub team_name: String,
    pub trainer_name: String,
    pub time_slot_info: String,
    /// True when at least one match is a penalty.
    pub has_violations: bool,
    /// Sum of the level values of all matches.
    pub total_score: i64,
    pub violations: Vec<ViolationInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationInfo {
    pub constraint_name: String,
    pub level: ScoreLevel,
    pub score: i64,
    pub message: String,
}

fn level_value(score: HardSoftScore, level: ScoreLevel) -> i64 {
    match level {
        ScoreLevel::Hard => score.hard(),
        ScoreLevel::Soft => score.soft(),
    }
}

/// Builds the score report of `schedule`.
pub fn analyze_score(schedule: &TrainingSchedule) -> ScoreAnalysis {
    let explanation = explain_schedule(schedule);

    let constraint_matches = explanation
        .non_zero_constraints()
        .map(|analysis| {
            let level = analysis.level();
            ConstraintMatchInfo {
                name: analysis.constraint_ref.name.clone(),
                package: analysis.constraint_ref.package.clone(),
                score: level_value(analysis.score, level),
                match_count: analysis.match_count(),
                level,
            }
        })
        .collect();

    let assigned_sessions = schedule.assigned_count();
    ScoreAnalysis {
        hard_score: explanation.score.hard(),
        soft_score: explanation.score.soft(),
        assigned_sessions,
        unassigned_sessions: schedule.sessions.len() - assigned_sessions,
        total_sessions: schedule.sessions.len(),
        constraint_matches,
    }
}

/// Builds one report per session, in session order.
pub fn analyze_sessions(schedule: &TrainingSchedule) -> Vec<SessionAnalysis> {
    let indictments = explain_schedule(schedule).indictments();

    (0..schedule.sessions.len())
        .map(|idx| {
            let session = &schedule.sessions[idx];
            let mut violations = Vec::new();

            if let Some(indictment) = indictments.get(idx) {
                for constraint in indictment.violated_constraints() {
                    for m in &indictment.constraint_matches[constraint] {
                        let level = m.level();
                        violations.push(ViolationInfo {
                            constraint_name: constraint.name.clone(),
                            level,
                            score: level_value(m.score, level),
                            message: violation_message(schedule, idx, &constraint.name),
                        });
                    }
                }
            }

            SessionAnalysis {
                session_id: session.id.clone(),
                team_name: schedule.session_team(idx).name.clone(),
                trainer_name: schedule
                    .session_trainer(idx)
                    .map_or_else(|| UNASSIGNED.to_string(), |t| t.name.clone()),
                time_slot_info: schedule
                    .session_slot(idx)
                    .map_or_else(|| UNASSIGNED.to_string(), |slot| slot.to_string()),
                has_violations: violations.iter().any(|v| v.score < 0),
                total_score: violations.iter().map(|v| v.score).sum(),
                violations,
            }
        })
        .collect()
}

/// Human-readable reason a session matched the named rule.
pub fn violation_message(schedule: &TrainingSchedule, session_idx: usize, rule: &str) -> String {
    let team = schedule.session_team(session_idx);
    let trainer = schedule
        .session_trainer(session_idx)
        .map_or(UNASSIGNED, |t| t.name.as_str());
    let slot = schedule
        .session_slot(session_idx)
        .map_or_else(|| UNASSIGNED.to_string(), |s| s.to_string());
    let day = schedule
        .session_slot(session_idx)
        .map_or_else(|| UNASSIGNED.to_string(), |s| s.day_of_week.to_string());

    match rule {
        TEAM_SLOT_AVAILABILITY => format!(
            "Team {} is not available at {slot} (trains {}:00-{}:00)",
            team.name, team.earliest_hour, team.latest_hour
        ),
        TRAINER_QUALIFICATION => {
            format!("Trainer {trainer} is not qualified for {}", team.age_group)
        }
        TRAINER_CONFLICT => format!("Trainer {trainer} has another session at {slot}"),
        TEAM_CONFLICT => format!("Team {} has another session at {slot}", team.name),
        TEAM_SEPARATE_DAYS => format!("Team {} trains more than once on {day}", team.name),
        FIELD_CAPACITY => format!(
            "Too many players on the field at {slot} (capacity {})",
            schedule.field_capacity().unwrap_or_default()
        ),
        TRAINER_MAX_HOURS => {
            let max = schedule
                .session_trainer(session_idx)
                .map_or(0, |t| t.max_hours_per_week);
            format!("Trainer {trainer} exceeds max weekly hours ({max})")
        }
        TRAINER_MAX_PER_DAY => format!(
            "Trainer {trainer} has more than {MAX_SESSIONS_PER_TRAINER_DAY} sessions on {day}"
        ),
        UNASSIGNED_SESSION => {
            let session = &schedule.sessions[session_idx];
            let missing = match (session.time_slot, session.trainer) {
                (None, None) => "time slot or trainer",
                (None, Some(_)) => "time slot",
                _ => "trainer",
            };
            format!("Session {} of team {} has no {missing}", session.id, team.name)
        }
        TEAM_NON_CONSECUTIVE_DAYS => {
            format!("Team {} trains on consecutive days", team.name)
        }
        YOUNGEST_TEAMS_FIRST => format!(
            "{} team {} trains at {slot}, later than {}:00",
            team.age_group, team.name, team.earliest_hour
        ),
        TRAINER_NO_GAPS => format!("Trainer {trainer} has idle hours on {day}"),
        TRAINER_CONSISTENCY => format!("Team {} is trained by different trainers", team.name),
        TRAINER_PREFERRED_TEAM => format!("Trainer {trainer} trains preferred team {}", team.name),
        other => format!("Constraint: {other}"),
    }
}
