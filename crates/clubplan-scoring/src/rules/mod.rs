//! The training scheduling rules.
//!
//! Fourteen rules built from the three incremental shapes in
//! [`crate::constraint`]. Hard rules make a schedule infeasible; soft rules
//! rank feasible schedules.

use clubplan_core::{
    ConstraintRef, HardSoftScore, ImpactType, TrainingSchedule, Weekday, CONSTRAINT_PACKAGE,
};

use crate::api::analysis::ScoreExplanation;
use crate::api::constraint_set::ConstraintSet;
use crate::constraint::{SessionGroupConstraint, SessionPairConstraint, SessionUniConstraint};


pub const TEAM_SLOT_AVAILABILITY: &str = "Team slot availability";
pub const TRAINER_QUALIFICATION: &str = "Trainer qualification";
pub const TRAINER_CONFLICT: &str = "Trainer conflict";
pub const TEAM_CONFLICT: &str = "Team conflict";
pub const TEAM_SEPARATE_DAYS: &str = "Team separate days";
pub const FIELD_CAPACITY: &str = "Field capacity";
pub const TRAINER_MAX_HOURS: &str = "Trainer max hours";
pub const TRAINER_MAX_PER_DAY: &str = "Trainer max 3 per day";
pub const UNASSIGNED_SESSION: &str = "Unassigned session";
pub const TEAM_NON_CONSECUTIVE_DAYS: &str = "Team non-consecutive days";
pub const YOUNGEST_TEAMS_FIRST: &str = "Youngest teams first";
pub const TRAINER_NO_GAPS: &str = "Trainer no gaps";
pub const TRAINER_CONSISTENCY: &str = "Trainer consistency";
pub const TRAINER_PREFERRED_TEAM: &str = "Trainer preferred team";

/// Sessions a trainer may run on one day before the excess is penalized.
pub const MAX_SESSIONS_PER_TRAINER_DAY: i64 = 3;

/// Teams whose oldest age is below this prefer early slots.
pub const YOUTH_AGE_CEILING: i64 = 20;

// ============================================================================
// Type alias for the constraint tuple
// ============================================================================

/// All rules as a typed tuple.
///
/// HARD:
/// 1. Team slot availability
/// 2. Trainer qualification
/// 3. Trainer conflict
/// 4. Team conflict
/// 5. Team separate days
/// 6. Field capacity
/// 7. Trainer max hours
/// 8. Trainer max 3 per day
/// 9. Unassigned session
///
/// SOFT:
/// 10. Team non-consecutive days
/// 11. Youngest teams first
/// 12. Trainer no gaps
/// 13. Trainer consistency
/// 14. Trainer preferred team (reward)
pub type ClubConstraints = (
    SessionUniConstraint,
    SessionUniConstraint,
    SessionPairConstraint<(usize, usize)>,
    SessionPairConstraint<(usize, usize)>,
    SessionPairConstraint<usize>,
    SessionGroupConstraint<usize>,
    SessionGroupConstraint<usize>,
    SessionGroupConstraint<(usize, Weekday)>,
    SessionUniConstraint,
    SessionPairConstraint<usize>,
    SessionUniConstraint,
    SessionGroupConstraint<(usize, Weekday)>,
    SessionPairConstraint<usize>,
    SessionUniConstraint,
);

/// Creates all rules with empty incremental state.
pub fn create_constraints() -> ClubConstraints {
    (
        team_slot_availability(),
        trainer_qualification(),
        trainer_conflict(),
        team_conflict(),
        team_separate_days(),
        field_capacity(),
        trainer_max_hours(),
        trainer_max_per_day(),
        unassigned_session(),
        team_non_consecutive_days(),
        youngest_teams_first(),
        trainer_no_gaps(),
        trainer_consistency(),
        trainer_preferred_team(),
    )
}

/// Full, non-incremental score of a schedule.
pub fn score_schedule(schedule: &TrainingSchedule) -> HardSoftScore {
    create_constraints().evaluate_all(schedule)
}

/// Full score with every rule's matches.
pub fn explain_schedule(schedule: &TrainingSchedule) -> ScoreExplanation<HardSoftScore> {
    let analyses = create_constraints().evaluate_detailed(schedule);
    let score = analyses.iter().map(|a| a.score).sum();
    ScoreExplanation::new(score, analyses)
}

// ============================================================================
// Helper functions
// ============================================================================

fn rule(name: &str) -> ConstraintRef {
    ConstraintRef::new(CONSTRAINT_PACKAGE, name)
}

#[inline]
fn day_of(s: &TrainingSchedule, idx: usize) -> Option<Weekday> {
    s.session_slot(idx).map(|slot| slot.day_of_week)
}

#[inline]
fn team_key(s: &TrainingSchedule, idx: usize) -> Option<usize> {
    Some(s.sessions[idx].team)
}

#[inline]
fn trainer_day_key(s: &TrainingSchedule, idx: usize) -> Option<(usize, Weekday)> {
    Some((s.sessions[idx].trainer?, day_of(s, idx)?))
}

// ============================================================================
// HARD: Team slot availability
// ============================================================================

/// Session slot outside the team's days or hour window.
fn team_slot_availability() -> SessionUniConstraint {
    SessionUniConstraint::new(
        rule(TEAM_SLOT_AVAILABILITY),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| {
            let team = s.session_team(idx);
            i64::from(s.session_slot(idx).is_some_and(|slot| !team.accepts(slot)))
        },
    )
}

// ============================================================================
// HARD: Trainer qualification
// ============================================================================

fn trainer_qualification() -> SessionUniConstraint {
    SessionUniConstraint::new(
        rule(TRAINER_QUALIFICATION),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| {
            let group = s.session_team(idx).age_group;
            i64::from(s.session_trainer(idx).is_some_and(|t| !t.can_train(group)))
        },
    )
}

// ============================================================================
// HARD: Trainer conflict
// ============================================================================

/// Same trainer, same slot.
fn trainer_conflict() -> SessionPairConstraint<(usize, usize)> {
    SessionPairConstraint::new(
        rule(TRAINER_CONFLICT),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| {
            let session = &s.sessions[idx];
            Some((session.trainer?, session.time_slot?))
        },
        |_, _, _| true,
    )
}

// ============================================================================
// HARD: Team conflict
// ============================================================================

/// Same team, same slot.
fn team_conflict() -> SessionPairConstraint<(usize, usize)> {
    SessionPairConstraint::new(
        rule(TEAM_CONFLICT),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| {
            let session = &s.sessions[idx];
            Some((session.team, session.time_slot?))
        },
        |_, _, _| true,
    )
}

// ============================================================================
// HARD: Team separate days
// ============================================================================

/// Same team, same weekday, whatever the hour.
fn team_separate_days() -> SessionPairConstraint<usize> {
    SessionPairConstraint::new(
        rule(TEAM_SEPARATE_DAYS),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        team_key,
        |s, a, b| day_of(s, a).is_some() && day_of(s, a) == day_of(s, b),
    )
}

// ============================================================================
// HARD: Field capacity
// ============================================================================

/// Players on the field in one slot beyond the configured capacity.
fn field_capacity() -> SessionGroupConstraint<usize> {
    SessionGroupConstraint::new(
        rule(FIELD_CAPACITY),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| s.sessions[idx].time_slot,
        |s, _, members| {
            let Some(capacity) = s.field_capacity() else {
                return 0;
            };
            let players: i64 = members
                .iter()
                .map(|&idx| i64::from(s.session_team(idx).size))
                .sum();
            (players - i64::from(capacity)).max(0)
        },
    )
}

// ============================================================================
// HARD: Trainer max hours
// ============================================================================

fn trainer_max_hours() -> SessionGroupConstraint<usize> {
    SessionGroupConstraint::new(
        rule(TRAINER_MAX_HOURS),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| s.sessions[idx].trainer,
        |s, &trainer, members| {
            let limit = i64::from(s.trainers[trainer].max_hours_per_week);
            (members.len() as i64 - limit).max(0)
        },
    )
}

// ============================================================================
// HARD: Trainer max 3 per day
// ============================================================================

fn trainer_max_per_day() -> SessionGroupConstraint<(usize, Weekday)> {
    SessionGroupConstraint::new(
        rule(TRAINER_MAX_PER_DAY),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        trainer_day_key,
        |_, _, members| (members.len() as i64 - MAX_SESSIONS_PER_TRAINER_DAY).max(0),
    )
}

// ============================================================================
// HARD: Unassigned session
// ============================================================================

/// One hard point per missing time slot or trainer.
fn unassigned_session() -> SessionUniConstraint {
    SessionUniConstraint::new(
        rule(UNASSIGNED_SESSION),
        ImpactType::Penalty,
        HardSoftScore::ONE_HARD,
        |s, idx| s.sessions[idx].missing_variable_count() as i64,
    )
    .including_unassigned()
}

// ============================================================================
// SOFT: Team non-consecutive days
// ============================================================================

/// Two trainings of a team on neighbouring days, Sunday next to Monday.
fn team_non_consecutive_days() -> SessionPairConstraint<usize> {
    SessionPairConstraint::new(
        rule(TEAM_NON_CONSECUTIVE_DAYS),
        ImpactType::Penalty,
        HardSoftScore::of_soft(3),
        team_key,
        |s, a, b| match (day_of(s, a), day_of(s, b)) {
            (Some(x), Some(y)) => x.is_adjacent_to(y),
            _ => false,
        },
    )
}

// ============================================================================
// SOFT: Youngest teams first
// ============================================================================

/// Younger teams lose more for every hour past their earliest start.
fn youngest_teams_first() -> SessionUniConstraint {
    SessionUniConstraint::new(
        rule(YOUNGEST_TEAMS_FIRST),
        ImpactType::Penalty,
        HardSoftScore::ONE_SOFT,
        |s, idx| {
            let Some(slot) = s.session_slot(idx) else {
                return 0;
            };
            let team = s.session_team(idx);
            let youth = (YOUTH_AGE_CEILING - team.age_group.max_age()).max(0);
            let lateness = (i64::from(slot.start_hour) - i64::from(team.earliest_hour)).max(0);
            youth * lateness
        },
    )
}

// ============================================================================
// SOFT: Trainer no gaps
// ============================================================================

/// Idle hours between a trainer's first and last session of a day.
fn trainer_no_gaps() -> SessionGroupConstraint<(usize, Weekday)> {
    SessionGroupConstraint::new(
        rule(TRAINER_NO_GAPS),
        ImpactType::Penalty,
        HardSoftScore::of_soft(4),
        trainer_day_key,
        |s, _, members| {
            let hours = || {
                members
                    .iter()
                    .filter_map(|&idx| s.session_slot(idx))
                    .map(|slot| i64::from(slot.start_hour))
            };
            let (Some(first), Some(last)) = (hours().min(), hours().max()) else {
                return 0;
            };
            let span = last - first + 1;
            (span - members.len() as i64).max(0)
        },
    )
}

// ============================================================================
// SOFT: Trainer consistency
// ============================================================================

/// Two sessions of one team run by different trainers.
fn trainer_consistency() -> SessionPairConstraint<usize> {
    SessionPairConstraint::new(
        rule(TRAINER_CONSISTENCY),
        ImpactType::Penalty,
        HardSoftScore::ONE_SOFT,
        team_key,
        |s, a, b| s.sessions[a].trainer != s.sessions[b].trainer,
    )
}

// ============================================================================
// SOFT: Trainer preferred team
// ============================================================================

fn trainer_preferred_team() -> SessionUniConstraint {
    SessionUniConstraint::new(
        rule(TRAINER_PREFERRED_TEAM),
        ImpactType::Reward,
        HardSoftScore::of_soft(5),
        |s, idx| {
            let team = s.session_team(idx);
            i64::from(s.session_trainer(idx).is_some_and(|t| t.prefers(team)))
        },
    )
}
