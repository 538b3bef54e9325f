//! Reusable incremental rule shapes over training sessions.
//!
//! Every scheduling rule is one of three shapes:
//! - [`SessionUniConstraint`]: a weight per session
//! - [`SessionPairConstraint`]: a match per unordered pair sharing a key
//! - [`SessionGroupConstraint`]: a weight per group of sessions sharing a key
//!
//! Sessions with a null time slot or trainer are never matched, except by a
//! per-session rule built with [`SessionUniConstraint::including_unassigned`].
//!
//! # Incremental protocol
//!
//! `on_retract(idx)` must run while session `idx` still holds the values it
//! had at `on_insert`, and `on_insert(idx)` after the change. The pair and
//! group shapes look up the old key's partners on retract, so mutating a
//! session before retracting it corrupts their index. Score directors do this
//! through `before_variable_changed` and `after_variable_changed`.

mod grouped;
mod pair;
mod uni;


pub use grouped::{GroupWeigher, SessionGroupConstraint};
pub use pair::{PairFilter, SessionPairConstraint};
pub use uni::{SessionUniConstraint, SessionWeigher};

use clubplan_core::{HardSoftScore, ImpactType, TrainingSchedule};

use crate::api::analysis::EntityRef;

/// Grouping key of an assigned session; `None` leaves it unmatched.
pub type SessionKey<K> = fn(&TrainingSchedule, usize) -> Option<K>;

#[inline]
pub(crate) fn is_assigned(solution: &TrainingSchedule, session_idx: usize) -> bool {
    solution
        .sessions
        .get(session_idx)
        .is_some_and(|s| s.is_assigned())
}

#[inline]
pub(crate) fn impact(weight: HardSoftScore, impact_type: ImpactType, amount: i64) -> HardSoftScore {
    weight.times(amount * impact_type.sign())
}

pub(crate) fn session_ref(solution: &TrainingSchedule, session_idx: usize) -> EntityRef {
    EntityRef::new(session_idx, solution.sessions[session_idx].id.clone())
}

pub(crate) fn assigned_sessions(solution: &TrainingSchedule) -> impl Iterator<Item = usize> + '_ {
    (0..solution.sessions.len()).filter(move |&idx| is_assigned(solution, idx))
}
