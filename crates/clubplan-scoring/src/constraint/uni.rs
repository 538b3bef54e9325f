//! Per-session rule shape.

use std::collections::HashMap;

use clubplan_core::{ConstraintRef, HardSoftScore, ImpactType, TrainingSchedule};

use super::{impact, is_assigned, session_ref};
use crate::api::analysis::{ConstraintJustification, DetailedConstraintMatch};
use crate::api::constraint_set::IncrementalConstraint;

/// Match weight of one session; 0 means no match.
pub type SessionWeigher = fn(&TrainingSchedule, usize) -> i64;

/// Scores each session on its own.
///
/// Only fully assigned sessions are weighed unless the rule is built with
/// [`SessionUniConstraint::including_unassigned`].
///
/// # Example
///
/// ```
/// use clubplan_core::{AgeGroup, ConstraintRef, HardSoftScore, ImpactType, Weekday};
/// use clubplan_scoring::{IncrementalConstraint, SessionUniConstraint};
/// use clubplan_test::{slot, team, trainer, ScheduleBuilder};
///
/// let late = SessionUniConstraint::new(
///     ConstraintRef::new("", "Late"),
///     ImpactType::Penalty,
///     HardSoftScore::ONE_SOFT,
///     |s, idx| i64::from(s.session_slot(idx).is_some_and(|t| t.start_hour >= 19)),
/// );
///
/// let schedule = ScheduleBuilder::new(60)
///     .trainer(trainer("ann", 4, &[AgeGroup::U8]))
///     .team(team("u8a", AgeGroup::U8, 12, 2, &[Weekday::Monday], (17, 20)))
///     .slot(slot(Weekday::Monday, 17))
///     .slot(slot(Weekday::Monday, 19))
///     .assign(0, 0, 0)
///     .assign(1, 1, 0)
///     .build();
///
/// assert_eq!(late.evaluate(&schedule), HardSoftScore::of_soft(-1));
/// ```
pub struct SessionUniConstraint {
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    weight: HardSoftScore,
    weigher: SessionWeigher,
    include_unassigned: bool,
    /// Session index -> match weight at insertion.
    matched: HashMap<usize, i64>,
}

impl SessionUniConstraint {
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        weight: HardSoftScore,
        weigher: SessionWeigher,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            weight,
            weigher,
            include_unassigned: false,
            matched: HashMap::new(),
        }
    }

    /// Also weighs sessions that are missing a time slot or a trainer.
    pub fn including_unassigned(mut self) -> Self {
        self.include_unassigned = true;
        self
    }

    fn weigh(&self, solution: &TrainingSchedule, idx: usize) -> i64 {
        if self.include_unassigned || is_assigned(solution, idx) {
            (self.weigher)(solution, idx)
        } else {
            0
        }
    }
}

impl IncrementalConstraint<TrainingSchedule, HardSoftScore> for SessionUniConstraint {
    fn evaluate(&self, solution: &TrainingSchedule) -> HardSoftScore {
        let total: i64 = (0..solution.sessions.len())
            .map(|idx| self.weigh(solution, idx))
            .sum();
        impact(self.weight, self.impact_type, total)
    }

    fn match_count(&self, solution: &TrainingSchedule) -> usize {
        (0..solution.sessions.len())
            .filter(|&idx| self.weigh(solution, idx) != 0)
            .count()
    }

    fn initialize(&mut self, solution: &TrainingSchedule) -> HardSoftScore {
        self.matched.clear();
        let mut score = HardSoftScore::ZERO;
        for idx in 0..solution.sessions.len() {
            score += self.on_insert(solution, idx);
        }
        score
    }

    fn on_insert(&mut self, solution: &TrainingSchedule, entity_index: usize) -> HardSoftScore {
        let amount = self.weigh(solution, entity_index);
        if amount == 0 {
            return HardSoftScore::ZERO;
        }
        self.matched.insert(entity_index, amount);
        impact(self.weight, self.impact_type, amount)
    }

    fn on_retract(&mut self, _solution: &TrainingSchedule, entity_index: usize) -> HardSoftScore {
        match self.matched.remove(&entity_index) {
            Some(amount) => -impact(self.weight, self.impact_type, amount),
            None => HardSoftScore::ZERO,
        }
    }

    fn reset(&mut self) {
        self.matched.clear();
    }

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn is_hard(&self) -> bool {
        self.weight.hard() != 0
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }

    fn get_matches(&self, solution: &TrainingSchedule) -> Vec<DetailedConstraintMatch<HardSoftScore>> {
        (0..solution.sessions.len())
            .filter_map(|idx| {
                let amount = self.weigh(solution, idx);
                (amount != 0).then(|| {
                    DetailedConstraintMatch::new(
                        self.constraint_ref.clone(),
                        impact(self.weight, self.impact_type, amount),
                        ConstraintJustification::new(vec![session_ref(solution, idx)]),
                    )
                })
            })
            .collect()
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }
}
