//! Grouping rule shape: an aggregate weight per group of sessions.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use clubplan_core::{ConstraintRef, HardSoftScore, ImpactType, TrainingSchedule};

use super::{assigned_sessions, impact, is_assigned, session_ref, SessionKey};
use crate::api::analysis::{ConstraintJustification, DetailedConstraintMatch};
use crate::api::constraint_set::IncrementalConstraint;

/// Weight of one group given its key and members; must be 0 for no members.
pub type GroupWeigher<K> = fn(&TrainingSchedule, &K, &[usize]) -> i64;

/// Groups assigned sessions by key and scores each group as a whole.
///
/// On insert and retract only the touched group is re-weighed; the delta is
/// the group's weight after the change minus its weight before.
///
/// The filter and weigher read the live solution, so a session must be
/// retracted before its variables change (see the module docs).
pub struct SessionGroupConstraint<K> {
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    weight: HardSoftScore,
    key_fn: SessionKey<K>,
    weigher: GroupWeigher<K>,
    /// Key -> member sessions.
    groups: HashMap<K, Vec<usize>>,
    /// Session -> key at insertion.
    entity_keys: HashMap<usize, K>,
}

impl<K> SessionGroupConstraint<K>
where
    K: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static,
{
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        weight: HardSoftScore,
        key_fn: SessionKey<K>,
        weigher: GroupWeigher<K>,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            weight,
            key_fn,
            weigher,
            groups: HashMap::new(),
            entity_keys: HashMap::new(),
        }
    }

    /// Groups with their weight, in key order. Members are sorted.
    fn weighed_groups(&self, solution: &TrainingSchedule) -> Vec<(Vec<usize>, i64)> {
        let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
        for idx in assigned_sessions(solution) {
            if let Some(key) = (self.key_fn)(solution, idx) {
                groups.entry(key).or_default().push(idx);
            }
        }
        groups
            .into_iter()
            .map(|(key, members)| {
                let amount = (self.weigher)(solution, &key, &members);
                (members, amount)
            })
            .collect()
    }

    fn group_weight(&self, solution: &TrainingSchedule, key: &K) -> i64 {
        self.groups
            .get(key)
            .map_or(0, |members| (self.weigher)(solution, key, members))
    }
}

impl<K> IncrementalConstraint<TrainingSchedule, HardSoftScore> for SessionGroupConstraint<K>
where
    K: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static,
{
    fn evaluate(&self, solution: &TrainingSchedule) -> HardSoftScore {
        let total: i64 = self
            .weighed_groups(solution)
            .iter()
            .map(|(_, amount)| amount)
            .sum();
        impact(self.weight, self.impact_type, total)
    }

    fn match_count(&self, solution: &TrainingSchedule) -> usize {
        self.weighed_groups(solution)
            .iter()
            .filter(|(_, amount)| *amount != 0)
            .count()
    }

    fn initialize(&mut self, solution: &TrainingSchedule) -> HardSoftScore {
        self.reset();
        let mut score = HardSoftScore::ZERO;
        for idx in 0..solution.sessions.len() {
            score += self.on_insert(solution, idx);
        }
        score
    }

    fn on_insert(&mut self, solution: &TrainingSchedule, entity_index: usize) -> HardSoftScore {
        if !is_assigned(solution, entity_index) {
            return HardSoftScore::ZERO;
        }
        let Some(key) = (self.key_fn)(solution, entity_index) else {
            return HardSoftScore::ZERO;
        };
        let before = self.group_weight(solution, &key);

        self.groups.entry(key).or_default().push(entity_index);
        self.entity_keys.insert(entity_index, key);

        let after = self.group_weight(solution, &key);
        impact(self.weight, self.impact_type, after - before)
    }

    fn on_retract(&mut self, solution: &TrainingSchedule, entity_index: usize) -> HardSoftScore {
        let Some(key) = self.entity_keys.remove(&entity_index) else {
            return HardSoftScore::ZERO;
        };
        let before = self.group_weight(solution, &key);

        if let Some(members) = self.groups.get_mut(&key) {
            if let Some(pos) = members.iter().position(|&m| m == entity_index) {
                members.swap_remove(pos);
            }
            if members.is_empty() {
                self.groups.remove(&key);
            }
        }

        let after = self.group_weight(solution, &key);
        impact(self.weight, self.impact_type, after - before)
    }

    fn reset(&mut self) {
        self.groups.clear();
        self.entity_keys.clear();
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
        self.weighed_groups(solution)
            .into_iter()
            .filter(|(_, amount)| *amount != 0)
            .map(|(members, amount)| {
                let entities = members.iter().map(|&idx| session_ref(solution, idx)).collect();
                DetailedConstraintMatch::new(
                    self.constraint_ref.clone(),
                    impact(self.weight, self.impact_type, amount),
                    ConstraintJustification::new(entities),
                )
            })
            .collect()
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }
}
