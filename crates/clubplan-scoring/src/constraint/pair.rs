//! Pairwise rule shape: unordered session pairs sharing a grouping key.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use clubplan_core::{ConstraintRef, HardSoftScore, ImpactType, TrainingSchedule};

use super::{assigned_sessions, impact, is_assigned, session_ref, SessionKey};
use crate::api::analysis::{ConstraintJustification, DetailedConstraintMatch};
use crate::api::constraint_set::IncrementalConstraint;

/// Symmetric predicate over two sessions in the same group.
pub type PairFilter = fn(&TrainingSchedule, usize, usize) -> bool;

/// Matches every unordered pair of distinct assigned sessions that share a
/// key and pass the filter. Each pair contributes one unit of `weight`.
///
/// Only the moved session's group is touched on insert and retract, so a
/// move costs O(group size).
///
/// The filter and weigher read the live solution, so a session must be
/// retracted before its variables change (see the module docs).
pub struct SessionPairConstraint<K> {
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    weight: HardSoftScore,
    key_fn: SessionKey<K>,
    filter: PairFilter,
    /// Key -> member sessions.
    groups: HashMap<K, Vec<usize>>,
    /// Session -> key at insertion, for retraction after mutation.
    entity_keys: HashMap<usize, K>,
}

impl<K> SessionPairConstraint<K>
where
    K: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static,
{
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        weight: HardSoftScore,
        key_fn: SessionKey<K>,
        filter: PairFilter,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            weight,
            key_fn,
            filter,
            groups: HashMap::new(),
            entity_keys: HashMap::new(),
        }
    }

    fn partners(&self, solution: &TrainingSchedule, idx: usize, members: &[usize]) -> i64 {
        members
            .iter()
            .filter(|&&other| other != idx && (self.filter)(solution, idx, other))
            .count() as i64
    }

    /// Matching pairs, lower index first, in key order.
    fn pairs(&self, solution: &TrainingSchedule) -> Vec<(usize, usize)> {
        let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
        for idx in assigned_sessions(solution) {
            if let Some(key) = (self.key_fn)(solution, idx) {
                groups.entry(key).or_default().push(idx);
            }
        }

        let mut pairs = Vec::new();
        for members in groups.values() {
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    if (self.filter)(solution, a, b) {
                        pairs.push((a, b));
                    }
                }
            }
        }
        pairs
    }
}

impl<K> IncrementalConstraint<TrainingSchedule, HardSoftScore> for SessionPairConstraint<K>
where
    K: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static,
{
    fn evaluate(&self, solution: &TrainingSchedule) -> HardSoftScore {
        impact(self.weight, self.impact_type, self.pairs(solution).len() as i64)
    }

    fn match_count(&self, solution: &TrainingSchedule) -> usize {
        self.pairs(solution).len()
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
        let count = self
            .groups
            .get(&key)
            .map_or(0, |members| self.partners(solution, entity_index, members));

        self.groups.entry(key).or_default().push(entity_index);
        self.entity_keys.insert(entity_index, key);
        impact(self.weight, self.impact_type, count)
    }

    fn on_retract(&mut self, solution: &TrainingSchedule, entity_index: usize) -> HardSoftScore {
        let Some(key) = self.entity_keys.remove(&entity_index) else {
            return HardSoftScore::ZERO;
        };
        let Some(members) = self.groups.get_mut(&key) else {
            return HardSoftScore::ZERO;
        };
        if let Some(pos) = members.iter().position(|&m| m == entity_index) {
            members.swap_remove(pos);
        }

        let members = std::mem::take(members);
        let count = self.partners(solution, entity_index, &members);
        if members.is_empty() {
            self.groups.remove(&key);
        } else {
            self.groups.insert(key, members);
        }
        -impact(self.weight, self.impact_type, count)
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
        let unit = impact(self.weight, self.impact_type, 1);
        self.pairs(solution)
            .into_iter()
            .map(|(a, b)| {
                DetailedConstraintMatch::new(
                    self.constraint_ref.clone(),
                    unit,
                    ConstraintJustification::new(vec![
                        session_ref(solution, a),
                        session_ref(solution, b),
                    ]),
                )
            })
            .collect()
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }
}
