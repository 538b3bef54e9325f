//! Tests for constraint set types.

use super::*;
use clubplan_core::{ConstraintRef, HardSoftScore};

/// Counts entities matching a predicate, at a fixed soft weight.
struct CountingConstraint<F> {
    constraint_ref: ConstraintRef,
    predicate: F,
    weight: i64,
    hard: bool,
}

impl<F> CountingConstraint<F>
where
    F: Fn(&TestSolution, usize) -> bool,
{
    fn new(name: &str, predicate: F, weight: i64, hard: bool) -> Self {
        Self {
            constraint_ref: ConstraintRef::new("", name),
            predicate,
            weight,
            hard,
        }
    }

    fn unit(&self) -> HardSoftScore {
        if self.hard {
            HardSoftScore::of_hard(self.weight)
        } else {
            HardSoftScore::of_soft(self.weight)
        }
    }
}

impl<F> IncrementalConstraint<TestSolution, HardSoftScore> for CountingConstraint<F>
where
    F: Fn(&TestSolution, usize) -> bool + Send + Sync,
{
    fn evaluate(&self, solution: &TestSolution) -> HardSoftScore {
        let matches = self.match_count(solution) as i64;
        -self.unit().times(matches)
    }

    fn match_count(&self, solution: &TestSolution) -> usize {
        (0..solution.values.len())
            .filter(|&i| (self.predicate)(solution, i))
            .count()
    }

    fn initialize(&mut self, solution: &TestSolution) -> HardSoftScore {
        self.evaluate(solution)
    }

    fn on_insert(&mut self, solution: &TestSolution, entity_index: usize) -> HardSoftScore {
        if (self.predicate)(solution, entity_index) {
            -self.unit()
        } else {
            HardSoftScore::ZERO
        }
    }

    fn on_retract(&mut self, solution: &TestSolution, entity_index: usize) -> HardSoftScore {
        if (self.predicate)(solution, entity_index) {
            self.unit()
        } else {
            HardSoftScore::ZERO
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn is_hard(&self) -> bool {
        self.hard
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }
}

#[derive(Clone)]
struct TestSolution {
    values: Vec<Option<i32>>,
}

#[test]
fn test_empty_constraint_set() {
    let constraints: () = ();
    let solution = TestSolution {
        values: vec![Some(1), None],
    };

    let score: HardSoftScore = constraints.evaluate_all(&solution);
    assert_eq!(score, HardSoftScore::ZERO);
    assert_eq!(
        <() as ConstraintSet<TestSolution, HardSoftScore>>::constraint_count(&constraints),
        0
    );
}

#[test]
fn test_tuple_sums_constraints() {
    let unassigned = CountingConstraint::new("unassigned", |s: &TestSolution, i| s.values[i].is_none(), 1, true);
    let odd = CountingConstraint::new(
        "odd",
        |s: &TestSolution, i| s.values[i].is_some_and(|v| v % 2 == 1),
        2,
        false,
    );
    let constraints = (unassigned, odd);

    let solution = TestSolution {
        values: vec![Some(1), None, Some(3), Some(4)],
    };

    assert_eq!(
        <_ as ConstraintSet<TestSolution, HardSoftScore>>::constraint_count(&constraints),
        2
    );
    assert_eq!(constraints.evaluate_all(&solution), HardSoftScore::of(-1, -4));

    let each: Vec<ConstraintResult<HardSoftScore>> = constraints.evaluate_each(&solution);
    assert_eq!(each[0].name, "unassigned");
    assert_eq!(each[0].match_count, 1);
    assert!(each[0].is_hard);
    assert_eq!(each[1].score, HardSoftScore::of_soft(-4));
    assert!(!each[1].is_hard);
}

#[test]
fn test_incremental_protocol_through_tuple() {
    let unassigned = CountingConstraint::new("unassigned", |s: &TestSolution, i| s.values[i].is_none(), 1, true);
    let mut constraints = (unassigned,);

    let mut solution = TestSolution {
        values: vec![None, None, Some(2)],
    };

    let mut score = constraints.initialize_all(&solution);
    assert_eq!(score, HardSoftScore::of_hard(-2));

    score = score + constraints.on_retract_all(&solution, 0);
    solution.values[0] = Some(7);
    score = score + constraints.on_insert_all(&solution, 0);

    assert_eq!(score, HardSoftScore::of_hard(-1));
    assert_eq!(score, constraints.evaluate_all(&solution));
}

#[test]
fn test_evaluate_detailed_carries_refs() {
    let constraints = (CountingConstraint::new("unassigned", |s: &TestSolution, i| s.values[i].is_none(), 1, true),);
    let solution = TestSolution { values: vec![None] };

    let analyses: Vec<crate::api::analysis::ConstraintAnalysis<HardSoftScore>> =
        constraints.evaluate_detailed(&solution);
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0].name(), "unassigned");
    assert_eq!(analyses[0].score, HardSoftScore::of_hard(-1));
    assert!(analyses[0].is_hard);
}
