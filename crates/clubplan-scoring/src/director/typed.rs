//! Typed score director for incremental scoring.
//!
//! `TypedScoreDirector` drives a monomorphized tuple `ConstraintSet`, so
//! every rule call is static and only the moved session is re-scored.

use std::marker::PhantomData;

use clubplan_core::score::Score;
use clubplan_core::PlanningSolution;
use tracing::trace;

use crate::api::analysis::ScoreExplanation;
use crate::api::constraint_set::ConstraintSet;
use crate::director::ScoreDirector;

/// A typed score director for incremental scoring.
///
/// # Type Parameters
///
/// - `S`: The solution type (must implement `PlanningSolution`)
/// - `C`: The constraint set type (tuple of typed constraints)
///
/// # Example
///
/// ```
/// use clubplan_core::{AgeGroup, HardSoftScore, Weekday};
/// use clubplan_scoring::director::TypedScoreDirector;
/// use clubplan_scoring::create_constraints;
/// use clubplan_test::{team, trainer, ScheduleBuilder};
///
/// let schedule = ScheduleBuilder::new(60)
///     .trainer(trainer("ann", 4, &[AgeGroup::U8]))
///     .team(team("u8a", AgeGroup::U8, 12, 2, &[Weekday::Monday, Weekday::Wednesday], (17, 19)))
///     .slots(&[Weekday::Monday, Weekday::Wednesday], 17..19)
///     .assign(0, 0, 0)
///     .assign(1, 0, 0)
///     .build();
///
/// let mut director = TypedScoreDirector::new(schedule, create_constraints(), |s| s.sessions.len());
///
/// // Both sessions share Monday 17:00 with the same trainer.
/// let score = director.calculate_score();
/// assert!(score.hard() < 0);
///
/// // Move the second session to Wednesday 17:00.
/// let score = director.do_change(1, |s| s.sessions[1].time_slot = Some(2));
/// assert_eq!(score.hard(), 0);
/// ```
pub struct TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    C: ConstraintSet<S, S::Score>,
{
    working_solution: S,
    constraints: C,
    cached_score: S::Score,
    initialized: bool,
    entity_counter: fn(&S) -> usize,
    _phantom: PhantomData<S::Score>,
}

impl<S, C> TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    C: ConstraintSet<S, S::Score>,
{
    /// Creates a director; nothing is evaluated until the first
    /// `calculate_score`.
    pub fn new(solution: S, constraints: C, entity_counter: fn(&S) -> usize) -> Self {
        Self {
            working_solution: solution,
            constraints,
            cached_score: S::Score::zero(),
            initialized: false,
            entity_counter,
            _phantom: PhantomData,
        }
    }

    pub fn working_solution(&self) -> &S {
        &self.working_solution
    }

    /// Returns a mutable reference to the working solution.
    ///
    /// Changes made outside the before/after protocol require `reset()`.
    pub fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    /// Calculates and returns the current score.
    ///
    /// On first call, initializes all constraints. Subsequent calls return
    /// the incrementally maintained score.
    pub fn calculate_score(&mut self) -> S::Score {
        if !self.initialized {
            self.cached_score = self.constraints.initialize_all(&self.working_solution);
            self.initialized = true;
        }
        self.working_solution.set_score(Some(self.cached_score));
        self.cached_score
    }

    /// Retracts the entity from all constraints before its variables change.
    #[inline]
    pub fn before_variable_changed(&mut self, entity_index: usize) {
        if !self.initialized {
            return;
        }
        let delta = self
            .constraints
            .on_retract_all(&self.working_solution, entity_index);
        self.cached_score = self.cached_score + delta;
    }

    /// Inserts the entity into all constraints after its variables changed.
    #[inline]
    pub fn after_variable_changed(&mut self, entity_index: usize) {
        if !self.initialized {
            return;
        }
        let delta = self
            .constraints
            .on_insert_all(&self.working_solution, entity_index);
        self.cached_score = self.cached_score + delta;
    }

    /// Runs one full change cycle on a single entity and returns the new score.
    #[inline]
    pub fn do_change<F>(&mut self, entity_index: usize, change_fn: F) -> S::Score
    where
        F: FnOnce(&mut S),
    {
        self.before_variable_changed(entity_index);
        change_fn(&mut self.working_solution);
        self.after_variable_changed(entity_index);
        self.calculate_score()
    }

    /// Returns the cached score without recalculation.
    ///
    /// Returns zero score if not yet initialized.
    #[inline]
    pub fn get_score(&self) -> S::Score {
        self.cached_score
    }

    /// Drops all incremental state; the next `calculate_score` starts over.
    pub fn reset(&mut self) {
        trace!(constraint_count = self.constraints.constraint_count(), "score director reset");
        self.constraints.reset_all();
        self.initialized = false;
        self.cached_score = S::Score::zero();
    }

    pub fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    pub fn constraints(&self) -> &C {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.constraint_count()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Full evaluation of the working solution with every match listed.
    pub fn explain(&self) -> ScoreExplanation<S::Score> {
        let analyses = self.constraints.evaluate_detailed(&self.working_solution);
        let score = analyses
            .iter()
            .fold(S::Score::zero(), |total, analysis| total + analysis.score);
        ScoreExplanation::new(score, analyses)
    }

    /// Consumes the director and returns the working solution.
    pub fn take_solution(self) -> S {
        self.working_solution
    }
}

impl<S, C> std::fmt::Debug for TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    C: ConstraintSet<S, S::Score>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedScoreDirector")
            .field("initialized", &self.initialized)
            .field("cached_score", &self.cached_score)
            .field("constraint_count", &self.constraints.constraint_count())
            .finish()
    }
}

impl<S, C> ScoreDirector<S> for TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    C: ConstraintSet<S, S::Score> + Send,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        TypedScoreDirector::calculate_score(self)
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_variable_changed(&mut self, entity_index: usize) {
        TypedScoreDirector::before_variable_changed(self, entity_index);
    }

    fn after_variable_changed(&mut self, entity_index: usize) {
        TypedScoreDirector::after_variable_changed(self, entity_index);
    }

    fn entity_count(&self) -> usize {
        (self.entity_counter)(&self.working_solution)
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        TypedScoreDirector::reset(self);
    }
}
