// Score director trait definition.

use clubplan_core::PlanningSolution;

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores (incrementally when possible)
// - Receiving variable change notifications around every mutation
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    //
    // Mutations must be wrapped in `before_variable_changed` and
    // `after_variable_changed` for the entities they touch.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Clones the working solution.
    fn clone_working_solution(&self) -> S;

    // Called before the planning variables of an entity change.
    fn before_variable_changed(&mut self, entity_index: usize);

    // Called after the planning variables of an entity changed.
    fn after_variable_changed(&mut self, entity_index: usize);

    // Returns the number of planning entities in the working solution.
    fn entity_count(&self) -> usize;

    // Returns true if this score director supports incremental scoring.
    fn is_incremental(&self) -> bool {
        false
    }

    // Resets the score director state.
    fn reset(&mut self) {}
}
