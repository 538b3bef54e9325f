//! Move tabu list.

use std::collections::VecDeque;

use crate::heuristic::TrainingMove;

/// Forbids the undo moves of recent steps.
///
/// After every step the move that reverts it is recorded; for the next
/// `tabu_size` steps the search may not take it, which keeps it from
/// cycling straight back. A tabu move that would produce a new best score
/// is still allowed (aspiration).
///
/// # Example
///
/// ```
/// use clubplan_solver::heuristic::TrainingMove;
/// use clubplan_solver::phase::localsearch::MoveTabuList;
///
/// let mut tabu = MoveTabuList::new(2);
/// tabu.record(TrainingMove::change_time_slot(0, 3));
/// assert!(tabu.is_tabu(&TrainingMove::change_time_slot(0, 3)));
/// assert!(!tabu.is_tabu(&TrainingMove::change_time_slot(0, 4)));
/// ```
#[derive(Debug, Clone)]
pub struct MoveTabuList {
    tabu_size: usize,
    moves: VecDeque<TrainingMove>,
}

impl MoveTabuList {
    pub fn new(tabu_size: usize) -> Self {
        Self {
            tabu_size,
            moves: VecDeque::with_capacity(tabu_size),
        }
    }

    /// Records a move as tabu, evicting the oldest entry when full.
    pub fn record(&mut self, tabu_move: TrainingMove) {
        if self.tabu_size == 0 {
            return;
        }
        if self.moves.len() == self.tabu_size {
            self.moves.pop_front();
        }
        self.moves.push_back(tabu_move);
    }

    pub fn is_tabu(&self, candidate: &TrainingMove) -> bool {
        self.moves.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl Default for MoveTabuList {
    fn default() -> Self {
        Self::new(10)
    }
}
