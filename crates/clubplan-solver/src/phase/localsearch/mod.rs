//! Local search phase.
//!
//! Each step samples candidate moves, scores each one incrementally, keeps
//! those the [`Acceptor`] accepts and the [`MoveTabuList`] allows, and takes
//! the best of them.

mod acceptor;
mod phase;
mod tabu;

pub use acceptor::{
    scalarize, Acceptor, ConfiguredAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    SimulatedAnnealingAcceptor, LEVEL_WEIGHT,
};
pub use phase::LocalSearchPhase;
pub use tabu::MoveTabuList;

#[cfg(test)]
mod tests;
