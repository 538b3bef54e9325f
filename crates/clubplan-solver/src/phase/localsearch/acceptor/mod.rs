//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a candidate move's score is good enough to take
//! as the next step. All of them accept non-worsening moves; they differ in
//! how they let worsening moves through to escape local optima.

mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;

use std::fmt::Debug;

use rand_chacha::ChaCha8Rng;

use clubplan_config::AcceptorConfig;
use clubplan_core::{PlanningSolution, Score};

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor<S: PlanningSolution>: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        rng: &mut ChaCha8Rng,
    ) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &S::Score) {}

    /// Called after every step, with the score the step ended on.
    fn step_ended(&mut self, _step_score: &S::Score) {}
}

/// Weight of each score level over the next lower one when a score is
/// collapsed into a single number.
pub const LEVEL_WEIGHT: f64 = 1000.0;

/// Collapses a score into one number, highest level first, each level
/// weighted [`LEVEL_WEIGHT`] times the next. `-1hard/-20soft` is `-1020`.
pub fn scalarize<Sc: Score>(score: &Sc) -> f64 {
    score
        .to_level_numbers()
        .iter()
        .fold(0.0, |acc, &level| acc * LEVEL_WEIGHT + level as f64)
}

/// The acceptor chosen in configuration.
#[derive(Clone)]
pub enum ConfiguredAcceptor<S: PlanningSolution> {
    HillClimbing(HillClimbingAcceptor),
    LateAcceptance(LateAcceptanceAcceptor<S>),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
}

impl<S: PlanningSolution> Debug for ConfiguredAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HillClimbing(a) => a.fmt(f),
            Self::LateAcceptance(a) => a.fmt(f),
            Self::SimulatedAnnealing(a) => a.fmt(f),
        }
    }
}

impl<S: PlanningSolution> ConfiguredAcceptor<S> {
    pub fn from_config(config: &AcceptorConfig) -> Self {
        match config {
            AcceptorConfig::HillClimbing => Self::HillClimbing(HillClimbingAcceptor),
            AcceptorConfig::LateAcceptance(la) => {
                Self::LateAcceptance(LateAcceptanceAcceptor::new(la.late_acceptance_size))
            }
            AcceptorConfig::SimulatedAnnealing(sa) => Self::SimulatedAnnealing(
                SimulatedAnnealingAcceptor::new(sa.starting_temperature, sa.decay_rate),
            ),
        }
    }

    /// Name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HillClimbing(_) => "Hill Climbing",
            Self::LateAcceptance(_) => "Late Acceptance",
            Self::SimulatedAnnealing(_) => "Simulated Annealing",
        }
    }
}

impl<S: PlanningSolution> Acceptor<S> for ConfiguredAcceptor<S> {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        match self {
            Self::HillClimbing(a) => {
                Acceptor::<S>::is_accepted(a, last_step_score, move_score, rng)
            }
            Self::LateAcceptance(a) => a.is_accepted(last_step_score, move_score, rng),
            Self::SimulatedAnnealing(a) => {
                Acceptor::<S>::is_accepted(a, last_step_score, move_score, rng)
            }
        }
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        match self {
            Self::HillClimbing(a) => Acceptor::<S>::phase_started(a, initial_score),
            Self::LateAcceptance(a) => a.phase_started(initial_score),
            Self::SimulatedAnnealing(a) => Acceptor::<S>::phase_started(a, initial_score),
        }
    }

    fn step_ended(&mut self, step_score: &S::Score) {
        match self {
            Self::HillClimbing(a) => Acceptor::<S>::step_ended(a, step_score),
            Self::LateAcceptance(a) => a.step_ended(step_score),
            Self::SimulatedAnnealing(a) => Acceptor::<S>::step_ended(a, step_score),
        }
    }
}
