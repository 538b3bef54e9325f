//! Simulated annealing acceptor.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use clubplan_core::PlanningSolution;

use super::{scalarize, Acceptor};

/// Accepts worsening moves with probability `exp(-delta / temperature)`.
///
/// `delta` is the loss between the scalarized step and move scores (see
/// [`scalarize`]), so one hard point weighs as much as a thousand soft
/// points. The temperature is multiplied by `decay_rate` after every step.
///
/// # Example
///
/// ```
/// use clubplan_solver::phase::localsearch::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(10.0, 0.9995);
/// assert_eq!(acceptor.temperature(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
}

impl SimulatedAnnealingAcceptor {
    /// Temperature below which worsening moves are no longer accepted.
    const MIN_TEMPERATURE: f64 = 1e-9;

    pub fn new(starting_temperature: f64, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Probability of accepting a move that loses `delta` (> 0).
    pub fn acceptance_probability(&self, delta: f64) -> f64 {
        if self.current_temperature < Self::MIN_TEMPERATURE {
            0.0
        } else {
            (-delta / self.current_temperature).exp()
        }
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(10.0, 0.9995)
    }
}

impl<S: PlanningSolution> Acceptor<S> for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        let delta = scalarize(last_step_score) - scalarize(move_score);
        rng.random::<f64>() < self.acceptance_probability(delta)
    }

    fn phase_started(&mut self, _initial_score: &S::Score) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &S::Score) {
        self.current_temperature *= self.decay_rate;
    }
}
