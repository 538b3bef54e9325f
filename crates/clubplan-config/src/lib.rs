//! Configuration for the clubplan solver.
//!
//! Load solver configuration from TOML or YAML to control termination, the
//! local search acceptor and the job pool without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use clubplan_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 10
//!
//!     [local_search.acceptor]
//!     type = "simulated_annealing"
//!     starting_temperature = 5.0
//!     decay_rate = 0.999
//! "#).unwrap();
//!
//! assert_eq!(config.termination.time_limit(), Duration::from_secs(10));
//! assert!(matches!(config.local_search.acceptor, AcceptorConfig::SimulatedAnnealing(_)));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use clubplan_config::SolverConfig;
//!
//! let config = SolverConfig::load("clubplan.toml").unwrap_or_default();
//! assert_eq!(config.manager.pool_size, 2);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wall-clock budget applied when no time limit is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Seed for the initial assignment and the search; random when unset.
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub local_search: LocalSearchConfig,

    #[serde(default)]
    pub manager: ManagerConfig,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file; `.yaml` and `.yml` are read as YAML,
    /// anything else as TOML. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing, malformed or invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config = if is_yaml {
            Self::from_yaml_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self.termination.minutes_spent_limit = None;
        self
    }

    /// Sets the step count limit.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.termination.step_count_limit = Some(steps);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.local_search.acceptor = acceptor;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.manager.pool_size = pool_size;
        self
    }

    /// Rejects values the solver cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manager.pool_size == 0 {
            return Err(ConfigError::Invalid("pool_size must be at least 1".into()));
        }
        self.local_search.validate()
    }
}

/// Termination configuration.
///
/// The first limit reached ends the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    pub seconds_spent_limit: Option<u64>,

    pub minutes_spent_limit: Option<u64>,

    pub step_count_limit: Option<u64>,

    /// Steps without a new best score before terminating.
    pub unimproved_step_count_limit: Option<u64>,

    /// Stop as soon as the best schedule has no hard penalty.
    #[serde(default)]
    pub best_score_feasible: bool,
}

impl TerminationConfig {
    /// Configured wall-clock budget, or [`DEFAULT_TIME_LIMIT`].
    pub fn time_limit(&self) -> Duration {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Duration::from_secs(seconds)
        } else {
            DEFAULT_TIME_LIMIT
        }
    }
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub acceptor: AcceptorConfig,

    /// Candidate moves evaluated per step.
    #[serde(default = "default_move_sample_size")]
    pub move_sample_size: usize,

    /// Recently undone moves kept tabu; 0 disables the list.
    #[serde(default = "default_tabu_size")]
    pub tabu_size: usize,

    /// Share of sampled moves that are swaps, in `[0, 1]`.
    #[serde(default = "default_swap_move_ratio")]
    pub swap_move_ratio: f64,
}

fn default_move_sample_size() -> usize {
    64
}

fn default_tabu_size() -> usize {
    10
}

fn default_swap_move_ratio() -> f64 {
    0.2
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            acceptor: AcceptorConfig::default(),
            move_sample_size: default_move_sample_size(),
            tabu_size: default_tabu_size(),
            swap_move_ratio: default_swap_move_ratio(),
        }
    }
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.move_sample_size == 0 {
            return Err(ConfigError::Invalid(
                "move_sample_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.swap_move_ratio) {
            return Err(ConfigError::Invalid(format!(
                "swap_move_ratio must be within [0, 1], got {}",
                self.swap_move_ratio
            )));
        }
        self.acceptor.validate()
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Only non-worsening moves.
    HillClimbing,

    /// Compare against the step score from `late_acceptance_size` steps ago.
    LateAcceptance(LateAcceptanceConfig),

    /// Accept worsening moves with a probability that cools over time.
    SimulatedAnnealing(SimulatedAnnealingConfig),
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig::default())
    }
}

impl AcceptorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            AcceptorConfig::HillClimbing => Ok(()),
            AcceptorConfig::LateAcceptance(la) if la.late_acceptance_size == 0 => Err(
                ConfigError::Invalid("late_acceptance_size must be at least 1".into()),
            ),
            AcceptorConfig::LateAcceptance(_) => Ok(()),
            AcceptorConfig::SimulatedAnnealing(sa) => {
                if !(sa.starting_temperature > 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "starting_temperature must be positive, got {}",
                        sa.starting_temperature
                    )));
                }
                if !(sa.decay_rate > 0.0 && sa.decay_rate <= 1.0) {
                    return Err(ConfigError::Invalid(format!(
                        "decay_rate must be within (0, 1], got {}",
                        sa.decay_rate
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Late acceptance configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    #[serde(default = "default_late_acceptance_size")]
    pub late_acceptance_size: usize,
}

fn default_late_acceptance_size() -> usize {
    400
}

impl Default for LateAcceptanceConfig {
    fn default() -> Self {
        Self {
            late_acceptance_size: default_late_acceptance_size(),
        }
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Temperature at the start of the search, in soft score units.
    #[serde(default = "default_starting_temperature")]
    pub starting_temperature: f64,

    /// Multiplicative cooling per step, in `(0, 1]`.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,
}

fn default_starting_temperature() -> f64 {
    10.0
}

fn default_decay_rate() -> f64 {
    0.9995
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            starting_temperature: default_starting_temperature(),
            decay_rate: default_decay_rate(),
        }
    }
}

/// Job manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ManagerConfig {
    /// Jobs that may solve at the same time; later ones wait as scheduled.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    2
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

#[cfg(test)]
mod tests;
