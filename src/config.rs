//! Construction-time hyperparameters for [`QLearner`](crate::QLearner).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hyperparameters for a Q-learner.
///
/// Builder-style setters mirror the documented defaults:
///
/// ```
/// use qlearner::LearnerConfig;
///
/// let config = LearnerConfig::new(100, 4)
///     .with_alpha(0.2)
///     .with_dyna(200)
///     .with_seed(42);
/// assert_eq!(config.num_actions, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Q-table row count
    pub num_states: usize,
    /// Q-table column count
    pub num_actions: usize,
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Initial random-action rate
    pub rar: f64,
    /// Multiplicative decay applied to `rar` after every `query`
    pub radr: f64,
    /// Replay updates per real step
    pub dyna: usize,
    /// Emit per-step diagnostics through `log::info!`
    pub verbose: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Cap on stored experiences. `None` keeps every experience.
    pub replay_capacity: Option<usize>,
}

impl LearnerConfig {
    /// Create a configuration for a `num_states × num_actions` table with
    /// default values for everything else.
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            num_states,
            num_actions,
            ..Self::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_rar(mut self, rar: f64) -> Self {
        self.rar = rar;
        self
    }

    pub fn with_radr(mut self, radr: f64) -> Self {
        self.radr = radr;
        self
    }

    pub fn with_dyna(mut self, dyna: usize) -> Self {
        self.dyna = dyna;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound the experience memory to `capacity` entries (oldest evicted first).
    pub fn with_replay_capacity(mut self, capacity: usize) -> Self {
        self.replay_capacity = Some(capacity);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the table dimensions.
    ///
    /// Rates are deliberately left unchecked: out-of-range values produce
    /// whatever the arithmetic produces.
    pub fn validate(&self) -> Result<()> {
        if self.num_states == 0 {
            return Err(Error::InvalidConfiguration {
                message: "num_states must be at least 1".to_string(),
            });
        }
        if self.num_actions == 0 {
            return Err(Error::InvalidConfiguration {
                message: "num_actions must be at least 1".to_string(),
            });
        }
        let table_bytes = self
            .num_states
            .checked_mul(self.num_actions)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<f64>()));
        if !matches!(table_bytes, Some(bytes) if bytes <= isize::MAX as usize) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "table of {} states x {} actions does not fit in memory",
                    self.num_states, self.num_actions
                ),
            });
        }
        if self.replay_capacity == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "replay_capacity must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            num_states: 100,
            num_actions: 4,
            alpha: 0.2,
            gamma: 0.9,
            rar: 0.5,
            radr: 0.99,
            dyna: 0,
            verbose: false,
            seed: None,
            replay_capacity: None,
        }
    }
}
