//! ε-greedy action selection with a decaying random-action rate

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Result, q_learning::q_table::QTable};

/// Outcome of one action selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionChoice {
    pub action: usize,
    /// `true` when the action was drawn at random rather than taken greedily
    pub explored: bool,
}

/// ε-greedy policy whose ε (`rar`) decays multiplicatively by `radr`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    rar: f64,
    radr: f64,
}

impl EpsilonGreedy {
    pub fn new(rar: f64, radr: f64) -> Self {
        Self { rar, radr }
    }

    /// Current random-action rate
    pub fn rar(&self) -> f64 {
        self.rar
    }

    pub fn radr(&self) -> f64 {
        self.radr
    }

    /// `rar ← rar * radr`
    pub fn decay(&mut self) {
        self.rar *= self.radr;
    }

    /// With probability `rar` pick a uniform action, otherwise the greedy one.
    pub fn select<R: Rng + ?Sized>(
        &self,
        q_table: &QTable,
        state: usize,
        rng: &mut R,
    ) -> Result<ActionChoice> {
        q_table.check_state(state)?;
        if rng.random::<f64>() < self.rar {
            // Explore: random action
            Ok(ActionChoice {
                action: rng.random_range(0..q_table.num_actions()),
                explored: true,
            })
        } else {
            // Exploit: greedy action based on Q-values
            Ok(ActionChoice {
                action: q_table.greedy_action(state)?,
                explored: false,
            })
        }
    }
}
