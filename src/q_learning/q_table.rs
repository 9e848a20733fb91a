//! Dense Q-table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Stored row-major: row `s` holds the values of every action in state `s`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    q_values: Vec<f64>,
    num_states: usize,
    num_actions: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-filled `num_states × num_actions` Q-table
    pub fn new(
        num_states: usize,
        num_actions: usize,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Self {
        Self {
            q_values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
            learning_rate,
            discount_factor,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn check_state(&self, state: usize) -> Result<()> {
        if state < self.num_states {
            Ok(())
        } else {
            Err(Error::StateOutOfRange {
                state,
                num_states: self.num_states,
            })
        }
    }

    pub fn check_action(&self, action: usize) -> Result<()> {
        if action < self.num_actions {
            Ok(())
        } else {
            Err(Error::ActionOutOfRange {
                action,
                num_actions: self.num_actions,
            })
        }
    }

    fn index(&self, state: usize, action: usize) -> Result<usize> {
        self.check_state(state)?;
        self.check_action(action)?;
        Ok(state * self.num_actions + action)
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: usize, action: usize) -> Result<f64> {
        let idx = self.index(state, action)?;
        Ok(self.q_values[idx])
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: usize, action: usize, value: f64) -> Result<()> {
        let idx = self.index(state, action)?;
        self.q_values[idx] = value;
        Ok(())
    }

    /// All action values for one state
    pub fn row(&self, state: usize) -> Result<&[f64]> {
        self.check_state(state)?;
        let start = state * self.num_actions;
        Ok(&self.q_values[start..start + self.num_actions])
    }

    /// Iterate over rows in state order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.q_values.chunks(self.num_actions.max(1))
    }

    /// Greedy action in `state`. Ties go to the lowest action index.
    pub fn greedy_action(&self, state: usize) -> Result<usize> {
        let row = self.row(state)?;
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            // Strict comparison keeps the first maximum.
            if value > row[best] {
                best = action;
            }
        }
        Ok(best)
    }

    /// Maximum Q-value in `state`
    pub fn max_q(&self, state: usize) -> Result<f64> {
        let action = self.greedy_action(state)?;
        self.get(state, action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← (1 - α) Q(s,a) + α [r + γ Q(s', argmax_a' Q(s',a'))]
    ///
    /// Returns `(next_state, greedy_next_action)`.
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: usize,
        next_state: usize,
        reward: f64,
    ) -> Result<(usize, usize)> {
        let idx = self.index(state, action)?;
        let next_action = self.greedy_action(next_state)?;
        let next_q = self.q_values[next_state * self.num_actions + next_action];
        let current_q = self.q_values[idx];
        self.q_values[idx] = (1.0 - self.learning_rate) * current_q
            + self.learning_rate * (reward + self.discount_factor * next_q);
        Ok((next_state, next_action))
    }

    /// Total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }
}
