//! Learner port - abstraction over step-driven tabular learners
//!
//! An external training harness drives a learner with two calls: one to
//! anchor it in a starting state, then one per environment step carrying the
//! observed next state and reward.

use crate::Result;

/// Learner trait - the interface an environment driver talks to
///
/// # Call Sequence
///
/// 1. `querysetstate(initial_state)` at the start of every episode
/// 2. `query(next_state, reward)` after every environment step, feeding the
///    returned action back into the environment
///
/// # Examples
///
/// ```no_run
/// use qlearner::{Result, ports::Learner};
///
/// fn greedy_rollout<L: Learner>(learner: &mut L, start: usize) -> Result<usize> {
///     let first = learner.querysetstate(start)?;
///     Ok(first)
/// }
/// ```
pub trait Learner: Send {
    /// Anchor the learner in `state` without learning and return the action
    /// to take from it.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` is outside the learner's state domain.
    fn querysetstate(&mut self, state: usize) -> Result<usize>;

    /// Learn from the transition into `next_state` with `reward` and return
    /// the action to take from `next_state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no state has been set yet or `next_state` is out
    /// of range.
    fn query(&mut self, next_state: usize, reward: f64) -> Result<usize>;

    /// Get the learner's name.
    ///
    /// Used for identification in logging.
    fn name(&self) -> &str;
}
