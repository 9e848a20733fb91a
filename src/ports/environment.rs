//! Environment port - the external world a learner acts in
//!
//! The crate ships no environment. Mazes, grid worlds and other simulators
//! live with the caller and implement this trait so the episode driver in
//! [`pipeline`](crate::pipeline) can run them.

use crate::Result;

/// Result of one environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next_state: usize,
    pub reward: f64,
    /// The episode ended with this step
    pub done: bool,
}

/// Discrete environment driven one action at a time
pub trait Environment {
    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Result<usize>;

    /// Apply `action` from the current state.
    fn step(&mut self, action: usize) -> Result<Transition>;
}
