//! Common test utilities for the qlearner test suite.
//!
//! Small deterministic environments and numeric helpers shared across tests.

#![allow(dead_code)]

use qlearner::{
    Error, Result,
    ports::{Environment, Transition},
};

/// Absolute-tolerance float comparison.
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_tol(a, b, 1e-9)
}

pub fn approx_eq_tol(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Two-state, two-action MDP.
///
/// From state 0, action 0 moves to state 1 with reward +1 and action 1 stays
/// in state 0 with reward -1. From state 1 every action returns to state 0
/// with reward 0.
#[derive(Debug, Default)]
pub struct TwoStateMdp {
    pub state: usize,
}

impl TwoStateMdp {
    pub fn transition(state: usize, action: usize) -> (usize, f64) {
        match (state, action) {
            (0, 0) => (1, 1.0),
            (0, _) => (0, -1.0),
            _ => (0, 0.0),
        }
    }
}

impl Environment for TwoStateMdp {
    fn reset(&mut self) -> Result<usize> {
        self.state = 0;
        Ok(0)
    }

    fn step(&mut self, action: usize) -> Result<Transition> {
        if action > 1 {
            return Err(Error::Environment {
                message: format!("action {action} not available"),
            });
        }
        let (next_state, reward) = Self::transition(self.state, action);
        self.state = next_state;
        Ok(Transition {
            next_state,
            reward,
            done: false,
        })
    }
}

/// Square grid with the goal in the far corner.
///
/// Actions: 0 = north, 1 = east, 2 = south, 3 = west. Moving into a wall
/// leaves the position unchanged. Every step costs -1; reaching the goal
/// pays +1 and ends the episode.
#[derive(Debug)]
pub struct GridMaze {
    pub size: usize,
    pub row: usize,
    pub col: usize,
}

impl GridMaze {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            row: 0,
            col: 0,
        }
    }

    pub fn num_states(&self) -> usize {
        self.size * self.size
    }

    fn state(&self) -> usize {
        self.row * self.size + self.col
    }
}

impl Environment for GridMaze {
    fn reset(&mut self) -> Result<usize> {
        self.row = 0;
        self.col = 0;
        Ok(self.state())
    }

    fn step(&mut self, action: usize) -> Result<Transition> {
        match action {
            0 => self.row = self.row.saturating_sub(1),
            1 => self.col = (self.col + 1).min(self.size - 1),
            2 => self.row = (self.row + 1).min(self.size - 1),
            3 => self.col = self.col.saturating_sub(1),
            _ => {
                return Err(Error::Environment {
                    message: format!("action {action} not available"),
                });
            }
        }
        let done = self.row == self.size - 1 && self.col == self.size - 1;
        Ok(Transition {
            next_state: self.state(),
            reward: if done { 1.0 } else { -1.0 },
            done,
        })
    }
}
