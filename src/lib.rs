//! Tabular Q-learning agent with Dyna-Q replay
//!
//! This crate provides:
//! - A dense Q-table with deterministic greedy tie-breaking
//! - An ε-greedy policy whose random-action rate decays every step
//! - The Q-learning update and Dyna-Q replay of remembered transitions
//! - Trait boundaries for environments, learners and update observers
//! - A small episode driver for external environments

pub mod config;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use config::LearnerConfig;
pub use error::{Error, Result};
pub use q_learning::{Experience, ExperienceMemory, LearnerStats, QLearner, QTable};
