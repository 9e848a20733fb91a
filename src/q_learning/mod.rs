//! Q-learning with Dyna-Q replay
//!
//! This module implements off-policy temporal difference control over a
//! dense state × action table, with optional model-based replay of past
//! transitions.
//!
//! ## Update Rule
//!
//! ```text
//! a' = argmax_a Q(s', a)
//! Q(s,a) ← (1 - α) Q(s,a) + α [r + γ Q(s', a')]
//! ```
//!
//! The bootstrap target uses the greedy next action, not the action the
//! learner goes on to take.
//!
//! ## Dyna-Q
//!
//! After each real update the transition is stored, then `dyna` further
//! updates are applied to stored transitions:
//!
//! | memory size `m` | replayed |
//! |-----------------|----------|
//! | `m <= dyna` | every stored transition, oldest first |
//! | `m > dyna` | `dyna` distinct transitions sampled uniformly |
//!
//! ## Usage Example
//!
//! ```
//! use qlearner::{LearnerConfig, QLearner};
//!
//! let config = LearnerConfig::new(100, 4)
//!     .with_alpha(0.2)   // learning rate
//!     .with_gamma(0.9)   // discount factor
//!     .with_rar(0.5)     // initial random-action rate
//!     .with_radr(0.99)   // decay per step
//!     .with_dyna(200)    // replay updates per step
//!     .with_seed(42);
//! let mut learner = QLearner::new(config).unwrap();
//!
//! let action = learner.querysetstate(0).unwrap();
//! assert!(action < 4);
//! let action = learner.query(1, -1.0).unwrap();
//! assert!(action < 4);
//! ```

pub mod agent;
pub mod memory;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::{LearnerStats, QLearner};
pub use memory::{Experience, ExperienceMemory};
pub use policy::{ActionChoice, EpsilonGreedy};
pub use q_table::QTable;
