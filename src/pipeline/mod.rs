//! Training pipeline abstractions
//!
//! This module drives a [`Learner`] through episodes of an external
//! [`Environment`]. The environment itself always lives with the caller.

pub mod training;

pub use training::{EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult, run_episode};

pub use crate::ports::{Environment, Learner};
