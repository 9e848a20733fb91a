//! Experience memory for Dyna-Q replay
//!
//! Every real step appends one [`Experience`]. By default nothing is ever
//! evicted, so a long-lived learner holds one entry per step it has taken.
//! Setting a capacity turns the store into a ring buffer that drops the
//! oldest experience first.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One observed transition `(s, a, s', r)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: usize,
    pub action: usize,
    pub next_state: usize,
    pub reward: f64,
}

impl Experience {
    pub fn new(state: usize, action: usize, next_state: usize, reward: f64) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }
}

/// Ordered store of past transitions
#[derive(Debug, Clone, Default)]
pub struct ExperienceMemory {
    entries: VecDeque<Experience>,
    capacity: Option<usize>,
}

impl ExperienceMemory {
    /// Unbounded memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring buffer holding at most `capacity` experiences
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn push(&mut self, experience: Experience) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(experience);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Experience> {
        self.entries.get(index)
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.entries.iter()
    }

    /// Transitions to replay for `count` Dyna updates.
    ///
    /// When `count` covers the whole memory (including `count == len`) every
    /// stored experience is returned in insertion order. Otherwise `count`
    /// distinct experiences are drawn uniformly without replacement.
    pub fn replay_batch<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Experience> {
        if count >= self.entries.len() {
            return self.entries.iter().copied().collect();
        }
        rand::seq::index::sample(rng, self.entries.len(), count)
            .into_iter()
            .map(|idx| self.entries[idx])
            .collect()
    }
}
