//! Observer port - instrumentation of Q-table updates
//!
//! Every application of the update rule, whether driven by a real step or
//! by Dyna replay, is reported to the installed observers. This lets callers
//! count updates or trace value changes without touching the learner.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Where an update came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// The transition just reported through `query`
    Real,
    /// A transition replayed from experience memory
    Replay,
}

/// One application of the update rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateEvent {
    pub kind: UpdateKind,
    pub state: usize,
    pub action: usize,
    pub next_state: usize,
    pub reward: f64,
    /// Q(s,a) before the update
    pub old_value: f64,
    /// Q(s,a) after the update
    pub new_value: f64,
}

/// Observer trait for monitoring Q-table updates
///
/// Closures taking `&UpdateEvent` implement it directly.
///
/// # Examples
///
/// ```
/// use qlearner::{LearnerConfig, QLearner, ports::UpdateEvent};
///
/// let mut learner = QLearner::new(LearnerConfig::new(4, 2).with_seed(1))
///     .unwrap()
///     .with_observer(|event: &UpdateEvent| {
///         assert!(event.new_value.is_finite());
///     });
/// learner.querysetstate(0).unwrap();
/// learner.query(1, 1.0).unwrap();
/// ```
pub trait UpdateObserver: Send {
    /// Called after `Q[state][action]` has been rewritten.
    fn on_update(&mut self, event: &UpdateEvent);
}

impl<F> UpdateObserver for F
where
    F: FnMut(&UpdateEvent) + Send,
{
    fn on_update(&mut self, event: &UpdateEvent) {
        self(event)
    }
}

/// Shared counters of real and replayed updates
///
/// Clones share the same counters, so a clone can be handed to the learner
/// while the caller keeps another for reading.
#[derive(Debug, Clone, Default)]
pub struct UpdateCounter {
    real: Arc<AtomicUsize>,
    replay: Arc<AtomicUsize>,
}

impl UpdateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn real(&self) -> usize {
        self.real.load(Ordering::Relaxed)
    }

    pub fn replay(&self) -> usize {
        self.replay.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.real() + self.replay()
    }

    pub fn reset(&self) {
        self.real.store(0, Ordering::Relaxed);
        self.replay.store(0, Ordering::Relaxed);
    }
}

impl UpdateObserver for UpdateCounter {
    fn on_update(&mut self, event: &UpdateEvent) {
        let counter = match event.kind {
            UpdateKind::Real => &self.real,
            UpdateKind::Replay => &self.replay,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
