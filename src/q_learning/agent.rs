//! Tabular Q-learner with Dyna-Q replay
//!
//! The learner keeps a dense Q-table, an ε-greedy policy with a decaying
//! random-action rate, and a memory of every transition it has seen. Each
//! real step applies one Q-learning update and then `dyna` replayed updates
//! drawn from memory.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    config::LearnerConfig,
    ports::{Learner, UpdateEvent, UpdateKind, UpdateObserver},
    q_learning::{
        memory::{Experience, ExperienceMemory},
        policy::EpsilonGreedy,
        q_table::QTable,
    },
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Running counters for one learner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerStats {
    /// Calls to `query`
    pub steps: usize,
    /// Updates from real transitions
    pub real_updates: usize,
    /// Updates from Dyna replay
    pub replay_updates: usize,
    /// Actions drawn at random
    pub random_actions: usize,
    /// Actions taken greedily
    pub greedy_actions: usize,
}

/// Q-learning agent (off-policy TD control) with optional Dyna-Q replay
///
/// The learner is either *uninitialized* (no current state) or *tracking* a
/// current `(state, action)` pair. [`querysetstate`](Self::querysetstate)
/// moves it into tracking; [`query`](Self::query) requires it.
///
/// # Examples
///
/// ```
/// use qlearner::{LearnerConfig, QLearner};
///
/// let config = LearnerConfig::new(2, 2)
///     .with_alpha(0.5)
///     .with_gamma(0.9)
///     .with_rar(0.0)
///     .with_radr(1.0);
/// let mut learner = QLearner::new(config).unwrap();
///
/// assert_eq!(learner.querysetstate(0).unwrap(), 0);
/// assert_eq!(learner.query(1, 1.0).unwrap(), 0);
/// assert_eq!(learner.q_value(0, 0).unwrap(), 0.5);
/// ```
pub struct QLearner<R = StdRng> {
    config: LearnerConfig,
    q_table: QTable,
    policy: EpsilonGreedy,
    memory: ExperienceMemory,
    current: Option<(usize, usize)>,
    rng: R,
    stats: LearnerStats,
    observers: Vec<Box<dyn UpdateObserver>>,
}

impl QLearner<StdRng> {
    /// Create a learner whose random source is seeded from `config.seed`,
    /// or from the thread RNG when no seed is set.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        let rng = build_rng(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> QLearner<R> {
    /// Create a learner drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored here; the injected generator is used as is.
    pub fn with_rng(config: LearnerConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let memory = match config.replay_capacity {
            Some(capacity) => ExperienceMemory::with_capacity(capacity),
            None => ExperienceMemory::new(),
        };
        Ok(Self {
            q_table: QTable::new(
                config.num_states,
                config.num_actions,
                config.alpha,
                config.gamma,
            ),
            policy: EpsilonGreedy::new(config.rar, config.radr),
            memory,
            current: None,
            rng,
            stats: LearnerStats::default(),
            observers: Vec::new(),
            config,
        })
    }

    /// Install an observer notified after every update.
    pub fn with_observer(mut self, observer: impl UpdateObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Update the state without learning.
    ///
    /// Nothing is written to the Q-table or the experience memory and the
    /// random-action rate is left alone.
    pub fn querysetstate(&mut self, state: usize) -> Result<usize> {
        let action = self.choose_action(state)?;
        self.current = Some((state, action));

        if self.config.verbose {
            log::info!("[QLEARNER] set state s={state} a={action}");
        }

        Ok(action)
    }

    /// Learn from the transition into `next_state` and return the next action.
    ///
    /// # Errors
    ///
    /// [`Error::NotTracking`] if `querysetstate` has not been called yet,
    /// [`Error::StateOutOfRange`] if `next_state` is outside the table. In
    /// both cases the learner is left untouched.
    pub fn query(&mut self, next_state: usize, reward: f64) -> Result<usize> {
        let (state, action) = self.current.ok_or(Error::NotTracking)?;
        self.q_table.check_state(next_state)?;

        let experience = Experience::new(state, action, next_state, reward);
        self.apply_update(experience, UpdateKind::Real)?;
        self.memory.push(experience);

        if self.config.dyna > 0 {
            let batch = self.memory.replay_batch(self.config.dyna, &mut self.rng);
            for replayed in batch {
                self.apply_update(replayed, UpdateKind::Replay)?;
            }
        }

        self.policy.decay();

        let next_action = self.choose_action(next_state)?;
        self.current = Some((next_state, next_action));
        self.stats.steps += 1;

        if self.config.verbose {
            log::info!(
                "[QLEARNER] step {} s={state} a={action} s'={next_state} r={reward} a'={next_action} rar={:.6}",
                self.stats.steps,
                self.policy.rar(),
            );
        }

        Ok(next_action)
    }

    /// Greedy action for `state`; ties go to the lowest action index.
    pub fn argmax(&self, state: usize) -> Result<usize> {
        self.q_table.greedy_action(state)
    }

    /// Apply the Q-learning update for one transition and notify observers.
    ///
    /// Returns `(next_state, greedy_next_action)`.
    fn apply_update(&mut self, experience: Experience, kind: UpdateKind) -> Result<(usize, usize)> {
        let Experience {
            state,
            action,
            next_state,
            reward,
        } = experience;

        let old_value = self.q_table.get(state, action)?;
        let result = self
            .q_table
            .q_learning_update(state, action, next_state, reward)?;
        let new_value = self.q_table.get(state, action)?;

        match kind {
            UpdateKind::Real => self.stats.real_updates += 1,
            UpdateKind::Replay => self.stats.replay_updates += 1,
        }

        log::trace!(
            "[QLEARNER] {kind:?} update Q[{state}][{action}] {old_value} -> {new_value} (s'={next_state}, r={reward})"
        );

        if !self.observers.is_empty() {
            let event = UpdateEvent {
                kind,
                state,
                action,
                next_state,
                reward,
                old_value,
                new_value,
            };
            for observer in &mut self.observers {
                observer.on_update(&event);
            }
        }

        Ok(result)
    }

    /// Shared ε-greedy selection used by both `querysetstate` and `query`
    fn choose_action(&mut self, state: usize) -> Result<usize> {
        let choice = self.policy.select(&self.q_table, state, &mut self.rng)?;
        if choice.explored {
            self.stats.random_actions += 1;
        } else {
            self.stats.greedy_actions += 1;
        }
        Ok(choice.action)
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_value(&self, state: usize, action: usize) -> Result<f64> {
        self.q_table.get(state, action)
    }

    /// Current random-action rate
    pub fn rar(&self) -> f64 {
        self.policy.rar()
    }

    pub fn memory(&self) -> &ExperienceMemory {
        &self.memory
    }

    /// Current `(state, action)`, or `None` before the first `querysetstate`
    pub fn current(&self) -> Option<(usize, usize)> {
        self.current
    }

    pub fn stats(&self) -> &LearnerStats {
        &self.stats
    }
}

impl<R> fmt::Debug for QLearner<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QLearner")
            .field("config", &self.config)
            .field("rar", &self.policy.rar())
            .field("current", &self.current)
            .field("memory_len", &self.memory.len())
            .field("stats", &self.stats)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<R: Rng + Send> Learner for QLearner<R> {
    fn querysetstate(&mut self, state: usize) -> Result<usize> {
        QLearner::querysetstate(self, state)
    }

    fn query(&mut self, next_state: usize, reward: f64) -> Result<usize> {
        QLearner::query(self, next_state, reward)
    }

    fn name(&self) -> &str {
        if self.config.dyna > 0 {
            "Dyna-Q"
        } else {
            "Q-Learning"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::UpdateCounter;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn greedy_config(num_states: usize, num_actions: usize) -> LearnerConfig {
        LearnerConfig::new(num_states, num_actions)
            .with_alpha(0.5)
            .with_gamma(0.9)
            .with_rar(0.0)
            .with_radr(1.0)
    }

    #[test]
    fn test_end_to_end_example() {
        let mut learner = QLearner::new(greedy_config(2, 2)).unwrap();
        assert_eq!(learner.querysetstate(0).unwrap(), 0);
        let next = learner.query(1, 1.0).unwrap();
        assert_eq!(next, 0);
        assert!(approx_eq(learner.q_value(0, 0).unwrap(), 0.5));
        assert_eq!(learner.q_value(0, 1).unwrap(), 0.0);
        assert_eq!(learner.current(), Some((1, 0)));
    }

    #[test]
    fn test_query_before_querysetstate_fails() {
        let mut learner = QLearner::new(greedy_config(2, 2)).unwrap();
        assert!(matches!(learner.query(1, 1.0), Err(Error::NotTracking)));
        assert!(learner.memory().is_empty());
        assert_eq!(learner.stats().steps, 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            QLearner::new(LearnerConfig::new(0, 4)),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            QLearner::new(LearnerConfig::new(4, 0)),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_oversized_table_rejected() {
        // The cell count overflows usize.
        let config = LearnerConfig::new(usize::MAX / 2 + 1, 2);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            QLearner::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));

        // The cell count fits but the byte size does not.
        assert!(matches!(
            QLearner::new(LearnerConfig::new(usize::MAX, 1)),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_querysetstate_does_not_learn() {
        let config = greedy_config(3, 2).with_rar(0.7).with_radr(0.5).with_seed(4);
        let mut learner = QLearner::new(config).unwrap();
        for s in [0, 1, 2, 1, 0] {
            let a = learner.querysetstate(s).unwrap();
            assert!(a < 2);
            assert_eq!(learner.current(), Some((s, a)));
        }
        assert!(learner.q_table().rows().all(|row| row.iter().all(|&q| q == 0.0)));
        assert!(learner.memory().is_empty());
        assert_eq!(learner.rar(), 0.7);
    }

    #[test]
    fn test_out_of_range_states_leave_learner_untouched() {
        let mut learner = QLearner::new(greedy_config(2, 2)).unwrap();
        assert!(matches!(
            learner.querysetstate(2),
            Err(Error::StateOutOfRange { state: 2, .. })
        ));
        assert_eq!(learner.current(), None);

        learner.querysetstate(0).unwrap();
        assert!(learner.query(5, 1.0).is_err());
        assert_eq!(learner.current(), Some((0, 0)));
        assert!(learner.memory().is_empty());
        assert!(learner.argmax(9).is_err());
    }

    #[test]
    fn test_rar_decays_once_per_query() {
        let config = greedy_config(4, 2).with_rar(0.5).with_radr(0.9).with_seed(11);
        let mut learner = QLearner::new(config).unwrap();
        learner.querysetstate(0).unwrap();
        for i in 0..25 {
            learner.query((i + 1) % 4, 0.0).unwrap();
        }
        assert!((learner.rar() - 0.5 * 0.9f64.powi(25)).abs() < 1e-12);
    }

    #[test]
    fn test_replay_all_at_boundary() {
        // dyna == memory length after the append: every stored experience is replayed.
        let counter = UpdateCounter::new();
        let mut learner = QLearner::new(greedy_config(3, 1).with_dyna(2))
            .unwrap()
            .with_observer(counter.clone());

        learner.querysetstate(0).unwrap();
        learner.query(1, 1.0).unwrap(); // memory 1, replays 1
        learner.query(2, 1.0).unwrap(); // memory 2, replays 2
        assert_eq!(counter.real(), 2);
        assert_eq!(counter.replay(), 3);

        learner.query(0, 1.0).unwrap(); // memory 3 > dyna, replays 2
        assert_eq!(counter.replay(), 5);
        assert_eq!(learner.stats().replay_updates, 5);
    }

    #[test]
    fn test_replay_order_when_replaying_all() {
        let mut seen = Vec::new();
        let (tx, rx) = std::sync::mpsc::channel();
        let mut learner = QLearner::new(greedy_config(4, 1).with_dyna(10))
            .unwrap()
            .with_observer(move |event: &UpdateEvent| {
                tx.send((event.kind, event.state)).unwrap();
            });

        learner.querysetstate(0).unwrap();
        learner.query(1, 0.0).unwrap();
        learner.query(2, 0.0).unwrap();
        learner.query(3, 0.0).unwrap();
        seen.extend(rx.try_iter());

        let last_step: Vec<(UpdateKind, usize)> = seen[seen.len() - 4..].to_vec();
        assert_eq!(
            last_step,
            vec![
                (UpdateKind::Real, 2),
                (UpdateKind::Replay, 0),
                (UpdateKind::Replay, 1),
                (UpdateKind::Replay, 2),
            ]
        );
    }

    #[test]
    fn test_learner_port_name() {
        let plain = QLearner::new(greedy_config(2, 2)).unwrap();
        let dyna = QLearner::new(greedy_config(2, 2).with_dyna(5)).unwrap();
        assert_eq!(Learner::name(&plain), "Q-Learning");
        assert_eq!(Learner::name(&dyna), "Dyna-Q");
    }
}
