//! Episode driver connecting a learner to an external environment

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, Learner},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to run
    pub num_episodes: usize,

    /// Step cap per episode; an episode that hits it ends without terminating
    pub max_steps: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 500,
            max_steps: 10_000,
        }
    }
}

/// Outcome of one episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Environment steps taken
    pub steps: usize,
    /// Sum of rewards received
    pub total_reward: f64,
    /// The environment reported `done` before the step cap
    pub terminated: bool,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Per-episode summaries in order
    pub episodes: Vec<EpisodeSummary>,
}

impl TrainingResult {
    pub fn total_steps(&self) -> usize {
        self.episodes.iter().map(|e| e.steps).sum()
    }

    /// Mean total reward per episode, 0.0 for an empty run
    pub fn mean_reward(&self) -> f64 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        self.episodes.iter().map(|e| e.total_reward).sum::<f64>() / self.episodes.len() as f64
    }

    pub fn last(&self) -> Option<&EpisodeSummary> {
        self.episodes.last()
    }
}

/// Run one episode.
///
/// The learner is anchored with `querysetstate(env.reset())`, then every
/// environment step is reported through `query` and the returned action is
/// fed back into the environment.
pub fn run_episode(
    learner: &mut dyn Learner,
    env: &mut dyn Environment,
    max_steps: usize,
) -> Result<EpisodeSummary> {
    let start = env.reset()?;
    let mut action = learner.querysetstate(start)?;
    let mut steps = 0;
    let mut total_reward = 0.0;
    let mut terminated = false;

    while steps < max_steps {
        let transition = env.step(action)?;
        total_reward += transition.reward;
        action = learner.query(transition.next_state, transition.reward)?;
        steps += 1;
        if transition.done {
            terminated = true;
            break;
        }
    }

    Ok(EpisodeSummary {
        steps,
        total_reward,
        terminated,
    })
}

/// Training pipeline running a learner for a fixed number of episodes
pub struct TrainingPipeline {
    config: TrainingConfig,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run training with the given learner and environment
    pub fn run(
        &self,
        learner: &mut dyn Learner,
        env: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        let mut episodes = Vec::with_capacity(self.config.num_episodes);

        for episode in 0..self.config.num_episodes {
            let summary = run_episode(learner, env, self.config.max_steps)?;
            log::debug!(
                "[TRAIN] {} episode {episode}: steps={} reward={} terminated={}",
                learner.name(),
                summary.steps,
                summary.total_reward,
                summary.terminated
            );
            episodes.push(summary);
        }

        let result = TrainingResult { episodes };
        log::info!(
            "[TRAIN] {} finished {} episodes ({} steps, mean reward {:.3})",
            learner.name(),
            result.episodes.len(),
            result.total_steps(),
            result.mean_reward()
        );
        Ok(result)
    }
}
