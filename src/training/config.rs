//! Training run configuration.

use serde::{Deserialize, Serialize};

use crate::agent::AgentConfig;
use crate::error::{Error, Result};

/// Configuration for a training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Total training episodes.
    pub n_episodes: usize,

    /// Agent hyperparameters (learning rate, discount, epsilon schedule).
    pub agent: AgentConfig,

    /// Window for rolling means in `TrainingStats`.
    pub rolling_window: usize,

    /// Log progress every this many episodes. 0 = never.
    pub log_interval: usize,

    /// Maximum steps per episode (to prevent endless games).
    pub max_episode_steps: usize,

    /// Seed for the environment at the start of the run.
    pub seed: u64,

    /// Derive `agent.epsilon_decay` from `n_episodes` when the agent is built.
    #[serde(default)]
    pub linear_decay: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_episodes: 10_000,
            agent: AgentConfig::default(),
            rolling_window: 10,
            log_interval: 1_000,
            max_episode_steps: 1_000,
            seed: 0,
            linear_decay: false,
        }
    }
}

impl TrainingConfig {
    /// Create a training config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of episodes.
    pub fn with_episodes(mut self, n_episodes: usize) -> Self {
        self.n_episodes = n_episodes;
        self
    }

    /// Set the agent hyperparameters.
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Set the rolling mean window.
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    /// Set the progress log interval.
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Set the per-episode step limit.
    pub fn with_max_episode_steps(mut self, max: usize) -> Self {
        self.max_episode_steps = max;
        self
    }

    /// Set the environment seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Spread the epsilon decay so the floor is reached halfway through the run.
    ///
    /// `epsilon_decay = initial_epsilon / (n_episodes / 2)`, computed by
    /// `agent_config` from the final `n_episodes` and `agent` values, so the
    /// builder order does not matter. Overrides `agent.epsilon_decay`.
    pub fn with_linear_decay(mut self) -> Self {
        self.linear_decay = true;
        self
    }

    /// Agent hyperparameters with the run-level epsilon schedule applied.
    #[must_use]
    pub fn agent_config(&self) -> AgentConfig {
        let mut agent = self.agent.clone();
        let half = self.n_episodes as f64 / 2.0;
        if self.linear_decay && half > 0.0 {
            agent.epsilon_decay = agent.initial_epsilon / half;
        }
        agent
    }

    /// Check the run and agent settings.
    pub fn validate(&self) -> Result<()> {
        if self.rolling_window == 0 {
            return Err(Error::config("rolling_window must be positive"));
        }
        if self.max_episode_steps == 0 {
            return Err(Error::config("max_episode_steps must be positive"));
        }
        self.agent_config().validate()
    }

    /// Whether progress should be logged after `episode` (1-based).
    pub fn should_log(&self, episode: usize) -> bool {
        self.log_interval > 0 && episode % self.log_interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TrainingConfig::default();
        assert_eq!(config.n_episodes, 10_000);
        assert_eq!(config.rolling_window, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_linear_decay() {
        let config = TrainingConfig::new()
            .with_episodes(1_000)
            .with_agent(AgentConfig::new().with_epsilon(1.0, 0.0, 0.1))
            .with_linear_decay();
        assert!((config.agent_config().epsilon_decay - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_linear_decay_ignores_builder_order() {
        let agent = AgentConfig::new().with_epsilon(0.5, 0.3, 0.1);
        let decay_first = TrainingConfig::new()
            .with_linear_decay()
            .with_episodes(100)
            .with_agent(agent.clone());
        let decay_last = TrainingConfig::new()
            .with_episodes(100)
            .with_agent(agent)
            .with_linear_decay();

        assert!((decay_first.agent_config().epsilon_decay - 0.01).abs() < 1e-12);
        assert_eq!(decay_first.agent_config(), decay_last.agent_config());
        // the stored agent keeps its own decay
        assert_eq!(decay_first.agent.epsilon_decay, 0.3);
    }

    #[test]
    fn test_agent_config_without_linear_decay() {
        let agent = AgentConfig::new().with_epsilon(1.0, 0.25, 0.0);
        let config = TrainingConfig::new()
            .with_episodes(10)
            .with_agent(agent.clone());
        assert_eq!(config.agent_config(), agent);
    }

    #[test]
    fn test_linear_decay_zero_episodes() {
        let config = TrainingConfig::new().with_episodes(0).with_linear_decay();
        assert_eq!(config.agent_config().epsilon_decay, AgentConfig::default().epsilon_decay);
    }

    #[test]
    fn test_should_log() {
        let config = TrainingConfig::new().with_log_interval(5);
        assert!(!config.should_log(4));
        assert!(config.should_log(5));
        assert!(config.should_log(10));
        assert!(!TrainingConfig::new().with_log_interval(0).should_log(5));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TrainingConfig::new()
            .with_rolling_window(0)
            .validate()
            .is_err());
        assert!(TrainingConfig::new()
            .with_max_episode_steps(0)
            .validate()
            .is_err());
        let bad_agent = AgentConfig::new().with_discount_factor(2.0);
        assert!(TrainingConfig::new()
            .with_agent(bad_agent)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serialization() {
        let config = TrainingConfig::new().with_episodes(50).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: TrainingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
