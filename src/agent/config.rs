//! Agent hyperparameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the greedy branch of epsilon-greedy picks an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GreedyMode {
    /// Highest-valued legal action; ties go to the lowest index.
    #[default]
    Masked,
    /// Highest-valued action overall; a uniformly random legal action if
    /// that one is illegal.
    RandomOnIllegal,
}

/// Hyperparameters for `QLearningAgent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size for TD updates, in (0, 1].
    pub learning_rate: f64,

    /// Weight of the bootstrapped future value, in (0, 1].
    pub discount_factor: f64,

    /// Exploration rate at the start of training.
    pub initial_epsilon: f64,

    /// Linear decrement applied to epsilon after each episode.
    pub epsilon_decay: f64,

    /// Exploration floor.
    pub final_epsilon: f64,

    /// Greedy branch behaviour.
    pub greedy_mode: GreedyMode,

    /// Seed for exploration randomness.
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            discount_factor: 0.95,
            initial_epsilon: 1.0,
            epsilon_decay: 1e-4,
            final_epsilon: 0.1,
            greedy_mode: GreedyMode::Masked,
            seed: 0,
        }
    }
}

impl AgentConfig {
    /// Create a config with default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the discount factor.
    #[must_use]
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the exploration schedule.
    #[must_use]
    pub fn with_epsilon(mut self, initial: f64, decay: f64, final_epsilon: f64) -> Self {
        self.initial_epsilon = initial;
        self.epsilon_decay = decay;
        self.final_epsilon = final_epsilon;
        self
    }

    /// Set the greedy mode.
    #[must_use]
    pub fn with_greedy_mode(mut self, mode: GreedyMode) -> Self {
        self.greedy_mode = mode;
        self
    }

    /// Set the exploration seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every hyperparameter is in range.
    pub fn validate(&self) -> Result<()> {
        let unit_open = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
        let unit_closed = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);

        if !unit_open(self.learning_rate) {
            return Err(Error::config(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !unit_open(self.discount_factor) {
            return Err(Error::config(format!(
                "discount_factor must be in (0, 1], got {}",
                self.discount_factor
            )));
        }
        if !unit_closed(self.initial_epsilon) || !unit_closed(self.final_epsilon) {
            return Err(Error::config("epsilon bounds must be in [0, 1]"));
        }
        if self.final_epsilon > self.initial_epsilon {
            return Err(Error::config(format!(
                "final_epsilon {} exceeds initial_epsilon {}",
                self.final_epsilon, self.initial_epsilon
            )));
        }
        if !(self.epsilon_decay.is_finite() && self.epsilon_decay >= 0.0) {
            return Err(Error::config(format!(
                "epsilon_decay must be non-negative, got {}",
                self.epsilon_decay
            )));
        }
        Ok(())
    }
}
