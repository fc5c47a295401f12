//! Epsilon-greedy tabular Q-learning agent.
//!
//! The agent owns its value table and exploration rate for the whole run.
//! It is mutated only through `get_action` (which consumes randomness),
//! `update`, and `decay_epsilon`.

use crate::core::{ActionMask, GameRng, Observation};
use crate::error::{Error, Result};

use super::config::{AgentConfig, GreedyMode};
use super::q_table::QTable;

/// Off-policy TD control over a sparse Q-table.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    config: AgentConfig,
    table: QTable,
    epsilon: f64,
    rng: GameRng,
    training_error: Vec<f64>,
}

impl QLearningAgent {
    /// Create an agent for an action space of `action_count` actions.
    ///
    /// Fails with `Error::InvalidConfig` if any hyperparameter is out of range.
    pub fn new(config: AgentConfig, action_count: usize) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            epsilon: config.initial_epsilon,
            rng: GameRng::new(config.seed),
            table: QTable::new(action_count),
            training_error: Vec::new(),
            config,
        })
    }

    /// Epsilon-greedy action among the legal entries of `mask`.
    ///
    /// Returns `Error::NoLegalActions` for an empty mask.
    pub fn get_action(&mut self, observation: &Observation, mask: &ActionMask) -> Result<usize> {
        if mask.has_no_legal() {
            return Err(Error::NoLegalActions);
        }
        if self.rng.gen_bool(self.epsilon) {
            return mask.sample_random(&mut self.rng).ok_or(Error::NoLegalActions);
        }

        let row = self.table.row(observation);
        match self.config.greedy_mode {
            GreedyMode::Masked => mask.sample_greedy(row).ok_or(Error::NoLegalActions),
            GreedyMode::RandomOnIllegal => match argmax(row) {
                Some(best) if mask.is_legal(best) => Ok(best),
                _ => mask.sample_random(&mut self.rng).ok_or(Error::NoLegalActions),
            },
        }
    }

    /// Highest-valued legal action, ignoring epsilon. Does not touch the table.
    pub fn best_action(&self, observation: &Observation, mask: &ActionMask) -> Result<usize> {
        let action = match self.table.get(observation) {
            Some(row) => mask.sample_greedy(row),
            // an unseen row is all zeros, so the first legal index wins
            None => mask.legal_indices().first().copied(),
        };
        action.ok_or(Error::NoLegalActions)
    }

    /// Q-learning update for one transition. Returns the temporal difference.
    ///
    /// ```text
    /// future = 0 if terminated else max(Q[next])
    /// error  = reward + gamma * future - Q[obs][action]
    /// Q[obs][action] += alpha * error
    /// ```
    ///
    /// The table is left unchanged if the reward or the result is not finite.
    pub fn update(
        &mut self,
        observation: &Observation,
        action: usize,
        reward: f64,
        terminated: bool,
        next_observation: &Observation,
    ) -> Result<f64> {
        let action_count = self.table.action_count();
        if action >= action_count {
            return Err(Error::ActionOutOfRange {
                action,
                action_count,
            });
        }
        if !reward.is_finite() {
            return Err(Error::NonFinite {
                what: "reward",
                value: reward,
            });
        }

        let future = if terminated {
            0.0
        } else {
            self.table.max_value(next_observation)
        };
        let current = self.table.row(observation)[action];
        let error = reward + self.config.discount_factor * future - current;
        let updated = current + self.config.learning_rate * error;
        if !updated.is_finite() {
            return Err(Error::NonFinite {
                what: "action value",
                value: updated,
            });
        }

        self.table.row_mut(observation)[action] = updated;
        self.training_error.push(error);
        Ok(error)
    }

    /// Linear decay toward `final_epsilon`. Returns the new epsilon.
    pub fn decay_epsilon(&mut self) -> f64 {
        self.epsilon = (self.epsilon - self.config.epsilon_decay).max(self.config.final_epsilon);
        self.epsilon
    }

    /// Current exploration rate.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The value table.
    #[must_use]
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Every temporal difference recorded by `update`, in order.
    #[must_use]
    pub fn training_error(&self) -> &[f64] {
        &self.training_error
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// First index of the maximum value.
fn argmax(row: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in row.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}
