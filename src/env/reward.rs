//! Reward shaping.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rules::GameOutcome;

/// Shaping constants.
///
/// Per-step reward is the positive score gain divided by `score_scale`. A
/// terminal step is rewarded by outcome alone, ignoring that step's gain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Divisor applied to positive score deltas.
    pub score_scale: f64,

    /// Reward for the step that wins the game.
    pub win_reward: f64,

    /// Reward for the step that loses the game.
    pub loss_reward: f64,

    /// Reward for requesting an illegal action. Should be strongly negative.
    pub illegal_action_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            score_scale: 100.0,
            win_reward: 10.0,
            loss_reward: 0.0,
            illegal_action_penalty: -100.0,
        }
    }
}

impl RewardConfig {
    /// Create a reward config with default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score delta divisor.
    #[must_use]
    pub fn with_score_scale(mut self, scale: f64) -> Self {
        self.score_scale = scale;
        self
    }

    /// Set the win reward.
    #[must_use]
    pub fn with_win_reward(mut self, reward: f64) -> Self {
        self.win_reward = reward;
        self
    }

    /// Set the loss reward.
    #[must_use]
    pub fn with_loss_reward(mut self, reward: f64) -> Self {
        self.loss_reward = reward;
        self
    }

    /// Set the illegal action penalty.
    #[must_use]
    pub fn with_illegal_action_penalty(mut self, penalty: f64) -> Self {
        self.illegal_action_penalty = penalty;
        self
    }

    /// Check that every constant is finite and the scale is positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.score_scale.is_finite() && self.score_scale > 0.0) {
            return Err(Error::config(format!(
                "score_scale must be positive and finite, got {}",
                self.score_scale
            )));
        }
        for (name, value) in [
            ("win_reward", self.win_reward),
            ("loss_reward", self.loss_reward),
            ("illegal_action_penalty", self.illegal_action_penalty),
        ] {
            if !value.is_finite() {
                return Err(Error::config(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Reward for a non-terminal step. Score losses are not penalized.
    #[must_use]
    pub fn step_reward(&self, score_before: i64, score_after: i64) -> f64 {
        let delta = score_after.saturating_sub(score_before).max(0);
        delta as f64 / self.score_scale
    }

    /// Reward for the step that ended the game.
    #[must_use]
    pub fn terminal_reward(&self, outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::Win => self.win_reward,
            GameOutcome::Loss => self.loss_reward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_reward_scales_gain() {
        let reward = RewardConfig::default();
        assert_eq!(reward.step_reward(100, 350), 2.5);
        assert_eq!(reward.step_reward(0, 0), 0.0);
    }

    #[test]
    fn test_step_reward_ignores_losses() {
        let reward = RewardConfig::default();
        assert_eq!(reward.step_reward(500, 100), 0.0);
        assert_eq!(reward.step_reward(i64::MAX, i64::MIN), 0.0);
    }

    #[test]
    fn test_terminal_reward() {
        let reward = RewardConfig::default()
            .with_win_reward(20.0)
            .with_loss_reward(-1.0);
        assert_eq!(reward.terminal_reward(GameOutcome::Win), 20.0);
        assert_eq!(reward.terminal_reward(GameOutcome::Loss), -1.0);
    }

    #[test]
    fn test_validate() {
        assert!(RewardConfig::default().validate().is_ok());
        assert!(RewardConfig::default()
            .with_score_scale(0.0)
            .validate()
            .is_err());
        assert!(RewardConfig::default()
            .with_win_reward(f64::NAN)
            .validate()
            .is_err());
        assert!(RewardConfig::default()
            .with_illegal_action_penalty(f64::NEG_INFINITY)
            .validate()
            .is_err());
    }
}
