//! Environment adapter over a `CardEngine`.
//!
//! Owns exactly one live engine per episode and exposes a uniform
//! reset/step contract: observations come out encoded, rewards come out
//! shaped, and illegal actions never reach the engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    ActionLayout, ActionMask, EngineConfig, GameRng, Observation, ObservationEncoder, RawState,
};
use crate::error::{EngineError, Error, Result};
use crate::rules::CardEngine;

use super::reward::RewardConfig;

/// Diagnostic for an engine state the adapter could not continue from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anomaly {
    /// The game was not over but no action was legal.
    EmptyActionMask,
}

/// Side information returned with every step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepInfo {
    /// Raw score after the step.
    pub score: i64,
    /// Raw target score after the step.
    pub target: i64,
    /// `target - score`.
    pub score_gap: i64,
    /// The requested action was not legal and was not forwarded.
    pub illegal_action: bool,
    /// The engine refused an action its own mask reported legal.
    pub engine_error: Option<EngineError>,
    /// Set when the episode was ended by the adapter rather than the engine.
    pub anomaly: Option<Anomaly>,
}

impl StepInfo {
    fn from_state(state: &RawState) -> Self {
        Self {
            score: state.score,
            target: state.target,
            score_gap: state.target.saturating_sub(state.score),
            illegal_action: false,
            engine_error: None,
            anomaly: None,
        }
    }
}

/// Result of one `Environment::step`.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    /// Always equal to `terminated`; there is no separate time limit.
    pub truncated: bool,
    pub info: StepInfo,
}

impl Step {
    /// Whether the episode ended on this step.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Reset/step environment around a single engine instance.
pub struct Environment<E: CardEngine> {
    config: EngineConfig,
    layout: ActionLayout,
    encoder: ObservationEncoder,
    reward: RewardConfig,
    rng: GameRng,
    engine: E,
    episode_seed: u64,
    steps: usize,
    done: bool,
    anomaly: Option<Anomaly>,
}

impl<E: CardEngine> Environment<E> {
    /// Validate the configuration and start the first episode.
    pub fn new(config: EngineConfig, reward: RewardConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        reward.validate()?;

        let mut rng = GameRng::new(seed);
        let episode_seed = rng.next_seed();
        let engine = E::new(&config, episode_seed);

        let mut env = Self {
            layout: ActionLayout::from_config(&config),
            encoder: ObservationEncoder::from_config(&config),
            config,
            reward,
            rng,
            engine,
            episode_seed,
            steps: 0,
            done: false,
            anomaly: None,
        };
        env.check_fresh_engine();
        Ok(env)
    }

    /// Replace the engine with a fresh one and return its observation.
    ///
    /// With `Some(seed)` the adapter's RNG is reseeded first, so the same seed
    /// always produces the same game.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = GameRng::new(seed);
        }
        self.episode_seed = self.rng.next_seed();
        self.engine = E::new(&self.config, self.episode_seed);
        self.steps = 0;
        self.anomaly = None;
        self.check_fresh_engine();

        debug!(episode_seed = self.episode_seed, "environment reset");
        self.observe()
    }

    fn check_fresh_engine(&mut self) {
        self.done = self.engine.is_terminated();
        if !self.done && self.engine.legal_action_mask().has_no_legal() {
            warn!(
                episode_seed = self.episode_seed,
                "fresh engine has no legal actions; ending episode"
            );
            self.done = true;
            self.anomaly = Some(Anomaly::EmptyActionMask);
        }
    }

    /// Apply an action index to the live engine.
    ///
    /// Illegal indices are answered with the illegal-action penalty and leave
    /// the engine untouched. Returns `Error::EpisodeFinished` once the episode
    /// has ended.
    pub fn step(&mut self, action: usize) -> Result<Step> {
        if self.done {
            return Err(Error::EpisodeFinished);
        }
        self.steps += 1;

        let before = self.engine.raw_state();
        if !self.engine.legal_action_mask().is_legal(action) {
            debug!(action, "illegal action not forwarded to engine");
            return Ok(self.penalty_step(&before, None));
        }
        if let Err(err) = self.engine.apply_action(action) {
            warn!(action, error = %err, "engine rejected an action its mask allowed");
            return Ok(self.penalty_step(&before, Some(err)));
        }

        let after = self.engine.raw_state();
        let mut info = StepInfo::from_state(&after);
        let (reward, terminated) = match self.engine.outcome() {
            Some(outcome) => (self.reward.terminal_reward(outcome), true),
            // an anomaly step earns nothing, whatever the score did
            None if self.engine.legal_action_mask().has_no_legal() => {
                warn!(
                    action,
                    step = self.steps,
                    "no legal actions in a live game; ending episode"
                );
                info.anomaly = Some(Anomaly::EmptyActionMask);
                (0.0, true)
            }
            None => (self.reward.step_reward(before.score, after.score), false),
        };

        self.done = terminated;
        self.anomaly = info.anomaly;

        Ok(Step {
            observation: self.encoder.encode(&after),
            reward,
            terminated,
            truncated: terminated,
            info,
        })
    }

    fn penalty_step(&self, state: &RawState, engine_error: Option<EngineError>) -> Step {
        let mut info = StepInfo::from_state(state);
        info.illegal_action = true;
        info.engine_error = engine_error;
        Step {
            observation: self.encoder.encode(state),
            reward: self.reward.illegal_action_penalty,
            terminated: false,
            truncated: false,
            info,
        }
    }

    /// Current legality mask of the live engine.
    #[must_use]
    pub fn action_mask(&self) -> ActionMask {
        self.engine.legal_action_mask()
    }

    /// Encode the live engine's current state.
    #[must_use]
    pub fn observe(&self) -> Observation {
        self.encoder.encode(&self.engine.raw_state())
    }

    /// Size of the action space.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.layout.len()
    }

    /// Whether the current episode has ended.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Anomaly that ended the current episode, if any.
    #[must_use]
    pub fn anomaly(&self) -> Option<Anomaly> {
        self.anomaly
    }

    /// Whether the live engine reports a win.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.engine.is_terminated() && self.engine.is_win()
    }

    /// Number of `step` calls since the last reset.
    #[must_use]
    pub fn episode_steps(&self) -> usize {
        self.steps
    }

    /// Seed the live engine was built with.
    #[must_use]
    pub fn episode_seed(&self) -> u64 {
        self.episode_seed
    }

    /// The live engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &ActionLayout {
        &self.layout
    }

    #[must_use]
    pub fn encoder(&self) -> &ObservationEncoder {
        &self.encoder
    }

    #[must_use]
    pub fn reward_config(&self) -> &RewardConfig {
        &self.reward
    }
}
