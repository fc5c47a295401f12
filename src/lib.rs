//! # card-rl
//!
//! Tabular Q-learning over a single-player, blind-based card game engine.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic**: The learning side only sees an `ActionMask`, an
//!    encoded `Observation`, and a scalar reward. Game rules live behind the
//!    `CardEngine` trait.
//!
//! 2. **Fixed Action Space**: Every action index is laid out once from the
//!    `EngineConfig` (`ActionLayout`). Legality is a boolean mask over it.
//!
//! 3. **Configuration Over Constants**: Reward shaping, observation bounds,
//!    and hyperparameters are plain config values with builder methods.
//!
//! ## Architecture
//!
//! - **Bounded Observations**: Raw engine counters are clamped into fixed
//!   bucket ranges, so the value table's key space is finite.
//!
//! - **Masked Sampling**: Exploration and exploitation both draw directly
//!   from the legal set. Illegal actions never reach the engine.
//!
//! - **Explicit Anomalies**: A live game with no legal action ends the
//!   episode with a diagnostic instead of looping.
//!
//! ## Modules
//!
//! - `core`: Engine config, action layout, masks, observations, RNG
//! - `rules`: `CardEngine` trait for game implementations
//! - `games`: Reference engine (`BlindGame`)
//! - `env`: Environment adapter and reward shaping
//! - `agent`: Q-table and epsilon-greedy Q-learning agent
//! - `training`: Episode loop, statistics, greedy evaluation

pub mod agent;
pub mod core;
pub mod env;
pub mod error;
pub mod games;
pub mod rules;
pub mod training;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionLayout, ActionMask, EngineConfig, GameRng, Observation, ObservationBounds,
    ObservationEncoder, ObservationField, RawState,
};

pub use crate::error::{EngineError, Error, Result};

pub use crate::rules::{CardEngine, GameOutcome};

pub use crate::env::{Anomaly, Environment, RewardConfig, Step, StepInfo};

pub use crate::agent::{AgentConfig, GreedyMode, QLearningAgent, QTable};

pub use crate::training::{
    EpisodeStats, EvaluationReport, Trainer, TrainingConfig, TrainingStats,
};
