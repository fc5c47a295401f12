//! Environment adapter: engine lifecycle, observation encoding, reward shaping.
//!
//! ## Overview
//!
//! - **Environment**: owns the live engine, exposes `reset`/`step`/`action_mask`
//! - **RewardConfig**: shaping constants (score scale, win/loss, illegal penalty)
//! - **Step / StepInfo**: transition record returned by `step`
//!
//! ## Usage
//!
//! ```
//! use card_rl::core::EngineConfig;
//! use card_rl::env::{Environment, RewardConfig};
//! use card_rl::games::simple::BlindGame;
//!
//! let mut env: Environment<BlindGame> =
//!     Environment::new(EngineConfig::default(), RewardConfig::default(), 42).unwrap();
//! let obs = env.reset(None);
//! let action = env.action_mask().legal_indices()[0];
//! let step = env.step(action).unwrap();
//! assert_ne!(step.observation, obs);
//! ```

pub mod adapter;
pub mod reward;

pub use adapter::{Anomaly, Environment, Step, StepInfo};
pub use reward::RewardConfig;
