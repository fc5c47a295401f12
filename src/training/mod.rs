//! Training loop for the tabular agent.
//!
//! - **Trainer**: owns an `Environment` and a `QLearningAgent`, runs episodes
//! - **TrainingConfig**: episode count, agent hyperparameters, logging
//! - **TrainingStats**: per-episode returns, lengths, scores and TD errors
//!
//! ## Usage
//!
//! ```
//! use card_rl::core::EngineConfig;
//! use card_rl::env::{Environment, RewardConfig};
//! use card_rl::games::simple::BlindGame;
//! use card_rl::training::{Trainer, TrainingConfig};
//!
//! let env = Environment::<BlindGame>::new(
//!     EngineConfig::default().with_ante_end(1),
//!     RewardConfig::default(),
//!     42,
//! )
//! .unwrap();
//!
//! let config = TrainingConfig::new()
//!     .with_episodes(20)
//!     .with_max_episode_steps(200)
//!     .with_linear_decay();
//! let mut trainer = Trainer::new(env, config).unwrap();
//!
//! let stats = trainer.run().unwrap();
//! assert_eq!(stats.episodes(), 20);
//! ```

pub mod config;
pub mod stats;
pub mod trainer;

pub use config::TrainingConfig;
pub use stats::{rolling_mean, EpisodeStats, TrainingStats};
pub use trainer::{EvaluationReport, Trainer};
