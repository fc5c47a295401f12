//! Tabular value learning.
//!
//! - **QTable**: sparse `Observation -> [f64; action_count]`, zero rows on first access
//! - **QLearningAgent**: epsilon-greedy selection, TD updates, linear epsilon decay
//! - **AgentConfig**: hyperparameters, validated at construction
//!
//! ## Usage
//!
//! ```
//! use card_rl::agent::{AgentConfig, QLearningAgent};
//! use card_rl::core::{ActionMask, Observation};
//!
//! let config = AgentConfig::new().with_learning_rate(0.1).with_epsilon(0.0, 0.0, 0.0);
//! let mut agent = QLearningAgent::new(config, 3).unwrap();
//!
//! let obs = Observation::from_buckets([0; 12]);
//! let mask = ActionMask::from_binary(&[0, 1, 0]);
//! assert_eq!(agent.get_action(&obs, &mask).unwrap(), 1);
//!
//! agent.update(&obs, 1, 50.0, true, &obs).unwrap();
//! assert!((agent.table().value(&obs, 1) - 5.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod q_learning;
pub mod q_table;

pub use config::{AgentConfig, GreedyMode};
pub use q_learning::QLearningAgent;
pub use q_table::QTable;
