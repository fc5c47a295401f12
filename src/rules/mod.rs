//! Engine contract for game implementations.
//!
//! Games implement `CardEngine` to expose:
//! - A fixed-length legality mask over the action space
//! - A mutating action handler keyed by action index
//! - Terminal/win flags and raw state counters
//!
//! The adapter calls into `CardEngine` but never interprets game rules.

pub mod engine;

pub use engine::{CardEngine, GameOutcome};
