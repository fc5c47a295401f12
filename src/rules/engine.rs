//! Engine contract.
//!
//! Engines implement `CardEngine` to plug into the environment adapter:
//! - Which action indices are legal right now
//! - How an index mutates state
//! - Win/loss detection and the raw counters behind observations

use crate::core::{ActionMask, EngineConfig, RawState};
use crate::error::EngineError;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
}

/// A single-player, turn-based card game engine.
///
/// ## Implementation Notes
///
/// - `legal_action_mask`: always the full action-space length for the config
/// - `apply_action`: only called with indices the current mask marks legal;
///   return `Err` and leave state untouched if the engine disagrees
/// - `raw_state`: must not mutate; two calls without an action in between
///   return the same counters
pub trait CardEngine {
    /// Start a fresh game.
    fn new(config: &EngineConfig, seed: u64) -> Self
    where
        Self: Sized;

    /// Legality of every action index in the current state.
    fn legal_action_mask(&self) -> ActionMask;

    /// Apply the action at `index`.
    fn apply_action(&mut self, index: usize) -> Result<(), EngineError>;

    /// Has the game ended?
    fn is_terminated(&self) -> bool;

    /// Has the game ended in a win?
    fn is_win(&self) -> bool;

    /// Counters read by the observation encoder.
    fn raw_state(&self) -> RawState;

    /// `Some(outcome)` once the game has ended.
    fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_terminated() {
            None
        } else if self.is_win() {
            Some(GameOutcome::Win)
        } else {
            Some(GameOutcome::Loss)
        }
    }
}
