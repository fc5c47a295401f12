//! Simple blind/shop game for testing the learning core.
//!
//! A reduced single-player scoring game:
//! - Each ante has a small, big and boss blind with rising target scores
//! - In a blind: select up to `selected_max` cards, reorder, play or discard
//! - Played cards score by poker hand category plus card chips, boosted by jokers
//! - Cleared blinds pay money; the shop sells jokers between blinds
//! - Clearing the final ante's boss blind wins, running out of plays loses

mod game;

pub use game::{Blind, BlindGame, Card, HandRank, Joker, Stage};
