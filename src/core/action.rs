//! Discrete action enumeration.
//!
//! The engine exposes a fixed-size action space whose length depends only on
//! the configuration. `ActionLayout` assigns every index a stable meaning,
//! laid out in sections:
//!
//! | Section | Width |
//! |---|---|
//! | select card | `available_max` |
//! | move card left | `available_max - 1` |
//! | move card right | `available_max - 1` |
//! | play | 1 |
//! | discard | 1 |
//! | cash out | 1 |
//! | buy joker | `store_consumable_slots_max` |
//! | next round | 1 |
//! | select blind | 1 |
//!
//! Move sections are one shorter than the hand: the leftmost card cannot move
//! left and the rightmost cannot move right. Move index `i` refers to the card
//! at hand position `i + 1` (left) or `i` (right).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;

/// The meaning of one action index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Select the card at a hand position.
    SelectCard(usize),
    /// Swap the card at `position + 1` with its left neighbour.
    MoveLeft(usize),
    /// Swap the card at `position` with its right neighbour.
    MoveRight(usize),
    /// Play the selected cards.
    Play,
    /// Discard the selected cards.
    Discard,
    /// Collect the blind reward.
    CashOut,
    /// Buy the joker in a shop slot.
    BuyJoker(usize),
    /// Leave the shop.
    NextRound,
    /// Start the next blind.
    SelectBlind,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::SelectCard(i) => write!(f, "select_card({i})"),
            ActionKind::MoveLeft(i) => write!(f, "move_left({})", i + 1),
            ActionKind::MoveRight(i) => write!(f, "move_right({i})"),
            ActionKind::Play => write!(f, "play"),
            ActionKind::Discard => write!(f, "discard"),
            ActionKind::CashOut => write!(f, "cash_out"),
            ActionKind::BuyJoker(i) => write!(f, "buy_joker({i})"),
            ActionKind::NextRound => write!(f, "next_round"),
            ActionKind::SelectBlind => write!(f, "select_blind"),
        }
    }
}

/// Stable index layout of the action space for one configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLayout {
    hand: usize,
    shop: usize,
}

impl ActionLayout {
    /// Build the layout from a hand ceiling and shop width.
    ///
    /// `hand` must be at least 1.
    #[must_use]
    pub fn new(hand: usize, shop: usize) -> Self {
        assert!(hand >= 1, "hand ceiling must be at least 1");
        Self { hand, shop }
    }

    /// Layout for an engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.available_max.max(1), config.store_consumable_slots_max)
    }

    fn moves(&self) -> usize {
        self.hand - 1
    }

    /// First index of the move-left section.
    #[must_use]
    pub fn move_left_start(&self) -> usize {
        self.hand
    }

    /// First index of the move-right section.
    #[must_use]
    pub fn move_right_start(&self) -> usize {
        self.move_left_start() + self.moves()
    }

    /// Index of the play action.
    #[must_use]
    pub fn play_index(&self) -> usize {
        self.move_right_start() + self.moves()
    }

    /// Index of the discard action.
    #[must_use]
    pub fn discard_index(&self) -> usize {
        self.play_index() + 1
    }

    /// Index of the cash out action.
    #[must_use]
    pub fn cash_out_index(&self) -> usize {
        self.discard_index() + 1
    }

    /// First index of the buy-joker section.
    #[must_use]
    pub fn buy_joker_start(&self) -> usize {
        self.cash_out_index() + 1
    }

    /// Index of the next round action.
    #[must_use]
    pub fn next_round_index(&self) -> usize {
        self.buy_joker_start() + self.shop
    }

    /// Index of the select blind action.
    #[must_use]
    pub fn select_blind_index(&self) -> usize {
        self.next_round_index() + 1
    }

    /// Total number of discrete actions (the mask length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.select_blind_index() + 1
    }

    /// Always false; every layout holds at least the fixed actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Decode an index. Returns `None` when out of range.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<ActionKind> {
        let kind = if index < self.move_left_start() {
            ActionKind::SelectCard(index)
        } else if index < self.move_right_start() {
            ActionKind::MoveLeft(index - self.move_left_start())
        } else if index < self.play_index() {
            ActionKind::MoveRight(index - self.move_right_start())
        } else if index == self.play_index() {
            ActionKind::Play
        } else if index == self.discard_index() {
            ActionKind::Discard
        } else if index == self.cash_out_index() {
            ActionKind::CashOut
        } else if index < self.next_round_index() {
            ActionKind::BuyJoker(index - self.buy_joker_start())
        } else if index == self.next_round_index() {
            ActionKind::NextRound
        } else if index == self.select_blind_index() {
            ActionKind::SelectBlind
        } else {
            return None;
        };
        Some(kind)
    }

    /// Encode an action. Returns `None` if its position is outside the layout.
    #[must_use]
    pub fn index(&self, kind: ActionKind) -> Option<usize> {
        match kind {
            ActionKind::SelectCard(i) if i < self.hand => Some(i),
            ActionKind::MoveLeft(i) if i < self.moves() => Some(self.move_left_start() + i),
            ActionKind::MoveRight(i) if i < self.moves() => Some(self.move_right_start() + i),
            ActionKind::Play => Some(self.play_index()),
            ActionKind::Discard => Some(self.discard_index()),
            ActionKind::CashOut => Some(self.cash_out_index()),
            ActionKind::BuyJoker(i) if i < self.shop => Some(self.buy_joker_start() + i),
            ActionKind::NextRound => Some(self.next_round_index()),
            ActionKind::SelectBlind => Some(self.select_blind_index()),
            _ => None,
        }
    }

    /// Human-readable name of an index, for logs and reports.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<String> {
        self.kind(index).map(|kind| kind.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_engine_space() {
        let layout = ActionLayout::from_config(&EngineConfig::default());

        // 24 select, 23 left, 23 right, play, discard, cash out, 4 buy, next, blind
        assert_eq!(layout.len(), 79);
        assert_eq!(layout.play_index(), 70);
        assert_eq!(layout.discard_index(), 71);
        assert_eq!(layout.cash_out_index(), 72);
        assert_eq!(layout.buy_joker_start(), 73);
        assert_eq!(layout.next_round_index(), 77);
        assert_eq!(layout.select_blind_index(), 78);
    }

    #[test]
    fn test_kind_and_index_agree() {
        let layout = ActionLayout::new(4, 2);
        for index in 0..layout.len() {
            let kind = layout.kind(index).unwrap();
            assert_eq!(layout.index(kind), Some(index), "index {index} ({kind})");
        }
        assert_eq!(layout.kind(layout.len()), None);
    }

    #[test]
    fn test_section_boundaries() {
        let layout = ActionLayout::new(3, 1);
        assert_eq!(layout.kind(0), Some(ActionKind::SelectCard(0)));
        assert_eq!(layout.kind(2), Some(ActionKind::SelectCard(2)));
        assert_eq!(layout.kind(3), Some(ActionKind::MoveLeft(0)));
        assert_eq!(layout.kind(5), Some(ActionKind::MoveRight(0)));
        assert_eq!(layout.kind(7), Some(ActionKind::Play));
        assert_eq!(layout.kind(10), Some(ActionKind::BuyJoker(0)));
        assert_eq!(layout.kind(11), Some(ActionKind::NextRound));
        assert_eq!(layout.kind(12), Some(ActionKind::SelectBlind));
        assert_eq!(layout.len(), 13);
    }

    #[test]
    fn test_index_rejects_out_of_layout_positions() {
        let layout = ActionLayout::new(3, 1);
        assert_eq!(layout.index(ActionKind::SelectCard(3)), None);
        assert_eq!(layout.index(ActionKind::MoveLeft(2)), None);
        assert_eq!(layout.index(ActionKind::BuyJoker(1)), None);
    }

    #[test]
    fn test_names() {
        let layout = ActionLayout::new(3, 1);
        assert_eq!(layout.name(0).as_deref(), Some("select_card(0)"));
        assert_eq!(layout.name(3).as_deref(), Some("move_left(1)"));
        assert_eq!(layout.name(7).as_deref(), Some("play"));
        assert_eq!(layout.name(99), None);
    }
}
