//! Engine configuration.
//!
//! `EngineConfig` is shared by the engine and the adapter. The engine reads
//! its rule limits from it (plays, discards, hand size); the adapter reads the
//! ceilings to size observation buckets and the action mask. Both must see
//! the same value for the lifetime of one training run.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_ANTE_START: usize = 1;
const DEFAULT_ANTE_END: usize = 8;
const DEFAULT_BLINDS_PER_ANTE: usize = 3;
const DEFAULT_STAGE_MAX: usize = 8;
const DEFAULT_PLAYS: usize = 4;
const DEFAULT_DISCARDS: usize = 4;
const DEFAULT_MONEY_START: usize = 0;
const DEFAULT_MONEY_MAX: usize = 500;
const DEFAULT_JOKER_SLOTS: usize = 5;
const DEFAULT_JOKER_SLOTS_MAX: usize = 10;
const DEFAULT_SELECTED_MAX: usize = 5;
const DEFAULT_AVAILABLE: usize = 8;
const DEFAULT_AVAILABLE_MAX: usize = 24;
const DEFAULT_STORE_CONSUMABLE_SLOTS_MAX: usize = 4;
const DEFAULT_DECK_MAX: usize = 100;
const DEFAULT_DISCARDED_MAX: usize = 100;
const DEFAULT_SCORE_MAX: usize = 100_000;
const DEFAULT_TARGET_MAX: usize = 100_000;

/// Static configuration of one engine lineage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// First ante of a run.
    pub ante_start: usize,
    /// Last ante; clearing its boss blind wins the run.
    pub ante_end: usize,
    /// Blinds (rounds) per ante.
    pub blinds_per_ante: usize,
    /// Ceiling for the engine's stage ordinal.
    pub stage_max: usize,
    /// Hands that may be played per blind.
    pub plays: usize,
    /// Discards allowed per blind.
    pub discards: usize,
    /// Money at the start of a run.
    pub money_start: usize,
    /// Money ceiling.
    pub money_max: usize,
    /// Joker slots available at the start of a run.
    pub joker_slots: usize,
    /// Joker slot ceiling.
    pub joker_slots_max: usize,
    /// Maximum cards that can be selected for a play or discard.
    pub selected_max: usize,
    /// Hand size dealt each blind.
    pub available: usize,
    /// Hand size ceiling; sizes the card sections of the action space.
    pub available_max: usize,
    /// Shop slots; sizes the buy section of the action space.
    pub store_consumable_slots_max: usize,
    /// Deck size ceiling.
    pub deck_max: usize,
    /// Discard pile ceiling.
    pub discarded_max: usize,
    /// Top bucket for the running score.
    pub score_max: usize,
    /// Top bucket for the blind's target score.
    pub target_max: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ante_start: DEFAULT_ANTE_START,
            ante_end: DEFAULT_ANTE_END,
            blinds_per_ante: DEFAULT_BLINDS_PER_ANTE,
            stage_max: DEFAULT_STAGE_MAX,
            plays: DEFAULT_PLAYS,
            discards: DEFAULT_DISCARDS,
            money_start: DEFAULT_MONEY_START,
            money_max: DEFAULT_MONEY_MAX,
            joker_slots: DEFAULT_JOKER_SLOTS,
            joker_slots_max: DEFAULT_JOKER_SLOTS_MAX,
            selected_max: DEFAULT_SELECTED_MAX,
            available: DEFAULT_AVAILABLE,
            available_max: DEFAULT_AVAILABLE_MAX,
            store_consumable_slots_max: DEFAULT_STORE_CONSUMABLE_SLOTS_MAX,
            deck_max: DEFAULT_DECK_MAX,
            discarded_max: DEFAULT_DISCARDED_MAX,
            score_max: DEFAULT_SCORE_MAX,
            target_max: DEFAULT_TARGET_MAX,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the final ante.
    #[must_use]
    pub fn with_ante_end(mut self, ante_end: usize) -> Self {
        self.ante_end = ante_end;
        self
    }

    /// Set plays per blind.
    #[must_use]
    pub fn with_plays(mut self, plays: usize) -> Self {
        self.plays = plays;
        self
    }

    /// Set discards per blind.
    #[must_use]
    pub fn with_discards(mut self, discards: usize) -> Self {
        self.discards = discards;
        self
    }

    /// Set the dealt hand size and its ceiling.
    #[must_use]
    pub fn with_hand_size(mut self, available: usize, available_max: usize) -> Self {
        self.available = available;
        self.available_max = available_max;
        self
    }

    /// Set the maximum number of selected cards.
    #[must_use]
    pub fn with_selected_max(mut self, selected_max: usize) -> Self {
        self.selected_max = selected_max;
        self
    }

    /// Set the number of shop slots.
    #[must_use]
    pub fn with_store_slots(mut self, slots: usize) -> Self {
        self.store_consumable_slots_max = slots;
        self
    }

    /// Set the money ceiling.
    #[must_use]
    pub fn with_money_max(mut self, money_max: usize) -> Self {
        self.money_max = money_max;
        self
    }

    /// Set the score and target bucket ceilings.
    #[must_use]
    pub fn with_score_ceilings(mut self, score_max: usize, target_max: usize) -> Self {
        self.score_max = score_max;
        self.target_max = target_max;
        self
    }

    /// Highest round ordinal a run can reach.
    #[must_use]
    pub fn round_max(&self) -> usize {
        self.ante_end.saturating_mul(self.blinds_per_ante)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.ante_start == 0 || self.ante_start > self.ante_end {
            return Err(Error::config(format!(
                "ante range {}..={} is empty",
                self.ante_start, self.ante_end
            )));
        }
        if self.blinds_per_ante == 0 {
            return Err(Error::config("blinds_per_ante must be positive"));
        }
        if self.plays == 0 {
            return Err(Error::config("plays must be positive"));
        }
        if self.available_max < 2 {
            return Err(Error::config("available_max must be at least 2"));
        }
        if self.available == 0 || self.available > self.available_max {
            return Err(Error::config(format!(
                "hand size {} must be in 1..={}",
                self.available, self.available_max
            )));
        }
        if self.selected_max == 0 || self.selected_max > self.available {
            return Err(Error::config(format!(
                "selected_max {} must be in 1..={}",
                self.selected_max, self.available
            )));
        }
        if self.joker_slots > self.joker_slots_max {
            return Err(Error::config("joker_slots exceeds joker_slots_max"));
        }
        if self.money_start > self.money_max {
            return Err(Error::config("money_start exceeds money_max"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.round_max(), 24);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_ante_end(2)
            .with_plays(3)
            .with_discards(1)
            .with_hand_size(6, 10)
            .with_selected_max(3)
            .with_store_slots(2);

        assert_eq!(config.ante_end, 2);
        assert_eq!(config.plays, 3);
        assert_eq!(config.discards, 1);
        assert_eq!(config.available, 6);
        assert_eq!(config.available_max, 10);
        assert_eq!(config.selected_max, 3);
        assert_eq!(config.store_consumable_slots_max, 2);
        assert_eq!(config.round_max(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inconsistent_limits() {
        assert!(EngineConfig::new().with_ante_end(0).validate().is_err());
        assert!(EngineConfig::new().with_plays(0).validate().is_err());
        assert!(EngineConfig::new().with_hand_size(8, 1).validate().is_err());
        assert!(EngineConfig::new()
            .with_hand_size(30, 24)
            .validate()
            .is_err());
        assert!(EngineConfig::new().with_selected_max(9).validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = EngineConfig::new().with_ante_end(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
