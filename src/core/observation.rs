//! Bounded discrete observations.
//!
//! The engine reports unbounded counters (`RawState`). The encoder clamps
//! each one into `[0, max]` for its field and packs the result into an
//! `Observation`, which is small, `Copy`, and hashable so it can key the
//! value table. Values are not scaled: bucket `n` means the engine reported
//! `n` (or at least `max` for the top bucket).

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;

/// Number of observation fields.
pub const FIELD_COUNT: usize = 12;

/// Observation fields in key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationField {
    Score,
    Target,
    Stage,
    Round,
    PlaysRemaining,
    DiscardsRemaining,
    Money,
    DeckLen,
    SelectedLen,
    AvailableLen,
    DiscardedLen,
    JokersLen,
}

impl ObservationField {
    /// All fields, in key order.
    pub const ALL: [ObservationField; FIELD_COUNT] = [
        ObservationField::Score,
        ObservationField::Target,
        ObservationField::Stage,
        ObservationField::Round,
        ObservationField::PlaysRemaining,
        ObservationField::DiscardsRemaining,
        ObservationField::Money,
        ObservationField::DeckLen,
        ObservationField::SelectedLen,
        ObservationField::AvailableLen,
        ObservationField::DiscardedLen,
        ObservationField::JokersLen,
    ];

    /// Position of this field in the observation tuple.
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Field name as used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ObservationField::Score => "score",
            ObservationField::Target => "target",
            ObservationField::Stage => "stage",
            ObservationField::Round => "round",
            ObservationField::PlaysRemaining => "plays",
            ObservationField::DiscardsRemaining => "discards",
            ObservationField::Money => "money",
            ObservationField::DeckLen => "deck_len",
            ObservationField::SelectedLen => "selected_len",
            ObservationField::AvailableLen => "available_len",
            ObservationField::DiscardedLen => "discarded_len",
            ObservationField::JokersLen => "jokers_len",
        }
    }
}

/// Raw engine counters, as read from the engine.
///
/// Signed so that a misbehaving engine reporting negative counts can be
/// represented; the encoder clamps those to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawState {
    pub score: i64,
    pub target: i64,
    pub stage: i64,
    pub round: i64,
    pub plays_remaining: i64,
    pub discards_remaining: i64,
    pub money: i64,
    pub deck_len: i64,
    pub selected_len: i64,
    pub available_len: i64,
    pub discarded_len: i64,
    pub jokers_len: i64,
}

impl RawState {
    /// Counters in key order.
    #[must_use]
    pub fn to_array(&self) -> [i64; FIELD_COUNT] {
        [
            self.score,
            self.target,
            self.stage,
            self.round,
            self.plays_remaining,
            self.discards_remaining,
            self.money,
            self.deck_len,
            self.selected_len,
            self.available_len,
            self.discarded_len,
            self.jokers_len,
        ]
    }
}

/// Encoded observation: one bucket per field, in key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Observation([u32; FIELD_COUNT]);

impl Observation {
    /// Build directly from buckets. The caller is responsible for bounds.
    #[must_use]
    pub const fn from_buckets(buckets: [u32; FIELD_COUNT]) -> Self {
        Self(buckets)
    }

    /// Bucket for a field.
    #[must_use]
    pub fn get(&self, field: ObservationField) -> u32 {
        self.0[field.position()]
    }

    /// All buckets in key order.
    #[must_use]
    pub fn buckets(&self) -> &[u32; FIELD_COUNT] {
        &self.0
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.get(ObservationField::Score)
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.get(ObservationField::Target)
    }
}

/// Inclusive upper bound of every field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationBounds([u32; FIELD_COUNT]);

impl ObservationBounds {
    /// Explicit per-field maxima in key order.
    #[must_use]
    pub const fn new(maxima: [u32; FIELD_COUNT]) -> Self {
        Self(maxima)
    }

    /// Maxima derived from the engine configuration ceilings.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let cap = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
        Self([
            cap(config.score_max),
            cap(config.target_max),
            cap(config.stage_max),
            cap(config.round_max()),
            cap(config.plays),
            cap(config.discards),
            cap(config.money_max),
            cap(config.deck_max),
            cap(config.selected_max),
            cap(config.available_max),
            cap(config.discarded_max),
            cap(config.joker_slots_max),
        ])
    }

    /// Upper bound of a field.
    #[must_use]
    pub fn max(&self, field: ObservationField) -> u32 {
        self.0[field.position()]
    }

    /// Upper bound on the number of distinct observations, saturating.
    #[must_use]
    pub fn key_space(&self) -> u128 {
        self.0
            .iter()
            .fold(1u128, |acc, &max| acc.saturating_mul(u128::from(max) + 1))
    }
}

/// Pure encoder from raw counters to bounded observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObservationEncoder {
    bounds: ObservationBounds,
}

impl ObservationEncoder {
    /// Create an encoder with explicit bounds.
    #[must_use]
    pub fn new(bounds: ObservationBounds) -> Self {
        Self { bounds }
    }

    /// Create an encoder sized by an engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(ObservationBounds::from_config(config))
    }

    /// The bounds in use.
    #[must_use]
    pub fn bounds(&self) -> &ObservationBounds {
        &self.bounds
    }

    /// Clamp every counter into its bucket range.
    #[must_use]
    pub fn encode(&self, state: &RawState) -> Observation {
        let raw = state.to_array();
        let mut buckets = [0u32; FIELD_COUNT];
        for (i, bucket) in buckets.iter_mut().enumerate() {
            let max = i64::from(self.bounds.0[i]);
            // max fits in u32, so the clamped value does too
            *bucket = raw[i].clamp(0, max) as u32;
        }
        Observation(buckets)
    }
}
