//! Core types: configuration, action layout, masks, observations, RNG.
//!
//! These are engine-agnostic. Engines and the learning side both speak in
//! terms of `EngineConfig`, `ActionMask`, and `RawState`.

pub mod action;
pub mod config;
pub mod mask;
pub mod observation;
pub mod rng;

pub use action::{ActionKind, ActionLayout};
pub use config::EngineConfig;
pub use mask::{ActionMask, LegalIndices};
pub use observation::{
    Observation, ObservationBounds, ObservationEncoder, ObservationField, RawState, FIELD_COUNT,
};
pub use rng::GameRng;
