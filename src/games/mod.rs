//! Game implementations.
//!
//! - `simple`: a compact blind/shop card game used to exercise the adapter,
//!   agent and training loop end to end.

pub mod simple;
