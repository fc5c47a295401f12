//! Sparse tabular action-value store.

use rustc_hash::FxHashMap;

use crate::core::Observation;

/// Maps observations to a fixed-length row of action values.
///
/// Rows are created zero-filled the first time an observation is accessed
/// through `row`/`row_mut`/`max_value`; `get` and `value` never insert.
#[derive(Clone, Debug, Default)]
pub struct QTable {
    action_count: usize,
    rows: FxHashMap<Observation, Box<[f64]>>,
}

impl QTable {
    /// Create an empty table with `action_count` values per row.
    #[must_use]
    pub fn new(action_count: usize) -> Self {
        Self {
            action_count,
            rows: FxHashMap::default(),
        }
    }

    /// Values per row (the action-space size).
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Number of observations with a row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for an observation, if it has been seen.
    #[must_use]
    pub fn get(&self, observation: &Observation) -> Option<&[f64]> {
        self.rows.get(observation).map(|row| &**row)
    }

    /// Value of one action; zero for unseen observations.
    #[must_use]
    pub fn value(&self, observation: &Observation, action: usize) -> f64 {
        self.get(observation)
            .and_then(|row| row.get(action).copied())
            .unwrap_or(0.0)
    }

    /// Row for an observation, inserting a zero row on first access.
    pub fn row(&mut self, observation: &Observation) -> &[f64] {
        self.row_mut(observation)
    }

    /// Mutable row for an observation, inserting a zero row on first access.
    pub fn row_mut(&mut self, observation: &Observation) -> &mut [f64] {
        let action_count = self.action_count;
        self.rows
            .entry(*observation)
            .or_insert_with(|| vec![0.0; action_count].into_boxed_slice())
    }

    /// Maximum value in a row over all actions (zero for a fresh row).
    pub fn max_value(&mut self, observation: &Observation) -> f64 {
        let row = self.row(observation);
        if row.is_empty() {
            return 0.0;
        }
        row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Iterate over all rows.
    pub fn iter(&self) -> impl Iterator<Item = (&Observation, &[f64])> {
        self.rows.iter().map(|(obs, row)| (obs, &**row))
    }

    /// Drop every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
