//! Per-step legality mask over the fixed action space.
//!
//! The mask always has the full length of the action space; only the
//! entries set to `true` are legal, and only for the state it was read from.
//! Sampling draws directly from the legal subset, so an empty mask yields
//! `None` instead of looping.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Legal indices, inline for the common case of a handful of choices.
pub type LegalIndices = SmallVec<[usize; 16]>;

/// Fixed-length legality vector.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMask {
    legal: Vec<bool>,
}

impl ActionMask {
    /// A mask of the given length with every action illegal.
    #[must_use]
    pub fn none(len: usize) -> Self {
        Self {
            legal: vec![false; len],
        }
    }

    /// A mask of the given length with every action legal.
    #[must_use]
    pub fn all(len: usize) -> Self {
        Self {
            legal: vec![true; len],
        }
    }

    /// Build from a `{0, 1}` vector. Any nonzero entry counts as legal.
    #[must_use]
    pub fn from_binary(bits: &[u8]) -> Self {
        Self {
            legal: bits.iter().map(|&b| b != 0).collect(),
        }
    }

    /// Mark an index legal. Out-of-range indices are ignored.
    pub fn allow(&mut self, index: usize) {
        if let Some(slot) = self.legal.get_mut(index) {
            *slot = true;
        }
    }

    /// Length of the action space.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legal.len()
    }

    /// Whether the action space itself is zero-length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legal.is_empty()
    }

    /// Whether an index is legal. Out-of-range indices are not.
    #[must_use]
    pub fn is_legal(&self, index: usize) -> bool {
        self.legal.get(index).copied().unwrap_or(false)
    }

    /// Number of legal actions.
    #[must_use]
    pub fn legal_count(&self) -> usize {
        self.legal.iter().filter(|&&legal| legal).count()
    }

    /// True when no action is legal.
    #[must_use]
    pub fn has_no_legal(&self) -> bool {
        !self.legal.iter().any(|&legal| legal)
    }

    /// Legal indices in ascending order.
    #[must_use]
    pub fn legal_indices(&self) -> LegalIndices {
        self.legal
            .iter()
            .enumerate()
            .filter_map(|(i, &legal)| legal.then_some(i))
            .collect()
    }

    /// The mask as a `{0, 1}` vector.
    #[must_use]
    pub fn to_binary(&self) -> Vec<u8> {
        self.legal.iter().map(|&legal| u8::from(legal)).collect()
    }

    /// Uniformly random legal index, or `None` if nothing is legal.
    pub fn sample_random(&self, rng: &mut GameRng) -> Option<usize> {
        let legal = self.legal_indices();
        rng.choose(&legal).copied()
    }

    /// Legal index with the highest value in `row`; ties go to the lowest index.
    ///
    /// Indices beyond the end of `row` are skipped. Returns `None` when no
    /// legal index has a value.
    #[must_use]
    pub fn sample_greedy(&self, row: &[f64]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &value) in row.iter().enumerate() {
            if !self.is_legal(index) {
                continue;
            }
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((index, value)),
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_binary() {
        let mask = ActionMask::from_binary(&[0, 1, 0, 1]);
        assert_eq!(mask.len(), 4);
        assert!(!mask.is_legal(0));
        assert!(mask.is_legal(1));
        assert!(!mask.is_legal(4));
        assert_eq!(mask.legal_count(), 2);
        assert_eq!(mask.legal_indices().as_slice(), &[1, 3]);
        assert_eq!(mask.to_binary(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_allow() {
        let mut mask = ActionMask::none(3);
        assert!(mask.has_no_legal());
        mask.allow(2);
        mask.allow(10);
        assert_eq!(mask.to_binary(), vec![0, 0, 1]);
    }

    #[test]
    fn test_sample_random_only_legal() {
        let mask = ActionMask::from_binary(&[0, 1, 0, 1, 0]);
        let mut rng = GameRng::new(3);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let index = mask.sample_random(&mut rng).unwrap();
            assert!(mask.is_legal(index));
            seen[index] = true;
        }
        assert!(seen[1] && seen[3]);
    }

    #[test]
    fn test_sample_random_empty_mask() {
        let mask = ActionMask::none(5);
        let mut rng = GameRng::new(3);
        assert_eq!(mask.sample_random(&mut rng), None);
    }

    #[test]
    fn test_sample_greedy_restricts_to_legal() {
        let mask = ActionMask::from_binary(&[0, 1, 1]);
        assert_eq!(mask.sample_greedy(&[9.0, 1.0, 2.0]), Some(2));
    }

    #[test]
    fn test_sample_greedy_first_tie_wins() {
        let mask = ActionMask::from_binary(&[0, 1, 1, 1]);
        assert_eq!(mask.sample_greedy(&[5.0, 2.0, 2.0, 1.0]), Some(1));
        assert_eq!(mask.sample_greedy(&[0.0, 0.0, 0.0, 0.0]), Some(1));
    }

    #[test]
    fn test_sample_greedy_negative_values() {
        let mask = ActionMask::from_binary(&[1, 1]);
        assert_eq!(mask.sample_greedy(&[-3.0, -1.0]), Some(1));
    }

    #[test]
    fn test_sample_greedy_empty_mask() {
        let mask = ActionMask::none(3);
        assert_eq!(mask.sample_greedy(&[1.0, 2.0, 3.0]), None);
    }
}
