//! Episode and run statistics for external reporting.

use serde::{Deserialize, Serialize};

use crate::env::Anomaly;

/// Summary of one training episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Episode number, 1-based.
    pub episode: usize,

    /// Sum of rewards.
    pub episode_return: f64,

    /// Number of steps taken.
    pub length: usize,

    /// Raw engine score when the episode ended.
    pub final_score: i64,

    /// Whether the engine reported a win.
    pub won: bool,

    /// Steps answered with the illegal-action penalty.
    pub illegal_actions: usize,

    /// Mean temporal difference over the episode's updates.
    pub mean_td_error: f64,

    /// Stopped by the per-episode step limit rather than the game.
    pub truncated: bool,

    /// Set if the adapter ended the episode on an anomaly.
    pub anomaly: Option<Anomaly>,

    /// Exploration rate after the end-of-episode decay.
    pub epsilon: f64,
}

/// Aggregates over a training run. Read-only to reporting code.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Return of every episode, in order.
    pub returns: Vec<f64>,

    /// Length of every episode, in order.
    pub lengths: Vec<usize>,

    /// Final score of every episode, in order.
    pub scores: Vec<i64>,

    /// Every per-step temporal difference, in order.
    pub td_errors: Vec<f64>,

    /// Highest final score seen so far.
    pub high_score: i64,

    /// Episodes won.
    pub wins: usize,

    /// Episodes ended by an anomaly.
    pub anomalies: usize,
}

impl TrainingStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished episode and its TD errors.
    pub fn record(&mut self, episode: &EpisodeStats, td_errors: &[f64]) {
        self.returns.push(episode.episode_return);
        self.lengths.push(episode.length);
        self.scores.push(episode.final_score);
        self.td_errors.extend_from_slice(td_errors);
        self.high_score = self.high_score.max(episode.final_score);
        if episode.won {
            self.wins += 1;
        }
        if episode.anomaly.is_some() {
            self.anomalies += 1;
        }
    }

    /// Number of recorded episodes.
    #[must_use]
    pub fn episodes(&self) -> usize {
        self.returns.len()
    }

    /// Fraction of episodes won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.returns.is_empty() {
            0.0
        } else {
            self.wins as f64 / self.returns.len() as f64
        }
    }

    /// Mean episode return.
    #[must_use]
    pub fn mean_return(&self) -> f64 {
        mean(&self.returns)
    }

    /// Rolling mean of returns over `window` episodes.
    #[must_use]
    pub fn rolling_returns(&self, window: usize) -> Vec<f64> {
        rolling_mean(&self.returns, window)
    }

    /// Rolling mean of episode lengths over `window` episodes.
    #[must_use]
    pub fn rolling_lengths(&self, window: usize) -> Vec<f64> {
        let lengths: Vec<f64> = self.lengths.iter().map(|&l| l as f64).collect();
        rolling_mean(&lengths, window)
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Arithmetic mean; 0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Mean of each full window of `window` consecutive values.
///
/// Returns `values.len() - window + 1` entries, or none if there are fewer
/// values than the window (or the window is 0).
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    values.windows(window).map(mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(n: usize, ret: f64, score: i64, won: bool) -> EpisodeStats {
        EpisodeStats {
            episode: n,
            episode_return: ret,
            length: n * 2,
            final_score: score,
            won,
            illegal_actions: 0,
            mean_td_error: 0.0,
            truncated: false,
            anomaly: None,
            epsilon: 1.0,
        }
    }

    #[test]
    fn test_record() {
        let mut stats = TrainingStats::new();
        stats.record(&episode(1, 1.0, 120, false), &[0.5, -0.5]);
        stats.record(&episode(2, 3.0, 80, true), &[1.0]);

        assert_eq!(stats.episodes(), 2);
        assert_eq!(stats.high_score, 120);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.td_errors, vec![0.5, -0.5, 1.0]);
        assert_eq!(stats.win_rate(), 0.5);
        assert_eq!(stats.mean_return(), 2.0);
        assert_eq!(stats.lengths, vec![2, 4]);
    }

    #[test]
    fn test_record_anomaly() {
        let mut stats = TrainingStats::new();
        let mut ep = episode(1, 0.0, 0, false);
        ep.anomaly = Some(Anomaly::EmptyActionMask);
        stats.record(&ep, &[]);
        assert_eq!(stats.anomalies, 1);
    }

    #[test]
    fn test_rolling_mean() {
        assert_eq!(rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.5, 2.5, 3.5]);
        assert!(rolling_mean(&[1.0], 2).is_empty());
        assert!(rolling_mean(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new();
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.mean_return(), 0.0);
        assert!(stats.rolling_returns(10).is_empty());
    }

    #[test]
    fn test_reset() {
        let mut stats = TrainingStats::new();
        stats.record(&episode(1, 1.0, 5, true), &[]);
        stats.reset();
        assert_eq!(stats.episodes(), 0);
        assert_eq!(stats.wins, 0);
    }

    #[test]
    fn test_serialization() {
        let mut stats = TrainingStats::new();
        stats.record(&episode(1, 2.0, 10, false), &[0.25]);

        let json = serde_json::to_string(&stats).unwrap();
        let back: TrainingStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.returns, stats.returns);
        assert_eq!(back.high_score, 10);
    }
}
