//! Episode loop wiring the environment to the agent.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agent::QLearningAgent;
use crate::core::Observation;
use crate::env::{Anomaly, Environment};
use crate::error::{Error, Result};
use crate::rules::CardEngine;

use super::config::TrainingConfig;
use super::stats::{mean, EpisodeStats, TrainingStats};

/// Aggregate result of greedy evaluation episodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub episodes: usize,
    pub wins: usize,
    pub anomalies: usize,
    pub total_return: f64,
    pub total_score: i64,
    pub total_length: usize,
}

impl EvaluationReport {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        self.per_episode(self.wins as f64)
    }

    #[must_use]
    pub fn mean_return(&self) -> f64 {
        self.per_episode(self.total_return)
    }

    #[must_use]
    pub fn mean_score(&self) -> f64 {
        self.per_episode(self.total_score as f64)
    }

    #[must_use]
    pub fn mean_length(&self) -> f64 {
        self.per_episode(self.total_length as f64)
    }

    fn per_episode(&self, total: f64) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            total / self.episodes as f64
        }
    }
}

/// Owns the environment and the agent for a whole run.
///
/// The engine stays inside the environment; the agent only ever sees
/// observations, masks, and rewards.
pub struct Trainer<E: CardEngine> {
    env: Environment<E>,
    agent: QLearningAgent,
    config: TrainingConfig,
    stats: TrainingStats,
}

impl<E: CardEngine> Trainer<E> {
    /// Build an agent sized to the environment's action space.
    pub fn new(env: Environment<E>, config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let agent = QLearningAgent::new(config.agent_config(), env.action_count())?;
        Ok(Self {
            env,
            agent,
            config,
            stats: TrainingStats::new(),
        })
    }

    /// Run `n_episodes` training episodes.
    pub fn run(&mut self) -> Result<&TrainingStats> {
        info!(
            episodes = self.config.n_episodes,
            actions = self.env.action_count(),
            "training started"
        );
        for _ in 0..self.config.n_episodes {
            self.run_episode()?;
        }
        info!(
            episodes = self.stats.episodes(),
            wins = self.stats.wins,
            high_score = self.stats.high_score,
            states = self.agent.table().len(),
            "training finished"
        );
        Ok(&self.stats)
    }

    /// Play one episode, updating the agent after every step.
    ///
    /// The first episode of a trainer reseeds the environment with
    /// `TrainingConfig::seed`.
    pub fn run_episode(&mut self) -> Result<EpisodeStats> {
        let episode = self.stats.episodes() + 1;
        let seed = (episode == 1).then_some(self.config.seed);
        let mut observation = self.env.reset(seed);

        let mut td_errors = Vec::new();
        let mut episode_return = 0.0;
        let mut length = 0;
        let mut illegal_actions = 0;
        let mut truncated = false;
        let mut anomaly = self.env.anomaly();

        while !self.env.is_done() {
            if length >= self.config.max_episode_steps {
                truncated = true;
                break;
            }
            let mask = self.env.action_mask();
            let action = match self.agent.get_action(&observation, &mask) {
                Ok(action) => action,
                Err(Error::NoLegalActions) => {
                    anomaly = Some(Anomaly::EmptyActionMask);
                    break;
                }
                Err(err) => return Err(err),
            };

            let step = self.env.step(action)?;
            let error = self.agent.update(
                &observation,
                action,
                step.reward,
                step.terminated,
                &step.observation,
            )?;

            td_errors.push(error);
            episode_return += step.reward;
            length += 1;
            if step.info.illegal_action {
                illegal_actions += 1;
            }
            if step.info.anomaly.is_some() {
                anomaly = step.info.anomaly;
            }
            observation = step.observation;
        }

        let epsilon = self.agent.decay_epsilon();
        let stats = EpisodeStats {
            episode,
            episode_return,
            length,
            final_score: self.env.engine().raw_state().score,
            won: self.env.is_win(),
            illegal_actions,
            mean_td_error: mean(&td_errors),
            truncated,
            anomaly,
            epsilon,
        };
        self.stats.record(&stats, &td_errors);

        if let Some(anomaly) = anomaly {
            warn!(episode, ?anomaly, length, "episode ended on anomaly");
        }
        debug!(episode, episode_return, length, won = stats.won, "episode finished");
        if self.config.should_log(episode) {
            self.log_progress(episode);
        }
        Ok(stats)
    }

    fn log_progress(&self, episode: usize) {
        let returns = &self.stats.returns;
        let recent = &returns[returns.len().saturating_sub(self.config.rolling_window)..];
        info!(
            episode,
            rolling_return = mean(recent),
            win_rate = self.stats.win_rate(),
            high_score = self.stats.high_score,
            epsilon = self.agent.epsilon(),
            states = self.agent.table().len(),
            "training progress"
        );
    }

    /// Play `episodes` greedy episodes without updating the agent.
    pub fn evaluate(&mut self, episodes: usize) -> Result<EvaluationReport> {
        let mut report = EvaluationReport {
            episodes,
            ..EvaluationReport::default()
        };
        for _ in 0..episodes {
            let observation = self.env.reset(None);
            let (episode_return, length, stuck) = self.play_greedy(observation)?;

            report.total_return += episode_return;
            report.total_length += length;
            report.total_score += self.env.engine().raw_state().score;
            if self.env.is_win() {
                report.wins += 1;
            }
            if stuck || self.env.anomaly().is_some() {
                report.anomalies += 1;
            }
        }
        info!(
            episodes,
            win_rate = report.win_rate(),
            mean_return = report.mean_return(),
            mean_score = report.mean_score(),
            "evaluation finished"
        );
        Ok(report)
    }

    fn play_greedy(&mut self, mut observation: Observation) -> Result<(f64, usize, bool)> {
        let mut episode_return = 0.0;
        let mut length = 0;
        while !self.env.is_done() && length < self.config.max_episode_steps {
            let mask = self.env.action_mask();
            let action = match self.agent.best_action(&observation, &mask) {
                Ok(action) => action,
                Err(Error::NoLegalActions) => return Ok((episode_return, length, true)),
                Err(err) => return Err(err),
            };
            let step = self.env.step(action)?;
            episode_return += step.reward;
            length += 1;
            observation = step.observation;
        }
        Ok((episode_return, length, false))
    }

    #[must_use]
    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    #[must_use]
    pub fn env(&self) -> &Environment<E> {
        &self.env
    }

    #[must_use]
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}
