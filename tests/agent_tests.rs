//! Integration tests for the Q-table and the Q-learning agent.

use card_rl::agent::{AgentConfig, GreedyMode, QLearningAgent, QTable};
use card_rl::core::{ActionMask, Observation, FIELD_COUNT};
use card_rl::error::Error;
use proptest::prelude::*;

fn obs(n: u32) -> Observation {
    Observation::from_buckets([n; FIELD_COUNT])
}

fn greedy() -> AgentConfig {
    AgentConfig::new().with_epsilon(0.0, 0.0, 0.0)
}

// =============================================================================
// Action selection
// =============================================================================

#[test]
fn test_greedy_on_zero_row_picks_only_legal_action() {
    let mut agent = QLearningAgent::new(greedy(), 3).unwrap();
    let mask = ActionMask::from_binary(&[0, 1, 0]);

    assert_eq!(agent.get_action(&obs(0), &mask), Ok(1));
    assert_eq!(agent.table().get(&obs(0)), Some(&[0.0, 0.0, 0.0][..]));
}

#[test]
fn test_greedy_skips_higher_illegal_value() {
    let config = AgentConfig::new()
        .with_learning_rate(1.0)
        .with_epsilon(0.0, 0.0, 0.0);
    let mut agent = QLearningAgent::new(config, 3).unwrap();
    agent.update(&obs(0), 0, 9.0, true, &obs(1)).unwrap();
    agent.update(&obs(0), 2, 1.0, true, &obs(1)).unwrap();

    let mask = ActionMask::from_binary(&[0, 1, 1]);
    assert_eq!(agent.get_action(&obs(0), &mask), Ok(2));
    assert_eq!(agent.best_action(&obs(0), &mask), Ok(2));
}

#[test]
fn test_random_on_illegal_keeps_legal_argmax() {
    let config = AgentConfig::new()
        .with_learning_rate(1.0)
        .with_epsilon(0.0, 0.0, 0.0)
        .with_greedy_mode(GreedyMode::RandomOnIllegal);
    let mut agent = QLearningAgent::new(config, 4).unwrap();
    agent.update(&obs(0), 3, 5.0, true, &obs(1)).unwrap();

    let mask = ActionMask::from_binary(&[1, 0, 0, 1]);
    assert_eq!(agent.get_action(&obs(0), &mask), Ok(3));
}

#[test]
fn test_best_action_does_not_insert_rows() {
    let agent = QLearningAgent::new(greedy(), 4).unwrap();
    let mask = ActionMask::from_binary(&[0, 0, 1, 1]);

    assert_eq!(agent.best_action(&obs(7), &mask), Ok(2));
    assert!(agent.table().is_empty());
}

#[test]
fn test_exploration_is_seeded() {
    let mask = ActionMask::all(10);
    let config = AgentConfig::new().with_seed(99);
    let mut a = QLearningAgent::new(config.clone(), 10).unwrap();
    let mut b = QLearningAgent::new(config, 10).unwrap();

    let picks_a: Vec<usize> = (0..30).map(|_| a.get_action(&obs(0), &mask).unwrap()).collect();
    let picks_b: Vec<usize> = (0..30).map(|_| b.get_action(&obs(0), &mask).unwrap()).collect();
    assert_eq!(picks_a, picks_b);
}

#[test]
fn test_empty_mask_reports_no_legal_actions() {
    let mut agent = QLearningAgent::new(AgentConfig::default(), 5).unwrap();
    assert_eq!(
        agent.get_action(&obs(0), &ActionMask::none(5)),
        Err(Error::NoLegalActions)
    );
}

// =============================================================================
// Updates
// =============================================================================

#[test]
fn test_single_update_value() {
    let config = AgentConfig::new()
        .with_learning_rate(0.1)
        .with_discount_factor(0.95);
    let mut agent = QLearningAgent::new(config, 3).unwrap();

    agent.update(&obs(0), 1, 50.0, false, &obs(1)).unwrap();
    assert!((agent.table().value(&obs(0), 1) - 5.0).abs() < 1e-12);
    assert_eq!(agent.table().value(&obs(0), 0), 0.0);
}

#[test]
fn test_unseen_next_row_is_zero_vector() {
    let mut agent = QLearningAgent::new(AgentConfig::default(), 6).unwrap();
    agent.update(&obs(0), 0, 1.0, false, &obs(3)).unwrap();
    assert_eq!(agent.table().get(&obs(3)), Some(&[0.0; 6][..]));
}

#[test]
fn test_td_errors_accumulate() {
    let mut agent = QLearningAgent::new(AgentConfig::default(), 2).unwrap();
    agent.update(&obs(0), 0, 1.0, true, &obs(1)).unwrap();
    agent.update(&obs(0), 1, -1.0, true, &obs(1)).unwrap();
    assert_eq!(agent.training_error(), &[1.0, -1.0]);
}

#[test]
fn test_table_rows_match_action_count() {
    let mut table = QTable::new(79);
    assert_eq!(table.row(&obs(4)).len(), 79);
    assert_eq!(table.action_count(), 79);
}

// =============================================================================
// Epsilon schedule
// =============================================================================

#[test]
fn test_decay_reaches_floor_exactly() {
    let config = AgentConfig::new().with_epsilon(1.0, 0.1, 0.1);
    let mut agent = QLearningAgent::new(config, 1).unwrap();
    for _ in 0..15 {
        agent.decay_epsilon();
    }
    assert_eq!(agent.epsilon(), 0.1);
}

proptest! {
    #[test]
    fn prop_decay_is_monotone_and_floored(
        initial in 0.0f64..=1.0,
        decay in 0.0f64..0.5,
        floor_fraction in 0.0f64..=1.0,
        calls in 1usize..50,
    ) {
        let floor = initial * floor_fraction;
        let config = AgentConfig::new().with_epsilon(initial, decay, floor);
        let mut agent = QLearningAgent::new(config, 1).unwrap();

        let mut previous = agent.epsilon();
        for _ in 0..calls {
            let next = agent.decay_epsilon();
            prop_assert!(next <= previous);
            prop_assert!(next >= floor);
            previous = next;
        }
    }

    #[test]
    fn prop_selected_action_is_always_legal(
        bits in prop::collection::vec(0u8..=1, 1..40),
        epsilon in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mask = ActionMask::from_binary(&bits);
        let config = AgentConfig::new()
            .with_epsilon(epsilon, 0.0, 0.0)
            .with_seed(seed);
        let mut agent = QLearningAgent::new(config, bits.len()).unwrap();

        match agent.get_action(&obs(0), &mask) {
            Ok(action) => prop_assert!(mask.is_legal(action)),
            Err(err) => {
                prop_assert_eq!(err, Error::NoLegalActions);
                prop_assert!(mask.has_no_legal());
            }
        }
    }
}
