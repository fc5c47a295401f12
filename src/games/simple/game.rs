//! Blind game implementation.

use std::fmt;

use crate::core::{ActionKind, ActionLayout, ActionMask, EngineConfig, GameRng, RawState};
use crate::error::EngineError;
use crate::rules::CardEngine;

/// Base target score per ante, indexed from ante 1.
const ANTE_BASE_SCORES: [usize; 8] = [300, 800, 2_000, 5_000, 11_000, 20_000, 35_000, 50_000];

/// A playing card. Ranks run 2..=14 (ace high), suits 0..4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: u8,
    pub suit: u8,
}

impl Card {
    /// Chip value: pip value, faces 10, ace 11.
    #[must_use]
    pub fn chips(&self) -> usize {
        match self.rank {
            14 => 11,
            11..=13 => 10,
            r => usize::from(r),
        }
    }

    fn standard_deck() -> Vec<Card> {
        (0..4u8)
            .flat_map(|suit| (2..=14u8).map(move |rank| Card { rank, suit }))
            .collect()
    }
}

/// Blind within an ante.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blind {
    Small,
    Big,
    Boss,
}

impl Blind {
    fn next(self) -> Blind {
        match self {
            Blind::Small => Blind::Big,
            Blind::Big => Blind::Boss,
            Blind::Boss => Blind::Small,
        }
    }

    /// Target multiplier over the ante base score, in percent.
    fn target_percent(self) -> usize {
        match self {
            Blind::Small => 100,
            Blind::Big => 150,
            Blind::Boss => 200,
        }
    }

    fn reward(self) -> usize {
        match self {
            Blind::Small => 3,
            Blind::Big => 4,
            Blind::Boss => 5,
        }
    }
}

/// Game stage. The ordinal is what observations see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    PreBlind,
    Blind(Blind),
    PostBlind,
    Shop,
    Won,
    Lost,
}

impl Stage {
    /// Stable ordinal, at most 7.
    #[must_use]
    pub fn ordinal(self) -> usize {
        match self {
            Stage::PreBlind => 0,
            Stage::Blind(Blind::Small) => 1,
            Stage::Blind(Blind::Big) => 2,
            Stage::Blind(Blind::Boss) => 3,
            Stage::PostBlind => 4,
            Stage::Shop => 5,
            Stage::Won => 6,
            Stage::Lost => 7,
        }
    }
}

/// Poker hand categories scored by a play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandRank {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Flush,
    FullHouse,
    FourOfAKind,
}

impl HandRank {
    /// Classify up to five cards.
    #[must_use]
    pub fn classify(cards: &[Card]) -> HandRank {
        let mut counts = [0usize; 15];
        for card in cards {
            counts[usize::from(card.rank)] += 1;
        }
        let mut groups: Vec<usize> = counts.iter().copied().filter(|&c| c > 1).collect();
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let flush = cards.len() == 5 && cards.iter().all(|c| c.suit == cards[0].suit);

        match groups.as_slice() {
            [4, ..] => HandRank::FourOfAKind,
            [3, 2] => HandRank::FullHouse,
            _ if flush => HandRank::Flush,
            [3, ..] => HandRank::ThreeOfAKind,
            [2, 2] => HandRank::TwoPair,
            [2] => HandRank::Pair,
            _ => HandRank::HighCard,
        }
    }

    /// Base (chips, mult) for the hand.
    #[must_use]
    pub fn base(self) -> (usize, usize) {
        match self {
            HandRank::HighCard => (5, 1),
            HandRank::Pair => (10, 2),
            HandRank::TwoPair => (20, 2),
            HandRank::ThreeOfAKind => (30, 3),
            HandRank::Flush => (35, 4),
            HandRank::FullHouse => (40, 4),
            HandRank::FourOfAKind => (60, 7),
        }
    }
}

/// A joker adds flat chips and mult to every scored hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Joker {
    pub name: &'static str,
    pub chips: usize,
    pub mult: usize,
    pub cost: usize,
}

const JOKER_CATALOG: [Joker; 4] = [
    Joker {
        name: "Joker",
        chips: 0,
        mult: 4,
        cost: 2,
    },
    Joker {
        name: "Banner",
        chips: 30,
        mult: 0,
        cost: 3,
    },
    Joker {
        name: "Jolly",
        chips: 0,
        mult: 8,
        cost: 5,
    },
    Joker {
        name: "Scholar",
        chips: 20,
        mult: 4,
        cost: 4,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HandCard {
    card: Card,
    selected: bool,
}

/// Single-player blind/shop card game.
///
/// Each ante has a small, big and boss blind. A blind is cleared by reaching
/// its target score within the allowed plays; clearing the boss blind of the
/// final ante wins the run, running out of plays loses it. Between blinds the
/// player cashes out and may buy jokers.
#[derive(Clone)]
pub struct BlindGame {
    config: EngineConfig,
    layout: ActionLayout,
    rng: GameRng,
    stage: Stage,
    blind: Option<Blind>,
    ante: usize,
    round: usize,
    deck: Vec<Card>,
    hand: Vec<HandCard>,
    discarded: Vec<Card>,
    plays: usize,
    discards: usize,
    score: usize,
    money: usize,
    reward: usize,
    jokers: Vec<Joker>,
    shop: Vec<Joker>,
}

impl fmt::Debug for BlindGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlindGame")
            .field("stage", &self.stage)
            .field("ante", &self.ante)
            .field("round", &self.round)
            .field("score", &self.score)
            .field("required", &self.required_score())
            .field("money", &self.money)
            .finish_non_exhaustive()
    }
}

impl BlindGame {
    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Current ante.
    #[must_use]
    pub fn ante(&self) -> usize {
        self.ante
    }

    /// Action layout for this game's configuration.
    #[must_use]
    pub fn layout(&self) -> &ActionLayout {
        &self.layout
    }

    /// Cards in hand, left to right.
    pub fn hand(&self) -> impl Iterator<Item = Card> + '_ {
        self.hand.iter().map(|h| h.card)
    }

    /// Number of selected cards.
    #[must_use]
    pub fn selected_len(&self) -> usize {
        self.hand.iter().filter(|h| h.selected).count()
    }

    /// Owned jokers.
    #[must_use]
    pub fn jokers(&self) -> &[Joker] {
        &self.jokers
    }

    /// Target score of the current (or last) blind.
    #[must_use]
    pub fn required_score(&self) -> usize {
        let Some(blind) = self.blind else {
            return 0;
        };
        let base_index = self.ante.saturating_sub(1).min(ANTE_BASE_SCORES.len() - 1);
        ANTE_BASE_SCORES[base_index] * blind.target_percent() / 100
    }

    /// Score a set of cards with the current jokers.
    #[must_use]
    pub fn score_cards(&self, cards: &[Card]) -> usize {
        let (mut chips, mut mult) = HandRank::classify(cards).base();
        chips += cards.iter().map(Card::chips).sum::<usize>();
        for joker in &self.jokers {
            chips += joker.chips;
            mult += joker.mult;
        }
        chips * mult
    }

    fn start_blind(&mut self) {
        let blind = self.blind.map_or(Blind::Small, Blind::next);
        self.blind = Some(blind);
        self.stage = Stage::Blind(blind);
        self.round += 1;
        self.score = 0;
        self.plays = self.config.plays;
        self.discards = self.config.discards;

        let mut deck = Card::standard_deck();
        deck.truncate(self.config.deck_max);
        self.rng.shuffle(&mut deck);
        self.deck = deck;
        self.hand.clear();
        self.discarded.clear();
        self.refill_hand();
    }

    fn refill_hand(&mut self) {
        while self.hand.len() < self.config.available {
            let Some(card) = self.deck.pop() else {
                break;
            };
            self.hand.push(HandCard {
                card,
                selected: false,
            });
        }
    }

    fn take_selected(&mut self) -> Vec<Card> {
        let (selected, kept): (Vec<HandCard>, Vec<HandCard>) =
            self.hand.drain(..).partition(|h| h.selected);
        self.hand = kept;
        let cards: Vec<Card> = selected.into_iter().map(|h| h.card).collect();
        self.discarded.extend(cards.iter().copied());
        cards
    }

    fn play(&mut self, blind: Blind) {
        let cards = self.take_selected();
        self.score += self.score_cards(&cards);
        self.plays -= 1;

        if self.score >= self.required_score() {
            self.reward = blind.reward() + self.plays;
            if blind == Blind::Boss {
                if self.ante >= self.config.ante_end {
                    self.stage = Stage::Won;
                    return;
                }
                self.ante += 1;
            }
            self.stage = Stage::PostBlind;
            return;
        }

        self.refill_hand();
        if self.plays == 0 || self.hand.is_empty() {
            self.stage = Stage::Lost;
        }
    }

    fn discard(&mut self) {
        self.take_selected();
        self.discards -= 1;
        self.refill_hand();
        if self.hand.is_empty() {
            self.stage = Stage::Lost;
        }
    }

    fn cash_out(&mut self) {
        self.money = (self.money + self.reward).min(self.config.money_max);
        self.reward = 0;
        self.stage = Stage::Shop;

        let slots = self.config.store_consumable_slots_max;
        self.shop = (0..slots)
            .filter_map(|_| self.rng.choose(&JOKER_CATALOG).copied())
            .collect();
    }

    fn buy_joker(&mut self, slot: usize) {
        let joker = self.shop.remove(slot);
        self.money -= joker.cost;
        self.jokers.push(joker);
    }

    fn can_buy(&self, slot: usize) -> bool {
        self.shop.get(slot).is_some_and(|joker| {
            joker.cost <= self.money
                && self.jokers.len() < self.config.joker_slots
                && self.jokers.len() < self.config.joker_slots_max
        })
    }

    fn allow(&self, mask: &mut ActionMask, kind: ActionKind) {
        if let Some(index) = self.layout.index(kind) {
            mask.allow(index);
        }
    }
}

impl CardEngine for BlindGame {
    fn new(config: &EngineConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            layout: ActionLayout::from_config(config),
            rng: GameRng::new(seed),
            stage: Stage::PreBlind,
            blind: None,
            ante: config.ante_start,
            round: 0,
            deck: Vec::new(),
            hand: Vec::new(),
            discarded: Vec::new(),
            plays: config.plays,
            discards: config.discards,
            score: 0,
            money: config.money_start,
            reward: 0,
            jokers: Vec::new(),
            shop: Vec::new(),
        }
    }

    fn legal_action_mask(&self) -> ActionMask {
        let mut mask = ActionMask::none(self.layout.len());

        match self.stage {
            Stage::PreBlind => self.allow(&mut mask, ActionKind::SelectBlind),
            Stage::Blind(_) => {
                let selected = self.selected_len();
                let len = self.hand.len();
                for (i, h) in self.hand.iter().enumerate() {
                    if !h.selected && selected < self.config.selected_max {
                        self.allow(&mut mask, ActionKind::SelectCard(i));
                    }
                    if i + 1 < len {
                        self.allow(&mut mask, ActionKind::MoveLeft(i));
                        self.allow(&mut mask, ActionKind::MoveRight(i));
                    }
                }
                if selected > 0 && self.plays > 0 {
                    self.allow(&mut mask, ActionKind::Play);
                }
                if selected > 0 && self.discards > 0 {
                    self.allow(&mut mask, ActionKind::Discard);
                }
            }
            Stage::PostBlind => self.allow(&mut mask, ActionKind::CashOut),
            Stage::Shop => {
                for slot in 0..self.shop.len() {
                    if self.can_buy(slot) {
                        self.allow(&mut mask, ActionKind::BuyJoker(slot));
                    }
                }
                self.allow(&mut mask, ActionKind::NextRound);
            }
            Stage::Won | Stage::Lost => {}
        }

        mask
    }

    fn apply_action(&mut self, index: usize) -> Result<(), EngineError> {
        let kind = self.layout.kind(index).ok_or(EngineError::InvalidIndex(index))?;
        if !self.legal_action_mask().is_legal(index) {
            return Err(EngineError::MaskedAction(index));
        }

        match (kind, self.stage) {
            (ActionKind::SelectBlind, Stage::PreBlind) => self.start_blind(),
            (ActionKind::SelectCard(i), Stage::Blind(_)) => self.hand[i].selected = true,
            (ActionKind::MoveLeft(i), Stage::Blind(_)) => self.hand.swap(i, i + 1),
            (ActionKind::MoveRight(i), Stage::Blind(_)) => self.hand.swap(i, i + 1),
            (ActionKind::Play, Stage::Blind(blind)) => self.play(blind),
            (ActionKind::Discard, Stage::Blind(_)) => self.discard(),
            (ActionKind::CashOut, Stage::PostBlind) => self.cash_out(),
            (ActionKind::BuyJoker(slot), Stage::Shop) => self.buy_joker(slot),
            (ActionKind::NextRound, Stage::Shop) => {
                self.shop.clear();
                self.stage = Stage::PreBlind;
            }
            _ => return Err(EngineError::InvalidStage),
        }
        Ok(())
    }

    fn is_terminated(&self) -> bool {
        matches!(self.stage, Stage::Won | Stage::Lost)
    }

    fn is_win(&self) -> bool {
        self.stage == Stage::Won
    }

    fn raw_state(&self) -> RawState {
        let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        RawState {
            score: count(self.score),
            target: count(self.required_score()),
            stage: count(self.stage.ordinal()),
            round: count(self.round),
            plays_remaining: count(self.plays),
            discards_remaining: count(self.discards),
            money: count(self.money),
            deck_len: count(self.deck.len()),
            selected_len: count(self.selected_len()),
            available_len: count(self.hand.len()),
            discarded_len: count(self.discarded.len()),
            jokers_len: count(self.jokers.len()),
        }
    }
}
