//! Deck construction: pair-count normalization and shuffling.
//!
//! ## Pair Counts
//!
//! A requested pair count goes through one normalization step, and the
//! result is used everywhere (deck size and win condition):
//!
//! 1. Non-positive requests are rejected.
//! 2. Requests above `DeckConfig::max_pairs` are clamped down to it.
//! 3. Odd counts are rounded down to the next even number.
//! 4. A result of zero (a request for one pair) is rejected.
//!
//! ## Shuffling
//!
//! Decks are laid out pair by pair, then shuffled with Fisher–Yates via
//! [`GameRng::shuffle`], so every arrangement is equally likely.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, Position, SymbolId};
use crate::core::config::DeckConfig;
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;

/// Parse a pair count typed by a player.
///
/// Surrounding whitespace is ignored. Anything that isn't an integer is an
/// invalid configuration; range checks happen later in
/// [`normalize_pair_count`].
pub fn parse_pair_count(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| GameError::invalid(format!("pair count {trimmed:?} is not a whole number")))
}

/// Clamp and round a requested pair count down to a playable even number.
pub fn normalize_pair_count(requested: i64, max_pairs: u32) -> Result<u32> {
    if requested <= 0 {
        return Err(GameError::invalid(format!(
            "pair count must be positive, got {requested}"
        )));
    }

    let clamped = u32::try_from(requested).unwrap_or(u32::MAX).min(max_pairs);
    let pairs = clamped - clamped % 2;
    if pairs == 0 {
        return Err(GameError::invalid(format!(
            "pair count {requested} leaves no pairs once rounded down to an even number"
        )));
    }

    Ok(pairs)
}

/// An ordered board of cards.
///
/// Backed by `im::Vector`, so cloning a deck into a snapshot is O(1).
/// The default deck is empty (no game on the board).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Build a deck from an explicit identity order.
    ///
    /// Used to replay a known deal. Fails unless every identity appears
    /// exactly twice.
    pub fn from_identities(identities: impl IntoIterator<Item = SymbolId>) -> Result<Self> {
        let deck = Self {
            cards: identities.into_iter().map(Card::new).collect(),
        };

        if deck.is_empty() {
            return Err(GameError::invalid("deck has no cards"));
        }
        if !deck.is_well_formed() {
            return Err(GameError::invalid(
                "every identity must appear exactly twice",
            ));
        }

        Ok(deck)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs (half the card count).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get the card at a position.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Card> {
        self.cards.get(position.index())
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Card> {
        self.cards.get_mut(position.index())
    }

    /// Iterate over cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Identities in board order.
    pub fn identities(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.cards.iter().map(|c| c.identity)
    }

    /// How many cards carry each identity.
    #[must_use]
    pub fn identity_counts(&self) -> FxHashMap<SymbolId, usize> {
        let mut counts = FxHashMap::default();
        for identity in self.identities() {
            *counts.entry(identity).or_insert(0) += 1;
        }
        counts
    }

    /// Check that every identity appears exactly twice.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.identity_counts().values().all(|&n| n == 2)
    }

    /// Number of cards already paired off.
    #[must_use]
    pub fn matched_cards(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }
}

/// Builds shuffled decks.
#[derive(Clone, Debug, Default)]
pub struct DeckBuilder {
    config: DeckConfig,
}

impl DeckBuilder {
    /// Create a builder with the given limits.
    #[must_use]
    pub fn new(config: DeckConfig) -> Self {
        Self { config }
    }

    /// The normalized pair count a request would produce.
    pub fn normalize(&self, requested: i64) -> Result<u32> {
        normalize_pair_count(requested, self.config.max_pairs)
    }

    /// Build a shuffled deck for `requested` pairs.
    ///
    /// Identities are numbered `0..pairs`.
    pub fn build(&self, requested: i64, rng: &mut GameRng) -> Result<Deck> {
        let pairs = self.normalize(requested)?;

        let mut cards: Vec<Card> = Vec::with_capacity(pairs as usize * 2);
        for raw in 0..pairs {
            // `max_pairs` is a u32, but identities are u16; a larger cap
            // would also be far beyond any asset set.
            let identity = SymbolId::new(u16::try_from(raw).map_err(|_| {
                GameError::invalid(format!("{pairs} pairs exceeds the identity range"))
            })?);
            cards.push(Card::new(identity));
            cards.push(Card::new(identity));
        }

        rng.shuffle(&mut cards);

        debug!(requested, pairs, seed = rng.seed(), "built deck");

        Ok(Deck {
            cards: cards.into_iter().collect(),
        })
    }
}
