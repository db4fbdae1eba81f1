//! Game state and read-only snapshots.
//!
//! ## GameState
//!
//! Owned by the `GameController`. Holds the board, the cards flipped in the
//! current turn, match progress, and the phase.
//!
//! ## GameSnapshot
//!
//! What a renderer gets: one [`CardView`] per board slot, plus the elapsed
//! time and phase. A face-down card's identity is withheld from the view, so
//! a serialized snapshot never gives the board away.

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::revert::Epoch;
use crate::cards::{Card, Deck, Position, SymbolId};
use crate::core::rng::GameRngState;

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started (or the last one was reset).
    #[default]
    NotStarted,
    /// Accepting flips.
    Active,
    /// Two mismatched cards are showing; flips are refused until they turn back.
    ResolvingMismatch,
    /// Flips refused and the clock frozen.
    Paused,
    /// Every pair matched.
    Ended,
}

impl Phase {
    /// Is a game in progress (running or paused)?
    #[must_use]
    pub fn is_in_progress(self) -> bool {
        matches!(self, Phase::Active | Phase::ResolvingMismatch | Phase::Paused)
    }
}

/// Cards flipped in the current turn. Never more than two.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    positions: SmallVec<[Position; 2]>,
}

impl Turn {
    /// Create an empty turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Is the turn full (awaiting resolution)?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.positions.len() == 2
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// Flipped positions in flip order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// The two flipped positions, once the turn is full.
    #[must_use]
    pub fn pair(&self) -> Option<(Position, Position)> {
        match self.positions.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    pub(crate) fn push(&mut self, position: Position) {
        debug_assert!(!self.is_full(), "turn already holds two cards");
        self.positions.push(position);
    }

    pub(crate) fn clear(&mut self) {
        self.positions.clear();
    }
}

/// Mutable state of a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) deck: Deck,
    pub(crate) turn: Turn,
    pub(crate) matched_pairs: u32,
    pub(crate) total_pairs: u32,
    pub(crate) phase: Phase,
    pub(crate) player_name: String,
    pub(crate) deal: Option<GameRngState>,
}

impl GameState {
    /// Create an active game over `deck`.
    ///
    /// `deal` is the RNG state the deck was shuffled from, if it was dealt
    /// rather than supplied.
    #[must_use]
    pub fn new(player_name: impl Into<String>, deck: Deck, deal: Option<GameRngState>) -> Self {
        let total_pairs = u32::try_from(deck.pair_count()).unwrap_or(u32::MAX);
        Self {
            deck,
            turn: Turn::new(),
            matched_pairs: 0,
            total_pairs,
            phase: Phase::Active,
            player_name: player_name.into(),
            deal,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Pairs needed to win (the normalized pair count).
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// RNG state the deck was dealt from, for replaying the deal.
    #[must_use]
    pub fn deal(&self) -> Option<&GameRngState> {
        self.deal.as_ref()
    }

    /// Have all pairs been matched?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }
}

/// A card as the player can see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardView {
    /// `None` while the card is face-down.
    pub identity: Option<SymbolId>,
    pub face_up: bool,
    pub matched: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            identity: card.face_up.then_some(card.identity),
            face_up: card.face_up,
            matched: card.matched,
        }
    }
}

/// Read-only view of a game for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub epoch: Epoch,
    pub player_name: String,
    /// The board, in position order.
    pub cards: Vector<CardView>,
    /// Positions flipped in the current turn.
    pub turn: Vec<Position>,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    /// Active play time so far.
    pub elapsed: Duration,
}

impl GameSnapshot {
    pub(crate) fn capture(state: Option<&GameState>, epoch: Epoch, elapsed: Duration) -> Self {
        match state {
            Some(state) => Self {
                phase: state.phase,
                epoch,
                player_name: state.player_name.clone(),
                cards: state.deck.iter().map(CardView::from).collect(),
                turn: state.turn.positions().to_vec(),
                matched_pairs: state.matched_pairs,
                total_pairs: state.total_pairs,
                elapsed,
            },
            None => Self {
                epoch,
                elapsed,
                ..Self::default()
            },
        }
    }

    #[must_use]
    pub fn card(&self, position: Position) -> Option<&CardView> {
        self.cards.get(position.index())
    }

    /// The identity to draw at `position`, or `None` while it is face-down.
    #[must_use]
    pub fn visible_identity(&self, position: Position) -> Option<SymbolId> {
        self.card(position).and_then(|c| c.identity)
    }

    /// Will a flip be considered right now?
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Positions whose card differs from `previous`.
    ///
    /// If the boards aren't the same size (a new game), every position is
    /// reported.
    #[must_use]
    pub fn changed_positions(&self, previous: &GameSnapshot) -> Vec<Position> {
        if self.cards.len() != previous.cards.len() || self.epoch != previous.epoch {
            return (0..self.cards.len()).map(Position::new).collect();
        }

        self.cards
            .iter()
            .zip(previous.cards.iter())
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(i, _)| Position::new(i))
            .collect()
    }
}
