//! The flip/compare/resolve state machine.
//!
//! ## Per-turn states
//!
//! - **Idle**: no card flipped this turn
//! - **OneFlipped**: one card face-up, waiting for a second
//! - **Resolving**: two cards face-up, compared immediately
//!
//! A match marks both cards permanently and returns to Idle. A mismatch
//! leaves both cards showing and moves the game to
//! [`Phase::ResolvingMismatch`] until [`FlipEngine::revert_mismatch`] turns
//! them back. Timing the revert is the controller's job.
//!
//! Every rejected request leaves the state untouched.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Phase};
use crate::cards::{Position, SymbolId};
use crate::core::error::{Rejection, Result};

/// What a successful flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// First card of a turn turned face-up.
    Revealed { position: Position, identity: SymbolId },

    /// Second card matched the first.
    Matched {
        first: Position,
        second: Position,
        identity: SymbolId,
        /// Matched pairs after this one.
        matched_pairs: u32,
        /// Was this the last pair?
        complete: bool,
    },

    /// Second card differed from the first; both are showing until reverted.
    Mismatched { first: Position, second: Position },
}

/// Applies flip requests to a [`GameState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FlipEngine;

impl FlipEngine {
    /// Flip the card at `position`.
    pub fn request_flip(state: &mut GameState, position: Position) -> Result<FlipOutcome> {
        Self::check_phase(state.phase)?;

        let len = state.deck.len();
        let card = *state
            .deck
            .get(position)
            .ok_or(Rejection::OutOfBounds { position, len })?;

        if card.matched {
            return Err(Rejection::AlreadyMatched(position).into());
        }
        if state.turn.contains(position) {
            return Err(Rejection::SamePosition(position).into());
        }
        if card.face_up {
            return Err(Rejection::AlreadyFaceUp(position).into());
        }
        // A full turn always means a pending mismatch, which check_phase refused.
        debug_assert!(!state.turn.is_full());

        if let Some(card) = state.deck.get_mut(position) {
            card.reveal();
        }
        state.turn.push(position);

        match state.turn.pair() {
            None => Ok(FlipOutcome::Revealed {
                position,
                identity: card.identity,
            }),
            Some((first, second)) => Ok(Self::resolve(state, first, second)),
        }
    }

    /// Turn a mismatched pair back face-down and reopen the board.
    ///
    /// Returns the reverted positions, or `None` if no mismatch was pending.
    pub fn revert_mismatch(state: &mut GameState) -> Option<(Position, Position)> {
        if state.phase != Phase::ResolvingMismatch {
            return None;
        }
        let (first, second) = state.turn.pair()?;

        for position in [first, second] {
            if let Some(card) = state.deck.get_mut(position) {
                card.conceal();
            }
        }
        state.turn.clear();
        state.phase = Phase::Active;

        Some((first, second))
    }

    fn check_phase(phase: Phase) -> std::result::Result<(), Rejection> {
        match phase {
            Phase::Active => Ok(()),
            Phase::NotStarted => Err(Rejection::NotStarted),
            Phase::Paused => Err(Rejection::Paused),
            Phase::ResolvingMismatch => Err(Rejection::ResolvingMismatch),
            Phase::Ended => Err(Rejection::Ended),
        }
    }

    fn resolve(state: &mut GameState, first: Position, second: Position) -> FlipOutcome {
        let identity_of = |p: Position| state.deck.get(p).map(|c| c.identity);
        let (a, b) = (identity_of(first), identity_of(second));

        match (a, b) {
            (Some(identity), Some(other)) if identity == other => {
                for position in [first, second] {
                    if let Some(card) = state.deck.get_mut(position) {
                        card.mark_matched();
                    }
                }
                state.matched_pairs += 1;
                state.turn.clear();

                FlipOutcome::Matched {
                    first,
                    second,
                    identity,
                    matched_pairs: state.matched_pairs,
                    complete: state.is_complete(),
                }
            }
            _ => {
                state.phase = Phase::ResolvingMismatch;
                FlipOutcome::Mismatched { first, second }
            }
        }
    }
}
