//! State-delta events for renderers.
//!
//! The controller appends an event for every visible change. A renderer can
//! drain them after each command and redraw just the affected cards instead
//! of the whole board.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::revert::{Epoch, RevertTicket};
use super::summary::GameSummary;
use crate::cards::{Position, SymbolId};

/// Something that changed in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new board was dealt and the clock started.
    GameStarted {
        epoch: Epoch,
        player_name: String,
        pairs: u32,
        cards: usize,
    },

    /// A card turned face-up.
    CardRevealed { position: Position, identity: SymbolId },

    /// Two cards were paired off.
    PairMatched {
        first: Position,
        second: Position,
        identity: SymbolId,
        matched_pairs: u32,
    },

    /// Two cards differ; they turn back once the ticket's delay passes.
    MismatchScheduled {
        first: Position,
        second: Position,
        ticket: RevertTicket,
    },

    /// A mismatched pair turned face-down again.
    CardsReverted { first: Position, second: Position },

    Paused { elapsed: Duration },

    Resumed { elapsed: Duration },

    /// Periodic clock sample for display.
    Tick { elapsed: Duration },

    /// All pairs matched.
    GameEnded(GameSummary),

    /// The game was discarded.
    Reset { epoch: Epoch },
}

impl GameEvent {
    /// Board positions this event affects.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        match self {
            GameEvent::CardRevealed { position, .. } => vec![*position],
            GameEvent::PairMatched { first, second, .. }
            | GameEvent::MismatchScheduled { first, second, .. }
            | GameEvent::CardsReverted { first, second } => vec![*first, *second],
            _ => Vec::new(),
        }
    }
}
