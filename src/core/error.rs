//! Error taxonomy for the engine.
//!
//! There are two kinds of failure:
//!
//! - [`GameError::InvalidConfiguration`]: fatal to `start_game`, always
//!   reported to the caller.
//! - [`GameError::Rejected`]: a command that is not allowed right now. It has
//!   no effect on state and the UI may ignore it or show feedback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Position;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors returned by engine operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("action rejected: {0}")]
    Rejected(#[from] Rejection),
}

impl GameError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// The rejection reason, if this error is a rejected action.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(r) => Some(*r),
            Self::InvalidConfiguration { .. } => None,
        }
    }

    /// Check if this is a non-fatal rejected action.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Why a command was refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    #[error("no game in progress")]
    NotStarted,

    #[error("game is paused")]
    Paused,

    #[error("waiting for mismatched cards to turn back")]
    ResolvingMismatch,

    #[error("game is over")]
    Ended,

    #[error("game is not paused")]
    NotPaused,

    #[error("position {position} is outside a deck of {len} cards")]
    OutOfBounds { position: Position, len: usize },

    #[error("card at {0} is already matched")]
    AlreadyMatched(Position),

    #[error("card at {0} is already face up")]
    AlreadyFaceUp(Position),

    #[error("card at {0} was already flipped this turn")]
    SamePosition(Position),
}
