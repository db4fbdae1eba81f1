//! Card identities, board positions, and per-card flip state.

use serde::{Deserialize, Serialize};

/// Identity token shared by the two cards of a pair.
///
/// The engine doesn't interpret identities beyond equality. Renderers map
/// them to a card face via `AssetCatalog`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Index of a card on the board (0-based, deck order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub usize);

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A single card on the board.
///
/// `face_up` is transient (a card in the current turn); `matched` is
/// terminal. A matched card is always face-up and never flips again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Which pair this card belongs to.
    pub identity: SymbolId,

    /// Is the face currently showing?
    pub face_up: bool,

    /// Has this card been paired off?
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub const fn new(identity: SymbolId) -> Self {
        Self {
            identity,
            face_up: false,
            matched: false,
        }
    }

    /// Can this card be flipped by the player?
    #[must_use]
    pub const fn is_flippable(&self) -> bool {
        !self.face_up && !self.matched
    }

    pub(crate) fn reveal(&mut self) {
        self.face_up = true;
    }

    pub(crate) fn conceal(&mut self) {
        if !self.matched {
            self.face_up = false;
        }
    }

    pub(crate) fn mark_matched(&mut self) {
        self.face_up = true;
        self.matched = true;
    }
}
