//! Card system: identities, positions, decks.
//!
//! ## Key Types
//!
//! - `SymbolId`: Identity token shared by the two cards of a pair
//! - `Position`: Index of a card on the board
//! - `Card`: Identity plus face-up/matched flags
//! - `Deck`: Ordered, well-formed board of cards
//! - `DeckBuilder`: Normalizes a pair count and deals a shuffled deck

pub mod card;
pub mod deck;

pub use card::{Card, Position, SymbolId};
pub use deck::{normalize_pair_count, parse_pair_count, Deck, DeckBuilder};
