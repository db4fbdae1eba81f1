//! # memory-match
//!
//! A pair-matching ("memory") card game engine.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: A `GameController` owns the game state. Renderers get
//!    read-only snapshots and an event stream, never mutable access.
//!
//! 2. **Time Is Injected**: The timer and the mismatch delay read a `Clock`,
//!    so hosts can run on wall-clock time or drive time by hand.
//!
//! 3. **Stale Work Is Harmless**: Scheduled reverts are tied to a game
//!    epoch; anything left over from a reset game is ignored.
//!
//! ## Example
//!
//! ```
//! use memory_match::{GameController, MatchConfig, Phase, Position};
//!
//! let mut game = GameController::new(MatchConfig::default().with_seed(7));
//! game.start_game("Ada", 5).unwrap();
//!
//! // Odd counts round down: 4 pairs, 8 cards.
//! assert_eq!(game.snapshot().cards.len(), 8);
//!
//! game.flip(Position::new(0)).unwrap();
//! game.pause().unwrap();
//! assert!(game.flip(Position::new(1)).is_err());
//! assert_eq!(game.phase(), Phase::Paused);
//! ```
//!
//! ## Modules
//!
//! - `core`: RNG, clocks, configuration, errors
//! - `cards`: Card identities, positions, deck building
//! - `engine`: Flip engine, timer, controller, snapshots, events

pub mod cards;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    AssetCatalog, Clock, DeckConfig, GameError, GameRng, GameRngState, ManualClock, MatchConfig,
    Rejection, Result, SystemClock, MAX_PAIRS,
};

pub use crate::cards::{parse_pair_count, Card, Deck, DeckBuilder, Position, SymbolId};

pub use crate::engine::{
    format_clock, CardView, Epoch, FlipEngine, FlipOutcome, GameController, GameEvent,
    GameSnapshot, GameState, GameSummary, Phase, RevertStatus, RevertTicket, Timer,
};
