//! Core engine types: RNG, clocks, configuration, errors.
//!
//! These are the building blocks the deck builder and the game engine sit
//! on. Nothing here knows about turns or phases.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AssetCatalog, DeckConfig, MatchConfig, DEFAULT_MISMATCH_DELAY, MAX_PAIRS};
pub use error::{GameError, Rejection, Result};
pub use rng::{GameRng, GameRngState};
