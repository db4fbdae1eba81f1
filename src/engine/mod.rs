//! The game engine: flip resolution, timing, and lifecycle.
//!
//! ## Components
//!
//! - [`FlipEngine`]: turns flip requests into reveal/match/mismatch outcomes
//! - [`Timer`]: pause-aware elapsed play time
//! - [`GameController`]: owns the [`GameState`] and sequences everything
//!
//! Renderers read [`GameSnapshot`]s and drain [`GameEvent`]s; they never
//! mutate state directly.

pub mod controller;
pub mod event;
pub mod flip;
pub mod revert;
pub mod state;
pub mod summary;
pub mod timer;

pub use controller::GameController;
pub use event::GameEvent;
pub use flip::{FlipEngine, FlipOutcome};
pub use revert::{Epoch, RevertStatus, RevertTicket};
pub use state::{CardView, GameSnapshot, GameState, Phase, Turn};
pub use summary::{format_clock, GameSummary};
pub use timer::Timer;
