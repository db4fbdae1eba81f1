//! The game controller: the single owner of game state.
//!
//! ## Commands
//!
//! - `start_game`: deal a deck and start the clock
//! - `flip`: forward a flip to the [`FlipEngine`]
//! - `pause` / `resume`: freeze and unfreeze play, the clock, and any
//!   pending mismatch revert
//! - `reset`: discard the game
//!
//! ## Driving the mismatch delay
//!
//! A mismatch schedules a revert instead of blocking. Hosts either call
//! [`GameController::tick`] periodically (it fires the revert once due), or
//! sleep for the ticket's delay themselves and call
//! [`GameController::complete_revert`]. Both paths check the ticket's epoch,
//! so a revert scheduled before a reset never touches the next game.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::cards::{Deck, Position, SymbolId};
//! use memory_match::core::{ManualClock, MatchConfig};
//! use memory_match::engine::{GameController, Phase};
//!
//! let clock = ManualClock::new();
//! let mut game = GameController::with_clock(MatchConfig::default(), clock.clone());
//!
//! let deck = Deck::from_identities([0, 1, 0, 1].map(SymbolId::new)).unwrap();
//! game.start_with_deck("Ada", deck).unwrap();
//!
//! game.flip(Position::new(0)).unwrap();
//! game.flip(Position::new(1)).unwrap();
//! assert_eq!(game.phase(), Phase::ResolvingMismatch);
//!
//! clock.advance(Duration::from_millis(1000));
//! game.tick();
//! assert_eq!(game.phase(), Phase::Active);
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::event::GameEvent;
use super::flip::{FlipEngine, FlipOutcome};
use super::revert::{Epoch, PendingRevert, RevertStatus, RevertTicket};
use super::state::{GameSnapshot, GameState, Phase};
use super::summary::GameSummary;
use super::timer::Timer;
use crate::cards::{Deck, DeckBuilder, Position, SymbolId};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::MatchConfig;
use crate::core::error::{GameError, Rejection, Result};
use crate::core::rng::{GameRng, GameRngState};

/// Orchestrates deck building, flips, timing, and the game lifecycle.
pub struct GameController<C: Clock = SystemClock> {
    config: MatchConfig,
    builder: DeckBuilder,
    rng: GameRng,
    timer: Timer<C>,
    state: Option<GameState>,
    pending: Option<PendingRevert>,
    /// Phase to restore on resume.
    paused_from: Option<Phase>,
    summary: Option<GameSummary>,
    epoch: Epoch,
    next_sequence: u64,
    events: Vec<GameEvent>,
}

impl GameController<SystemClock> {
    /// Create a controller running on wall-clock time.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> GameController<C> {
    /// Create a controller reading time from `clock`.
    pub fn with_clock(config: MatchConfig, clock: C) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!(seed = rng.seed(), "controller created");

        Self {
            builder: DeckBuilder::new(config.deck.clone()),
            config,
            rng,
            timer: Timer::new(clock),
            state: None,
            pending: None,
            paused_from: None,
            summary: None,
            epoch: Epoch::default(),
            next_sequence: 0,
            events: Vec::new(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current phase; `NotStarted` when there is no game.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.as_ref().map_or(Phase::NotStarted, GameState::phase)
    }

    /// Read-only view of the current game, if any.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Active play time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Will a flip be considered right now?
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.phase() == Phase::Active
    }

    /// Final result, once every pair is matched.
    #[must_use]
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Ticket of the mismatch waiting to turn back, if any.
    #[must_use]
    pub fn pending_revert(&self) -> Option<RevertTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Time left before the pending mismatch turns back.
    #[must_use]
    pub fn revert_remaining(&self) -> Option<Duration> {
        let now = self.now();
        self.pending.as_ref().map(|p| p.remaining(now))
    }

    /// Asset path for a card face.
    #[must_use]
    pub fn asset_path(&self, identity: SymbolId) -> String {
        self.config.assets.path(identity)
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self.state.as_ref(), self.epoch, self.elapsed())
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Deal a new deck and start playing.
    ///
    /// Any game in progress is discarded, including a pending revert.
    /// Invalid pair counts fail before anything changes.
    pub fn start_game(&mut self, player_name: impl Into<String>, requested_pairs: i64) -> Result<()> {
        let deal = self.rng.state();
        let deck = self.builder.build(requested_pairs, &mut self.rng)?;
        self.begin(player_name.into(), deck, Some(deal));
        Ok(())
    }

    /// Start playing on a given deck (e.g. a replayed deal).
    ///
    /// Card flags are ignored; every card starts face-down. The deck must
    /// hold a pair count `start_game` could have dealt: at least two, even,
    /// and within the configured cap.
    pub fn start_with_deck(&mut self, player_name: impl Into<String>, deck: Deck) -> Result<()> {
        let deck = Deck::from_identities(deck.identities())?;
        let pairs = i64::try_from(deck.pair_count()).unwrap_or(i64::MAX);
        if i64::from(self.builder.normalize(pairs)?) != pairs {
            return Err(GameError::invalid(format!(
                "deck of {pairs} pairs is not a playable pair count"
            )));
        }
        self.begin(player_name.into(), deck, None);
        Ok(())
    }

    /// Re-deal a previous board from its RNG state.
    pub fn replay_deal(
        &mut self,
        player_name: impl Into<String>,
        requested_pairs: i64,
        deal: &GameRngState,
    ) -> Result<()> {
        let mut rng = GameRng::from_state(deal);
        let deck = self.builder.build(requested_pairs, &mut rng)?;
        self.begin(player_name.into(), deck, Some(deal.clone()));
        Ok(())
    }

    /// Flip the card at `position`.
    pub fn flip(&mut self, position: Position) -> Result<FlipOutcome> {
        let Some(state) = self.state.as_mut() else {
            trace!(%position, "flip rejected: no game");
            return Err(Rejection::NotStarted.into());
        };

        let outcome = FlipEngine::request_flip(state, position).inspect_err(|err| {
            trace!(%position, %err, "flip rejected");
        })?;

        match outcome {
            FlipOutcome::Revealed { position, identity } => {
                debug!(%position, %identity, "card revealed");
                self.events.push(GameEvent::CardRevealed { position, identity });
            }
            FlipOutcome::Matched {
                first,
                second,
                identity,
                matched_pairs,
                complete,
            } => {
                debug!(%first, %second, matched_pairs, "pair matched");
                self.events.push(GameEvent::CardRevealed {
                    position: second,
                    identity,
                });
                self.events.push(GameEvent::PairMatched {
                    first,
                    second,
                    identity,
                    matched_pairs,
                });
                if complete {
                    self.finish();
                }
            }
            FlipOutcome::Mismatched { first, second } => {
                if let Some(identity) = state.deck().get(second).map(|c| c.identity) {
                    self.events.push(GameEvent::CardRevealed {
                        position: second,
                        identity,
                    });
                }
                let ticket = self.schedule_revert();
                debug!(%first, %second, delay = ?ticket.delay, "mismatch");
                self.events.push(GameEvent::MismatchScheduled {
                    first,
                    second,
                    ticket,
                });
            }
        }

        Ok(outcome)
    }

    /// Freeze play, the clock, and any pending revert.
    pub fn pause(&mut self) -> Result<()> {
        let now = self.now();
        let state = self.state.as_mut().ok_or(Rejection::NotStarted)?;

        match state.phase {
            Phase::Active | Phase::ResolvingMismatch => {}
            Phase::Paused => return Err(Rejection::Paused.into()),
            Phase::Ended => return Err(Rejection::Ended.into()),
            Phase::NotStarted => return Err(Rejection::NotStarted.into()),
        }

        self.paused_from = Some(state.phase);
        state.phase = Phase::Paused;
        self.timer.pause();
        if let Some(pending) = self.pending.as_mut() {
            pending.freeze(now);
        }

        let elapsed = self.timer.elapsed();
        debug!(?elapsed, "paused");
        self.events.push(GameEvent::Paused { elapsed });
        Ok(())
    }

    /// Continue a paused game where it left off.
    pub fn resume(&mut self) -> Result<()> {
        let now = self.now();
        let state = self.state.as_mut().ok_or(Rejection::NotStarted)?;

        match state.phase {
            Phase::Paused => {}
            Phase::Ended => return Err(Rejection::Ended.into()),
            _ => return Err(Rejection::NotPaused.into()),
        }

        state.phase = self.paused_from.take().unwrap_or(Phase::Active);
        self.timer.resume();
        if let Some(pending) = self.pending.as_mut() {
            pending.thaw(now);
        }

        let elapsed = self.timer.elapsed();
        debug!(?elapsed, "resumed");
        self.events.push(GameEvent::Resumed { elapsed });
        Ok(())
    }

    /// Discard the current game and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.discard_game();
        info!(epoch = %self.epoch, "game reset");
        self.events.push(GameEvent::Reset { epoch: self.epoch });
    }

    /// Sample the clock: fires a due revert and records a `Tick` while
    /// the game is running. Returns the elapsed time.
    pub fn tick(&mut self) -> Duration {
        if let Some(ticket) = self.pending_revert() {
            self.complete_revert(ticket);
        }

        let elapsed = self.elapsed();
        if matches!(self.phase(), Phase::Active | Phase::ResolvingMismatch) {
            self.events.push(GameEvent::Tick { elapsed });
        }
        elapsed
    }

    /// Turn a mismatched pair back, if `ticket` is still current and due.
    pub fn complete_revert(&mut self, ticket: RevertTicket) -> RevertStatus {
        let now = self.now();
        let Some(pending) = self.pending.as_ref() else {
            trace!(epoch = %ticket.epoch, sequence = ticket.sequence, "stale revert ignored");
            return RevertStatus::Stale;
        };
        if pending.ticket != ticket {
            trace!(epoch = %ticket.epoch, sequence = ticket.sequence, "stale revert ignored");
            return RevertStatus::Stale;
        }
        if !pending.is_due(now) {
            return RevertStatus::Pending {
                remaining: pending.remaining(now),
            };
        }

        let reverted = self.state.as_mut().and_then(FlipEngine::revert_mismatch);
        self.pending = None;

        match reverted {
            Some((first, second)) => {
                debug!(%first, %second, "mismatch reverted");
                self.events.push(GameEvent::CardsReverted { first, second });
                RevertStatus::Applied
            }
            None => RevertStatus::Stale,
        }
    }

    // === Internals ===

    fn now(&self) -> Instant {
        self.timer.clock().now()
    }

    fn begin(&mut self, player_name: String, deck: Deck, deal: Option<GameRngState>) {
        self.discard_game();

        let state = GameState::new(player_name, deck, deal);
        info!(
            epoch = %self.epoch,
            player = state.player_name(),
            pairs = state.total_pairs(),
            "game started"
        );
        self.events.push(GameEvent::GameStarted {
            epoch: self.epoch,
            player_name: state.player_name().to_string(),
            pairs: state.total_pairs(),
            cards: state.deck().len(),
        });

        self.state = Some(state);
        self.timer.start();
    }

    fn discard_game(&mut self) {
        self.epoch = self.epoch.next();
        self.state = None;
        self.pending = None;
        self.paused_from = None;
        self.summary = None;
        self.timer.reset();
    }

    fn schedule_revert(&mut self) -> RevertTicket {
        let ticket = RevertTicket {
            epoch: self.epoch,
            sequence: self.next_sequence,
            delay: self.config.mismatch_delay,
        };
        self.next_sequence += 1;
        self.pending = Some(PendingRevert::new(ticket, self.now()));
        ticket
    }

    fn finish(&mut self) {
        let elapsed = self.timer.stop();
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.phase = Phase::Ended;

        let summary = GameSummary {
            player_name: state.player_name.clone(),
            pairs: state.total_pairs,
            elapsed,
        };
        info!(
            player = %summary.player_name,
            pairs = summary.pairs,
            time = %summary.clock(),
            "game won"
        );
        self.events.push(GameEvent::GameEnded(summary.clone()));
        self.summary = Some(summary);
    }
}

impl<C: Clock> std::fmt::Debug for GameController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("phase", &self.phase())
            .field("epoch", &self.epoch)
            .field("elapsed", &self.elapsed())
            .field("pending_revert", &self.pending_revert())
            .finish_non_exhaustive()
    }
}
