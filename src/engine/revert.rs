//! Scheduling for the mismatch revert.
//!
//! When two cards don't match they stay face-up for a fixed delay. The
//! controller models that delay as a [`PendingRevert`] identified by a
//! [`RevertTicket`]. Tickets carry the game [`Epoch`] they were issued in;
//! starting or resetting a game moves to a new epoch, so a ticket that
//! fires late can never touch the next game's board.
//!
//! Pausing freezes the remaining delay and resuming re-arms it.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Game generation counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(pub u64);

impl Epoch {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

/// Handle for a scheduled revert.
///
/// Hosts that drive the delay themselves sleep for `delay` and then pass the
/// ticket to `GameController::complete_revert`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevertTicket {
    /// Game the revert belongs to.
    pub epoch: Epoch,
    /// Issue order within the controller.
    pub sequence: u64,
    /// Delay requested when the revert was scheduled.
    pub delay: Duration,
}

/// Outcome of trying to complete a revert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevertStatus {
    /// The cards were turned back.
    Applied,
    /// Not due yet (or frozen by a pause).
    Pending { remaining: Duration },
    /// The ticket no longer refers to anything; nothing happened.
    Stale,
}

/// A mismatch waiting to be turned back. The cards themselves are the
/// current turn's pair.
#[derive(Clone, Debug)]
pub(crate) struct PendingRevert {
    pub(crate) ticket: RevertTicket,
    remaining: Duration,
    /// `None` while frozen.
    armed_at: Option<Instant>,
}

impl PendingRevert {
    pub(crate) fn new(ticket: RevertTicket, now: Instant) -> Self {
        Self {
            ticket,
            remaining: ticket.delay,
            armed_at: Some(now),
        }
    }

    pub(crate) fn remaining(&self, now: Instant) -> Duration {
        match self.armed_at {
            Some(armed) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(armed)),
            None => self.remaining,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.is_armed() && self.remaining(now).is_zero()
    }

    pub(crate) fn freeze(&mut self, now: Instant) {
        if self.armed_at.is_some() {
            self.remaining = self.remaining(now);
            self.armed_at = None;
        }
    }

    pub(crate) fn thaw(&mut self, now: Instant) {
        if self.armed_at.is_none() {
            self.armed_at = Some(now);
        }
    }
}
