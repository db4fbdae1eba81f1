//! End-of-game summary and clock formatting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Format a duration as `MM:SS`, zero-padded. Minutes are not capped.
///
/// ```
/// use std::time::Duration;
/// use memory_match::engine::format_clock;
///
/// assert_eq!(format_clock(Duration::from_millis(65_999)), "01:05");
/// ```
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub player_name: String,
    /// Pairs matched (the normalized pair count).
    pub pairs: u32,
    /// Final active play time.
    pub elapsed: Duration,
}

impl GameSummary {
    /// Elapsed time as `MM:SS`.
    #[must_use]
    pub fn clock(&self) -> String {
        format_clock(self.elapsed)
    }
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Congratulations, {}!\nYou finished the game in {}",
            self.player_name,
            self.clock()
        )
    }
}
