//! Match configuration types.
//!
//! A host configures the engine once, then starts any number of games:
//! - `DeckConfig`: Limits on deck construction
//! - `AssetCatalog`: Where the renderer finds each card face
//! - `MatchConfig`: Combines all configuration
//!
//! Per-game input (player name, requested pair count) is passed to
//! `start_game` instead, since it changes every game.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::SymbolId;

/// Maximum number of pairs a deck may hold.
pub const MAX_PAIRS: u32 = 30;

/// How long a mismatched pair stays face-up before turning back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

/// Deck construction limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Requests above this are clamped down to it.
    pub max_pairs: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            max_pairs: MAX_PAIRS,
        }
    }
}

impl DeckConfig {
    /// Set the pair cap.
    ///
    /// The cap itself is normalized like any request, so an odd cap behaves
    /// like the even number below it.
    #[must_use]
    pub fn with_max_pairs(mut self, max_pairs: u32) -> Self {
        self.max_pairs = max_pairs;
        self
    }
}

/// Maps symbol identities to card-face assets.
///
/// The engine never loads or validates assets; it only hands the renderer
/// a path per identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCatalog {
    /// Directory holding the card faces, including the trailing separator.
    pub directory: String,
    /// File name prefix before the identity number.
    pub prefix: String,
    /// File extension including the dot.
    pub extension: String,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            directory: "resources/gameCards/".to_string(),
            prefix: "img".to_string(),
            extension: ".jpeg".to_string(),
        }
    }
}

impl AssetCatalog {
    /// Create a catalog rooted at `directory`.
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Asset path for a card face.
    #[must_use]
    pub fn path(&self, symbol: SymbolId) -> String {
        format!(
            "{}{}{}{}",
            self.directory,
            self.prefix,
            symbol.raw(),
            self.extension
        )
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Deck construction limits.
    pub deck: DeckConfig,

    /// Visible interval for a mismatched pair.
    pub mismatch_delay: Duration,

    /// Fixed RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Card-face asset mapping.
    pub assets: AssetCatalog,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            deck: DeckConfig::default(),
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            seed: None,
            assets: AssetCatalog::default(),
        }
    }
}

impl MatchConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed seed so deals are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckConfig) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_assets(mut self, assets: AssetCatalog) -> Self {
        self.assets = assets;
        self
    }
}
