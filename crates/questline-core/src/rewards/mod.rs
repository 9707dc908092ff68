//! Reward model: currencies, per-queue reward profiles, and the catalog.
//!
//! Rewards come in three currencies: gold (primary), gems (secondary), and
//! booster packs (bonus items). Reward tables are indexed by cumulative win
//! count and supplied by a versioned catalog document; gems and packs are
//! converted to gold at fixed ratios when a single scalar value is needed.

pub mod catalog;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quest::QuestKind;

pub use catalog::{RewardCatalog, CATALOG_VERSION};

/// Gold value of one gem.
pub const GEMS_TO_GOLD: f64 = 5.0;

/// Gold value of one booster pack.
pub const PACKS_TO_GOLD: f64 = 1000.0;

/// A whole-unit bundle of the three reward currencies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyBundle {
    pub gold: u32,
    pub gems: u32,
    pub packs: u32,
}

impl CurrencyBundle {
    /// Component-wise saturating sum.
    pub fn saturating_add(self, other: CurrencyBundle) -> CurrencyBundle {
        CurrencyBundle {
            gold: self.gold.saturating_add(other.gold),
            gems: self.gems.saturating_add(other.gems),
            packs: self.packs.saturating_add(other.packs),
        }
    }

    /// Scalar value of the bundle in gold at the fixed conversion ratios.
    pub fn value_in_gold(&self) -> f64 {
        self.gold as f64 + self.gems as f64 * GEMS_TO_GOLD + self.packs as f64 * PACKS_TO_GOLD
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.gold == 0 && self.gems == 0 && self.packs == 0
    }
}

impl fmt::Display for CurrencyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} gold, {} gems, {} packs",
            self.gold, self.gems, self.packs
        )
    }
}

/// Fractional expected rewards, kept unrounded for EV math.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpectedRewards {
    pub gold: f64,
    pub gems: f64,
    pub packs: f64,
}

impl ExpectedRewards {
    /// Scalar value in gold at the fixed conversion ratios.
    pub fn value_in_gold(&self) -> f64 {
        self.gold + self.gems * GEMS_TO_GOLD + self.packs * PACKS_TO_GOLD
    }

    /// Multiply every component by a factor.
    pub fn scale(&self, factor: f64) -> ExpectedRewards {
        ExpectedRewards {
            gold: self.gold * factor,
            gems: self.gems * factor,
            packs: self.packs * factor,
        }
    }

    /// Round each component to whole reward units.
    pub fn round(&self) -> CurrencyBundle {
        CurrencyBundle {
            gold: self.gold.round().max(0.0) as u32,
            gems: self.gems.round().max(0.0) as u32,
            packs: self.packs.round().max(0.0) as u32,
        }
    }
}

/// Identifier of a game queue.
///
/// Queue ids are open-ended strings rather than a closed enum: catalogs are
/// external documents and may carry queues this build has never heard of.
/// `Ord` gives the deterministic lexicographic tie-break in the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct QueueId(String);

impl QueueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QueueId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Per-game quest progress multipliers for a queue.
///
/// Scales how fast each quest kind advances per game played in the queue,
/// e.g. limited formats resolve fewer spells per game than constructed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProgressMultipliers {
    pub win_games: f64,
    pub cast_spells: f64,
    pub play_colors: f64,
}

impl ProgressMultipliers {
    /// Multiplier for a quest kind.
    pub fn for_kind(&self, kind: QuestKind) -> f64 {
        match kind {
            QuestKind::WinGames => self.win_games,
            QuestKind::CastSpells => self.cast_spells,
            QuestKind::PlayColors => self.play_colors,
        }
    }
}

impl Default for ProgressMultipliers {
    fn default() -> Self {
        Self {
            win_games: 1.0,
            cast_spells: 1.0,
            play_colors: 1.0,
        }
    }
}

/// Static reward profile of one queue.
///
/// Reward arrays are indexed by cumulative win count: index 0 is the payout
/// after zero wins, the last index is the payout cap. Gold is mandatory;
/// gem and pack tables exist only for queues that pay them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueRewardProfile {
    pub queue: QueueId,
    pub display_name: String,
    pub entry_cost_gold: u32,
    pub gold_by_wins: Vec<u32>,
    #[serde(default)]
    pub gems_by_wins: Option<Vec<u32>>,
    #[serde(default)]
    pub packs_by_wins: Option<Vec<u32>>,
    pub average_game_minutes: f64,
    #[serde(default)]
    pub progress_multipliers: ProgressMultipliers,
}
