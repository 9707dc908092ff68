//! Versioned reward catalog.
//!
//! The catalog is the configuration collaborator supplying one
//! [`QueueRewardProfile`] per queue, keyed by queue id. Lookups never fail:
//! unknown queue ids fall back to the designated default profile. Catalogs
//! ship as JSON documents (`{ version, default, queues }`) and can also be
//! built from the static tables compiled into this crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ProgressMultipliers, QueueId, QueueRewardProfile};
use crate::error::CatalogError;

/// Highest catalog document version this build understands.
pub const CATALOG_VERSION: u32 = 1;

/// Versioned map of queue reward profiles with a fallback default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardCatalog {
    pub version: u32,
    default: QueueRewardProfile,
    queues: BTreeMap<QueueId, QueueRewardProfile>,
}

impl RewardCatalog {
    /// Profile for a queue, falling back to the default profile when the
    /// queue id is unknown. Never fails.
    pub fn lookup(&self, queue: &QueueId) -> &QueueRewardProfile {
        self.queues.get(queue).unwrap_or(&self.default)
    }

    /// The designated fallback profile.
    pub fn default_profile(&self) -> &QueueRewardProfile {
        &self.default
    }

    /// All known queue ids, in lexicographic order.
    pub fn queue_ids(&self) -> impl Iterator<Item = &QueueId> {
        self.queues.keys()
    }

    /// All known queue profiles, in queue id order.
    pub fn profiles(&self) -> impl Iterator<Item = &QueueRewardProfile> {
        self.queues.values()
    }

    /// Number of known queues.
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    /// Whether the catalog carries no queues beyond the default.
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Parse and validate a catalog JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: RewardCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize the catalog as a pretty JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.version > CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: self.version,
                supported: CATALOG_VERSION,
            });
        }
        for profile in self.queues.values().chain(std::iter::once(&self.default)) {
            validate_profile(profile)?;
        }
        Ok(())
    }

    /// The static catalog compiled into this crate.
    ///
    /// Entry costs and reward tables follow the usual ladder economy: the
    /// constructed ranks are free with flat win rewards, drafts charge an
    /// entry fee and pay gems and packs scaled by final win count.
    pub fn builtin() -> Self {
        let mut queues = BTreeMap::new();
        for profile in builtin_profiles() {
            queues.insert(profile.queue.clone(), profile);
        }
        Self {
            version: CATALOG_VERSION,
            default: default_profile(),
            queues,
        }
    }
}

fn validate_profile(profile: &QueueRewardProfile) -> Result<(), CatalogError> {
    let empty_gold = profile.gold_by_wins.is_empty();
    let empty_gems = profile.gems_by_wins.as_ref().map_or(true, |a| a.is_empty());
    let empty_packs = profile.packs_by_wins.as_ref().map_or(true, |a| a.is_empty());
    if empty_gold && empty_gems && empty_packs {
        return Err(CatalogError::EmptyRewardTable {
            queue: profile.queue.to_string(),
        });
    }
    if !(profile.average_game_minutes > 0.0) {
        return Err(CatalogError::NonPositiveDuration {
            queue: profile.queue.to_string(),
        });
    }
    Ok(())
}

fn default_profile() -> QueueRewardProfile {
    QueueRewardProfile {
        queue: QueueId::from("play"),
        display_name: "Open Play".to_string(),
        entry_cost_gold: 0,
        gold_by_wins: vec![0, 250],
        gems_by_wins: None,
        packs_by_wins: None,
        average_game_minutes: 8.0,
        progress_multipliers: ProgressMultipliers::default(),
    }
}

fn builtin_profiles() -> Vec<QueueRewardProfile> {
    vec![
        QueueRewardProfile {
            queue: QueueId::from("ranked"),
            display_name: "Standard Ranked".to_string(),
            entry_cost_gold: 0,
            gold_by_wins: vec![0, 250, 450, 600, 700, 750],
            gems_by_wins: None,
            packs_by_wins: None,
            average_game_minutes: 8.0,
            progress_multipliers: ProgressMultipliers::default(),
        },
        QueueRewardProfile {
            queue: QueueId::from("historic"),
            display_name: "Historic Ranked".to_string(),
            entry_cost_gold: 0,
            gold_by_wins: vec![0, 250, 450, 600, 700, 750],
            gems_by_wins: None,
            packs_by_wins: None,
            average_game_minutes: 9.0,
            progress_multipliers: ProgressMultipliers::default(),
        },
        QueueRewardProfile {
            queue: QueueId::from("quick_draft"),
            display_name: "Quick Draft".to_string(),
            entry_cost_gold: 5000,
            gold_by_wins: vec![0; 8],
            gems_by_wins: Some(vec![50, 100, 200, 300, 450, 650, 850, 950]),
            packs_by_wins: Some(vec![1, 1, 1, 1, 1, 1, 1, 2]),
            average_game_minutes: 10.0,
            progress_multipliers: ProgressMultipliers {
                win_games: 1.0,
                cast_spells: 0.8,
                play_colors: 0.6,
            },
        },
        QueueRewardProfile {
            queue: QueueId::from("premier_draft"),
            display_name: "Premier Draft".to_string(),
            entry_cost_gold: 10000,
            gold_by_wins: vec![0; 8],
            gems_by_wins: Some(vec![50, 100, 250, 1000, 1400, 1600, 1800, 2200]),
            packs_by_wins: Some(vec![1, 1, 2, 2, 3, 4, 5, 6]),
            average_game_minutes: 12.0,
            progress_multipliers: ProgressMultipliers {
                win_games: 1.0,
                cast_spells: 0.8,
                play_colors: 0.6,
            },
        },
        QueueRewardProfile {
            queue: QueueId::from("traditional_draft"),
            display_name: "Traditional Draft".to_string(),
            entry_cost_gold: 10000,
            gold_by_wins: vec![0; 4],
            gems_by_wins: Some(vec![100, 250, 1000, 2500]),
            packs_by_wins: Some(vec![1, 1, 4, 6]),
            // one "game" here is a best-of-three match
            average_game_minutes: 25.0,
            progress_multipliers: ProgressMultipliers {
                win_games: 2.0,
                cast_spells: 2.0,
                play_colors: 1.5,
            },
        },
        QueueRewardProfile {
            queue: QueueId::from("midweek"),
            display_name: "Midweek Event".to_string(),
            entry_cost_gold: 0,
            gold_by_wins: vec![0, 250, 500],
            gems_by_wins: None,
            packs_by_wins: None,
            average_game_minutes: 6.0,
            progress_multipliers: ProgressMultipliers::default(),
        },
    ]
}
