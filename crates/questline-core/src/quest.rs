//! Quest data model.
//!
//! A quest is a unit of progress tracking supplied by the caller: win some
//! games, resolve some spells, or play cards of particular colors, before
//! the quest expires. The engine treats quests as read-only input per call.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Kind of quest progress being tracked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Win N games in any queue
    WinGames,
    /// Resolve N spells
    CastSpells,
    /// Play N cards of the tagged colors
    PlayColors,
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestKind::WinGames => write!(f, "win games"),
            QuestKind::CastSpells => write!(f, "cast spells"),
            QuestKind::PlayColors => write!(f, "play colors"),
        }
    }
}

/// Color tag for color-sensitive quests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTag::White => write!(f, "white"),
            ColorTag::Blue => write!(f, "blue"),
            ColorTag::Black => write!(f, "black"),
            ColorTag::Red => write!(f, "red"),
            ColorTag::Green => write!(f, "green"),
        }
    }
}

/// A time-limited quest with a remaining progress count.
///
/// `expires_in_days == 0` means the quest expires today. `colors` is only
/// meaningful for [`QuestKind::PlayColors`] and must be non-empty there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quest {
    pub id: String,
    pub kind: QuestKind,
    pub description: String,
    pub remaining: u32,
    pub expires_in_days: u32,
    #[serde(default)]
    pub colors: BTreeSet<ColorTag>,
}

impl Quest {
    /// Create a new quest with a generated id and no color tags.
    pub fn new(
        kind: QuestKind,
        description: impl Into<String>,
        remaining: u32,
        expires_in_days: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            description: description.into(),
            remaining,
            expires_in_days,
            colors: BTreeSet::new(),
        }
    }

    /// Attach color tags (builder-style).
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = ColorTag>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Whether the quest still has progress left to make.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Whether the quest expires within the given number of days.
    pub fn expires_within(&self, days: u32) -> bool {
        self.expires_in_days <= days
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind == QuestKind::PlayColors && self.colors.is_empty() {
            return Err(ValidationError::MissingColors {
                quest_id: self.id.clone(),
            });
        }
        Ok(())
    }
}
