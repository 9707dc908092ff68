//! Threaded quest-progress state for the greedy loop.
//!
//! The ledger is an explicit state value owned by the optimizer loop and
//! threaded through each iteration, so every iteration is a plain state
//! transition over (ledger, remaining time) with no hidden aliasing.

use std::collections::HashMap;

use crate::quest::Quest;

/// Remaining progress below this counts as satisfied.
const SATISFIED_EPSILON: f64 = 1e-9;

/// Tracked fractional remaining progress, keyed by quest id.
#[derive(Debug, Clone, Default)]
pub struct ProgressLedger {
    remaining: HashMap<String, f64>,
}

impl ProgressLedger {
    /// Build a ledger from the active quests.
    pub fn new<'a>(quests: impl IntoIterator<Item = &'a Quest>) -> Self {
        let remaining = quests
            .into_iter()
            .map(|q| (q.id.clone(), q.remaining as f64))
            .collect();
        Self { remaining }
    }

    /// Tracked remaining progress for a quest; zero for unknown ids.
    pub fn remaining(&self, quest_id: &str) -> f64 {
        self.remaining.get(quest_id).copied().unwrap_or(0.0)
    }

    /// Whether a quest's tracked remaining progress has reached zero.
    pub fn is_satisfied(&self, quest_id: &str) -> bool {
        self.remaining(quest_id) <= SATISFIED_EPSILON
    }

    /// Deduct progress from a quest, clamping at zero.
    pub fn apply(&mut self, quest_id: &str, amount: f64) {
        if let Some(remaining) = self.remaining.get_mut(quest_id) {
            *remaining = (*remaining - amount).max(0.0);
        }
    }

    /// Whether every tracked quest is satisfied.
    pub fn all_satisfied(&self) -> bool {
        self.remaining.values().all(|&r| r <= SATISFIED_EPSILON)
    }
}
