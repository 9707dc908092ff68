//! Planner settings and policy constants.
//!
//! `PlannerSettings` carries the caller's preferences (queue filter,
//! defaults for win rate and time budget). `PlannerPolicy` collects the
//! tuning constants of the optimizer as named, overridable values.

use serde::{Deserialize, Serialize};

use crate::rewards::QueueId;

/// Tuning constants for the optimizer.
///
/// Every field is a policy knob, not a law of the model: the urgency
/// thresholds and completion bonus in particular are calibration values
/// carried over from play data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerPolicy {
    /// Flat gold-equivalent value of finishing a quest, amortized over the
    /// games needed to finish it.
    #[serde(default = "default_completion_bonus_gold")]
    pub completion_bonus_gold: f64,
    /// Priority multiplier for quests expiring within one day.
    #[serde(default = "default_urgency_1day")]
    pub urgency_1day_multiplier: f64,
    /// Priority multiplier for quests expiring within two days.
    #[serde(default = "default_urgency_2day")]
    pub urgency_2day_multiplier: f64,
    /// Spells resolved in an average constructed game.
    #[serde(default = "default_base_spells_per_game")]
    pub base_spells_per_game: f64,
    /// Hard cap on plan length.
    #[serde(default = "default_max_plan_steps")]
    pub max_plan_steps: usize,
    /// Largest session recommended in a single step.
    #[serde(default = "default_max_games_per_step")]
    pub max_games_per_step: u32,
    /// Smallest accepted time budget, in minutes.
    #[serde(default = "default_min_time_budget")]
    pub min_time_budget_minutes: u32,
    /// Largest accepted time budget, in minutes.
    #[serde(default = "default_max_time_budget")]
    pub max_time_budget_minutes: u32,
    /// Smallest accepted win rate.
    #[serde(default = "default_min_win_rate")]
    pub min_win_rate: f64,
    /// Largest accepted win rate.
    #[serde(default = "default_max_win_rate")]
    pub max_win_rate: f64,
    /// Unused budget above this threshold produces an advisory warning.
    #[serde(default = "default_unused_time_warning")]
    pub unused_time_warning_minutes: u32,
}

impl Default for PlannerPolicy {
    fn default() -> Self {
        Self {
            completion_bonus_gold: default_completion_bonus_gold(),
            urgency_1day_multiplier: default_urgency_1day(),
            urgency_2day_multiplier: default_urgency_2day(),
            base_spells_per_game: default_base_spells_per_game(),
            max_plan_steps: default_max_plan_steps(),
            max_games_per_step: default_max_games_per_step(),
            min_time_budget_minutes: default_min_time_budget(),
            max_time_budget_minutes: default_max_time_budget(),
            min_win_rate: default_min_win_rate(),
            max_win_rate: default_max_win_rate(),
            unused_time_warning_minutes: default_unused_time_warning(),
        }
    }
}

/// Caller preferences for plan optimization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerSettings {
    /// Restrict planning to these queues; `None` allows every catalog queue.
    #[serde(default)]
    pub preferred_queues: Option<Vec<QueueId>>,
    /// Win rate assumed when the caller does not pass one explicitly.
    #[serde(default = "default_win_rate")]
    pub default_win_rate: f64,
    /// Time budget assumed when the caller does not pass one explicitly.
    #[serde(default = "default_time_budget")]
    pub default_time_budget_minutes: u32,
    #[serde(default)]
    pub policy: PlannerPolicy,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            preferred_queues: None,
            default_win_rate: default_win_rate(),
            default_time_budget_minutes: default_time_budget(),
            policy: PlannerPolicy::default(),
        }
    }
}

// Default functions
fn default_completion_bonus_gold() -> f64 {
    500.0
}
fn default_urgency_1day() -> f64 {
    2.0
}
fn default_urgency_2day() -> f64 {
    1.5
}
fn default_base_spells_per_game() -> f64 {
    10.0
}
fn default_max_plan_steps() -> usize {
    10
}
fn default_max_games_per_step() -> u32 {
    3
}
fn default_min_time_budget() -> u32 {
    15
}
fn default_max_time_budget() -> u32 {
    180
}
fn default_min_win_rate() -> f64 {
    0.3
}
fn default_max_win_rate() -> f64 {
    0.8
}
fn default_unused_time_warning() -> u32 {
    15
}
fn default_win_rate() -> f64 {
    0.5
}
fn default_time_budget() -> u32 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize_from_empty_document() {
        let settings: PlannerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, PlannerSettings::default());
        assert_eq!(settings.policy.completion_bonus_gold, 500.0);
        assert_eq!(settings.policy.urgency_1day_multiplier, 2.0);
        assert_eq!(settings.policy.urgency_2day_multiplier, 1.5);
        assert_eq!(settings.policy.max_plan_steps, 10);
    }

    #[test]
    fn partial_policy_override_keeps_other_defaults() {
        let settings: PlannerSettings =
            serde_json::from_str(r#"{"policy": {"completion_bonus_gold": 750.0}}"#).unwrap();
        assert_eq!(settings.policy.completion_bonus_gold, 750.0);
        assert_eq!(settings.policy.max_games_per_step, 3);
    }
}
