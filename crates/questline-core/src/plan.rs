//! Plan data model: steps, the optimized plan, and step mutation.
//!
//! Plans are immutable once produced except for per-step `completed`
//! flags; any structural change goes through recalculation, which returns
//! an entirely new plan.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::rewards::{CurrencyBundle, QueueId};

/// Progress one plan step contributes to one quest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestProgress {
    pub quest_id: String,
    /// Expected progress amount, always positive.
    pub amount: f64,
}

/// One recommended block of games in a single queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanStep {
    pub id: String,
    pub queue: QueueId,
    pub display_name: String,
    pub target_games: u32,
    pub estimated_minutes: u32,
    pub expected_rewards: CurrencyBundle,
    pub quest_progress: Vec<QuestProgress>,
    pub completed: bool,
}

/// An ordered, time-bounded plan of queue sessions.
///
/// Invariants: `total_estimated_minutes` equals the sum of step minutes
/// and never exceeds `time_budget_minutes`; `total_expected_rewards`
/// equals the component-wise sum of step rewards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizedPlan {
    pub id: String,
    pub steps: Vec<PlanStep>,
    pub total_estimated_minutes: u32,
    pub total_expected_rewards: CurrencyBundle,
    /// Quests expected to reach zero remaining if the plan is played out.
    pub completable_quest_ids: BTreeSet<String>,
    pub time_budget_minutes: u32,
    pub win_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OptimizedPlan {
    /// Look up a step by id.
    pub fn step(&self, step_id: &str) -> Option<&PlanStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Minutes consumed by steps marked complete.
    pub fn completed_minutes(&self) -> u32 {
        self.steps
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.estimated_minutes)
            .sum()
    }

    /// Budget left after subtracting completed steps. Negative when
    /// completed steps overran the budget estimate.
    pub fn remaining_budget_minutes(&self) -> i64 {
        self.time_budget_minutes as i64 - self.completed_minutes() as i64
    }

    /// Whether every step has been marked complete.
    pub fn all_steps_completed(&self) -> bool {
        self.steps.iter().all(|s| s.completed)
    }
}

/// Advisory warning attached to an optimization outcome.
///
/// Warnings never block a successful result; callers surface them as
/// dismissible notices. `Display` renders the caller-facing text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlanWarning {
    /// A quest cannot reach zero remaining inside the budget
    QuestNotCompletable {
        quest_id: String,
        description: String,
    },
    /// A quest expires within one day
    QuestExpiringSoon {
        quest_id: String,
        description: String,
        expires_in_days: u32,
    },
    /// The plan leaves a sizeable chunk of the budget unused
    UnusedBudget { minutes: u32 },
    /// Recalculation found no budget left at all
    AllTimeUsed,
    /// Recalculation found less budget than the minimum viable plan
    InsufficientRemainingTime { minutes: i64 },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::QuestNotCompletable { description, .. } => {
                write!(f, "quest '{description}' cannot be completed in this budget")
            }
            PlanWarning::QuestExpiringSoon {
                description,
                expires_in_days,
                ..
            } => {
                if *expires_in_days == 0 {
                    write!(f, "quest '{description}' expires today")
                } else {
                    write!(
                        f,
                        "quest '{description}' expires in {expires_in_days} day(s)"
                    )
                }
            }
            PlanWarning::UnusedBudget { minutes } => {
                write!(f, "{minutes} minutes of the budget are left unused")
            }
            PlanWarning::AllTimeUsed => write!(f, "all budgeted time has been used"),
            PlanWarning::InsufficientRemainingTime { minutes } => {
                write!(f, "{minutes} minutes left is too little to plan for")
            }
        }
    }
}

/// Return a new plan with exactly one step's `completed` flag changed.
///
/// Everything except the flag and `updated_at` is carried over untouched;
/// quest state is never consulted.
pub fn mark_step(
    plan: &OptimizedPlan,
    step_id: &str,
    completed: bool,
) -> Result<OptimizedPlan, PlanError> {
    let mut next = plan.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| PlanError::UnknownStep {
            step_id: step_id.to_string(),
        })?;
    step.completed = completed;
    next.updated_at = Utc::now();
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_test_plan() -> OptimizedPlan {
        let now = Utc::now();
        let steps = vec![
            PlanStep {
                id: "step-1".to_string(),
                queue: QueueId::from("ranked"),
                display_name: "Standard Ranked".to_string(),
                target_games: 3,
                estimated_minutes: 24,
                expected_rewards: CurrencyBundle {
                    gold: 300,
                    gems: 0,
                    packs: 0,
                },
                quest_progress: vec![QuestProgress {
                    quest_id: "quest-1".to_string(),
                    amount: 1.5,
                }],
                completed: false,
            },
            PlanStep {
                id: "step-2".to_string(),
                queue: QueueId::from("midweek"),
                display_name: "Midweek Event".to_string(),
                target_games: 2,
                estimated_minutes: 12,
                expected_rewards: CurrencyBundle {
                    gold: 150,
                    gems: 0,
                    packs: 0,
                },
                quest_progress: vec![QuestProgress {
                    quest_id: "quest-1".to_string(),
                    amount: 1.0,
                }],
                completed: false,
            },
        ];
        OptimizedPlan {
            id: Uuid::new_v4().to_string(),
            steps,
            total_estimated_minutes: 36,
            total_expected_rewards: CurrencyBundle {
                gold: 450,
                gems: 0,
                packs: 0,
            },
            completable_quest_ids: BTreeSet::from(["quest-1".to_string()]),
            time_budget_minutes: 60,
            win_rate: 0.5,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn mark_step_flips_only_the_targeted_flag() {
        let plan = make_test_plan();
        let marked = mark_step(&plan, "step-1", true).unwrap();
        assert!(marked.step("step-1").unwrap().completed);
        assert!(!marked.step("step-2").unwrap().completed);
        assert_eq!(marked.total_estimated_minutes, plan.total_estimated_minutes);
        assert_eq!(marked.completed_minutes(), 24);
        assert_eq!(marked.remaining_budget_minutes(), 36);
    }

    #[test]
    fn mark_twice_restores_the_original_structure() {
        let plan = make_test_plan();
        let marked = mark_step(&plan, "step-2", true).unwrap();
        let mut restored = mark_step(&marked, "step-2", false).unwrap();
        // only the transient timestamp may differ
        restored.updated_at = plan.updated_at;
        assert_eq!(restored, plan);
    }

    #[test]
    fn unknown_step_id_is_a_typed_error() {
        let plan = make_test_plan();
        assert!(matches!(
            mark_step(&plan, "no-such-step", true),
            Err(PlanError::UnknownStep { .. })
        ));
    }

    #[test]
    fn warnings_render_caller_facing_text() {
        let warning = PlanWarning::UnusedBudget { minutes: 20 };
        assert_eq!(
            warning.to_string(),
            "20 minutes of the budget are left unused"
        );
        let expiring = PlanWarning::QuestExpiringSoon {
            quest_id: "q".to_string(),
            description: "Win 5 games".to_string(),
            expires_in_days: 0,
        };
        assert_eq!(expiring.to_string(), "quest 'Win 5 games' expires today");
    }
}
