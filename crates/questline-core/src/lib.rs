//! # Questline Core Library
//!
//! This library provides the core planning logic for Questline: given a
//! set of time-limited quests, a time budget, and a win-rate estimate, it
//! produces an ordered plan of queue sessions that maximizes expected
//! reward while finishing expiring quests first. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary, with any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Reward Model**: static per-queue reward tables supplied by a
//!   versioned catalog document with a fallback default profile
//! - **EV Calculator**: pure win-streak expectation math and quest
//!   progress rates
//! - **Plan Optimizer**: an adaptive greedy scheduler emitting ordered,
//!   time-bounded plan steps
//! - **Recalculation**: re-plans the unused budget after steps complete
//! - **Robustness**: seeded Monte Carlo playout of a plan's variance
//!
//! The engine is single-threaded, synchronous, and side-effect free:
//! every entry point is a pure function of its arguments, cheap enough to
//! re-run from scratch on every input change.
//!
//! ## Key Entry Points
//!
//! - [`optimize_plan`]: quests + budget + win rate -> [`OptimizedPlan`]
//! - [`mark_step`]: flip one step's completion flag
//! - [`recalculate`]: re-plan the unused portion of the budget
//! - [`RewardCatalog`]: the queue reward table collaborator

pub mod error;
pub mod ev;
pub mod optimizer;
pub mod plan;
pub mod quest;
pub mod rewards;
pub mod robustness;
pub mod settings;

pub use error::{CatalogError, CoreError, OptimizeError, PlanError, ValidationError};
pub use ev::{
    combined_ev, estimate_completion, expected_array_value, queue_ev, quest_progress_rate,
    CompletionEstimate, ProgressRate, QueueEv,
};
pub use optimizer::{optimize_plan, recalculate, Optimization};
pub use plan::{mark_step, OptimizedPlan, PlanStep, PlanWarning, QuestProgress};
pub use quest::{ColorTag, Quest, QuestKind};
pub use rewards::{
    CurrencyBundle, ExpectedRewards, ProgressMultipliers, QueueId, QueueRewardProfile,
    RewardCatalog, CATALOG_VERSION,
};
pub use robustness::{
    MonteCarloConfig, MonteCarloSimulator, QuestCompletionInfo, RiskLevel, RobustnessReport,
};
pub use settings::{PlannerPolicy, PlannerSettings};
