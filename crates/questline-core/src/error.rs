//! Core error types for questline-core.
//!
//! This module defines the error hierarchy using thiserror. Expected
//! conditions (bad inputs, empty quest lists, budgets too small to finish
//! anything) are always surfaced as typed results, never panics.

use thiserror::Error;

use crate::plan::PlanWarning;

/// Core error type for questline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reward catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Plan optimization errors
    #[error("Optimization error: {0}")]
    Optimize(#[from] OptimizeError),

    /// Plan mutation errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for engine inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Win rate outside the accepted range
    #[error("win rate {value} outside accepted range [{min}, {max}]")]
    WinRateOutOfRange { value: f64, min: f64, max: f64 },

    /// Time budget outside the accepted range
    #[error("time budget {minutes}min outside accepted range [{min}, {max}] minutes")]
    TimeBudgetOutOfRange { minutes: u32, min: u32, max: u32 },

    /// Color quest without any color tags
    #[error("quest '{quest_id}' tracks colors but has no color tags")]
    MissingColors { quest_id: String },

    /// Invalid value for a named field
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Errors loading or validating a reward catalog document.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to parse the catalog document
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog document version is newer than this build supports
    #[error("catalog version {found} is not supported (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A queue profile carries no reward entries at all
    #[error("queue '{queue}' has an empty reward table")]
    EmptyRewardTable { queue: String },

    /// Average game duration must be positive
    #[error("queue '{queue}' has non-positive average game duration")]
    NonPositiveDuration { queue: String },
}

/// Errors from plan optimization.
///
/// `InsufficientTime` carries the advisory warnings gathered before the
/// failure so callers can still explain which quests were infeasible.
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// Inputs failed validation; no partial computation was attempted
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Every supplied quest already has zero remaining progress
    #[error("no active quests to plan for")]
    NoActiveQuests,

    /// No active quest is completable inside the budget in any allowed queue
    #[error("no quest can be completed within a {budget_minutes} minute budget")]
    InsufficientTime {
        budget_minutes: u32,
        warnings: Vec<PlanWarning>,
    },
}

/// Errors from plan mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The targeted step does not exist in the plan
    #[error("plan has no step with id '{step_id}'")]
    UnknownStep { step_id: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
