//! File-backed state for the CLI.
//!
//! The core engine is pure, so quests, the current plan, and settings live
//! in plain files under the user config dir and are maintained entirely on
//! this side: `quests.json`, `plan.json`, and `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use questline_core::{OptimizedPlan, PlannerSettings, Quest, RewardCatalog};

pub type CliError = Box<dyn std::error::Error>;

/// Config directory, created on first use.
pub fn config_dir() -> Result<PathBuf, CliError> {
    let dir = dirs::config_dir()
        .ok_or("could not determine config directory")?
        .join("questline");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load settings, falling back to defaults when absent or unreadable.
pub fn load_settings() -> PlannerSettings {
    let Ok(dir) = config_dir() else {
        return PlannerSettings::default();
    };
    let path = dir.join("config.toml");
    match fs::read_to_string(&path) {
        Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
            log::warn!("ignoring malformed {}: {e}", path.display());
            PlannerSettings::default()
        }),
        Err(_) => PlannerSettings::default(),
    }
}

pub fn save_settings(settings: &PlannerSettings) -> Result<(), CliError> {
    let path = config_dir()?.join("config.toml");
    fs::write(&path, toml::to_string_pretty(settings)?)?;
    Ok(())
}

/// Load the stored quests; an absent file is an empty list.
pub fn load_quests() -> Result<Vec<Quest>, CliError> {
    let path = config_dir()?.join("quests.json");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn save_quests(quests: &[Quest]) -> Result<(), CliError> {
    let path = config_dir()?.join("quests.json");
    fs::write(&path, serde_json::to_string_pretty(quests)?)?;
    Ok(())
}

/// Load the stored plan, if any.
pub fn load_plan() -> Result<Option<OptimizedPlan>, CliError> {
    let path = config_dir()?.join("plan.json");
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&text)?))
}

pub fn save_plan(plan: &OptimizedPlan) -> Result<(), CliError> {
    let path = config_dir()?.join("plan.json");
    fs::write(&path, serde_json::to_string_pretty(plan)?)?;
    Ok(())
}

/// Load a catalog document, or the builtin catalog when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<RewardCatalog, CliError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(RewardCatalog::from_json_str(&text)?)
        }
        None => Ok(RewardCatalog::builtin()),
    }
}
