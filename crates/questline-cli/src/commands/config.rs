//! Configuration management commands.

use clap::Subcommand;
use questline_core::QueueId;

use crate::store::{self, CliError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the full configuration
    List,
    /// Get a configuration value
    Get {
        /// Key: default_win_rate, default_time_budget_minutes, preferred_queues
        key: String,
    },
    /// Set a configuration value
    Set {
        key: String,
        /// New value ("none" clears preferred_queues)
        value: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::List => {
            let settings = store::load_settings();
            println!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Get { key } => {
            let settings = store::load_settings();
            match key.as_str() {
                "default_win_rate" => println!("{}", settings.default_win_rate),
                "default_time_budget_minutes" => {
                    println!("{}", settings.default_time_budget_minutes)
                }
                "preferred_queues" => match &settings.preferred_queues {
                    Some(queues) => {
                        let ids: Vec<&str> = queues.iter().map(|q| q.as_str()).collect();
                        println!("{}", ids.join(","));
                    }
                    None => println!("none"),
                },
                other => return Err(format!("unknown config key: {other}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = store::load_settings();
            match key.as_str() {
                "default_win_rate" => settings.default_win_rate = value.parse()?,
                "default_time_budget_minutes" => {
                    settings.default_time_budget_minutes = value.parse()?
                }
                "preferred_queues" => {
                    settings.preferred_queues = if value == "none" {
                        None
                    } else {
                        Some(value.split(',').map(|q| QueueId::new(q.trim())).collect())
                    };
                }
                other => return Err(format!("unknown config key: {other}").into()),
            }
            store::save_settings(&settings)?;
            println!("config updated");
        }
    }
    Ok(())
}
