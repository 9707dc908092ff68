//! Queue catalog and EV table commands.

use std::path::PathBuf;

use clap::Subcommand;
use questline_core::{queue_ev, QueueId};

use crate::store::{self, CliError};

#[derive(Subcommand)]
pub enum QueueAction {
    /// List catalog queues
    List {
        /// Catalog JSON file (defaults to the builtin catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show expected value per queue at a win rate
    Ev {
        /// Queue id (defaults to every catalog queue)
        queue: Option<String>,
        /// Assumed win rate (defaults to the configured win rate)
        #[arg(long)]
        win_rate: Option<f64>,
        /// Catalog JSON file (defaults to the builtin catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: QueueAction) -> Result<(), CliError> {
    match action {
        QueueAction::List { catalog, json } => {
            let catalog = store::load_catalog(catalog.as_deref())?;
            if json {
                let profiles: Vec<_> = catalog.profiles().collect();
                println!("{}", serde_json::to_string_pretty(&profiles)?);
            } else {
                for profile in catalog.profiles() {
                    println!(
                        "{}  {} (entry {} gold, ~{} min/game)",
                        profile.queue,
                        profile.display_name,
                        profile.entry_cost_gold,
                        profile.average_game_minutes
                    );
                }
            }
        }
        QueueAction::Ev {
            queue,
            win_rate,
            catalog,
            json,
        } => {
            let catalog = store::load_catalog(catalog.as_deref())?;
            let settings = store::load_settings();
            let win_rate = win_rate.unwrap_or(settings.default_win_rate);

            let profiles: Vec<_> = match &queue {
                Some(id) => vec![catalog.lookup(&QueueId::new(id.clone()))],
                None => catalog.profiles().collect(),
            };

            if json {
                let mut rows = Vec::new();
                for profile in &profiles {
                    let ev = queue_ev(profile, win_rate)?;
                    rows.push(serde_json::json!({
                        "queue": profile.queue,
                        "win_rate": win_rate,
                        "ev": ev,
                    }));
                }
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("win rate {win_rate:.2}");
                for profile in &profiles {
                    let ev = queue_ev(profile, win_rate)?;
                    println!(
                        "{}  net {:.1} gold/game, {:.2} gold/min",
                        profile.queue, ev.net_gold_value, ev.ev_per_minute
                    );
                }
            }
        }
    }
    Ok(())
}
