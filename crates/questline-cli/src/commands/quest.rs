//! Quest management commands.

use clap::Subcommand;
use questline_core::{ColorTag, Quest, QuestKind};

use crate::store::{self, CliError};

#[derive(Subcommand)]
pub enum QuestAction {
    /// Add a quest
    Add {
        /// Quest description
        description: String,
        /// Quest kind: win_games, cast_spells, or play_colors
        #[arg(long, default_value = "win_games")]
        kind: String,
        /// Remaining progress count
        #[arg(long)]
        remaining: u32,
        /// Days until the quest expires (0 = today)
        #[arg(long, default_value = "3")]
        expires_in_days: u32,
        /// Comma-separated colors for play_colors quests
        #[arg(long)]
        colors: Option<String>,
    },
    /// List quests
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a quest
    Remove {
        /// Quest id
        id: String,
    },
    /// Record progress against a quest
    Tick {
        /// Quest id
        id: String,
        /// Amount of progress made
        #[arg(long, default_value = "1")]
        amount: u32,
    },
}

fn parse_kind(kind: &str) -> Result<QuestKind, CliError> {
    match kind {
        "win_games" => Ok(QuestKind::WinGames),
        "cast_spells" => Ok(QuestKind::CastSpells),
        "play_colors" => Ok(QuestKind::PlayColors),
        other => Err(format!("unknown quest kind: {other}").into()),
    }
}

fn parse_colors(colors: &str) -> Result<Vec<ColorTag>, CliError> {
    colors
        .split(',')
        .map(|c| match c.trim() {
            "white" => Ok(ColorTag::White),
            "blue" => Ok(ColorTag::Blue),
            "black" => Ok(ColorTag::Black),
            "red" => Ok(ColorTag::Red),
            "green" => Ok(ColorTag::Green),
            other => Err(format!("unknown color: {other}").into()),
        })
        .collect()
}

pub fn run(action: QuestAction) -> Result<(), CliError> {
    match action {
        QuestAction::Add {
            description,
            kind,
            remaining,
            expires_in_days,
            colors,
        } => {
            let mut quest = Quest::new(parse_kind(&kind)?, description, remaining, expires_in_days);
            if let Some(colors) = colors {
                quest = quest.with_colors(parse_colors(&colors)?);
            }
            quest.validate()?;
            let mut quests = store::load_quests()?;
            quests.push(quest.clone());
            store::save_quests(&quests)?;
            println!("Quest added: {}", quest.id);
        }
        QuestAction::List { json } => {
            let quests = store::load_quests()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quests)?);
            } else if quests.is_empty() {
                println!("no quests");
            } else {
                for quest in &quests {
                    println!(
                        "{}  [{}] {} ({} left, expires in {}d)",
                        quest.id, quest.kind, quest.description, quest.remaining,
                        quest.expires_in_days
                    );
                }
            }
        }
        QuestAction::Remove { id } => {
            let mut quests = store::load_quests()?;
            let before = quests.len();
            quests.retain(|q| q.id != id);
            if quests.len() == before {
                return Err(format!("no quest with id {id}").into());
            }
            store::save_quests(&quests)?;
            println!("Quest removed: {id}");
        }
        QuestAction::Tick { id, amount } => {
            let mut quests = store::load_quests()?;
            let quest = quests
                .iter_mut()
                .find(|q| q.id == id)
                .ok_or_else(|| format!("no quest with id {id}"))?;
            quest.remaining = quest.remaining.saturating_sub(amount);
            let remaining = quest.remaining;
            store::save_quests(&quests)?;
            println!("Quest {id}: {remaining} remaining");
        }
    }
    Ok(())
}
