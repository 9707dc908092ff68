//! Plan optimization and tracking commands.

use std::path::PathBuf;

use clap::Subcommand;
use questline_core::{mark_step, optimize_plan, recalculate, Optimization, OptimizedPlan, QueueId};

use crate::store::{self, CliError};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Optimize a plan from the stored quests
    Optimize {
        /// Time budget in minutes (defaults to the configured budget)
        #[arg(long)]
        time: Option<u32>,
        /// Assumed win rate (defaults to the configured win rate)
        #[arg(long)]
        win_rate: Option<f64>,
        /// Restrict planning to comma-separated queue ids
        #[arg(long)]
        queues: Option<String>,
        /// Catalog JSON file (defaults to the builtin catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored plan
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a step complete (or incomplete with --undo)
    Mark {
        /// Step id
        step_id: String,
        /// Mark incomplete instead of complete
        #[arg(long)]
        undo: bool,
    },
    /// Re-plan the unused budget from the stored quests
    Recalc {
        /// Catalog JSON file (defaults to the builtin catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_plan(plan: &OptimizedPlan) {
    for (index, step) in plan.steps.iter().enumerate() {
        let done = if step.completed { "x" } else { " " };
        println!(
            "[{done}] {}. {} -- {} games, ~{} min, {} ({})",
            index + 1,
            step.display_name,
            step.target_games,
            step.estimated_minutes,
            step.expected_rewards,
            step.id
        );
    }
    println!(
        "total: ~{} of {} min, {}",
        plan.total_estimated_minutes, plan.time_budget_minutes, plan.total_expected_rewards
    );
}

fn print_outcome(outcome: &Optimization, json: bool) -> Result<(), CliError> {
    if json {
        let warnings: Vec<String> = outcome.warnings.iter().map(|w| w.to_string()).collect();
        let document = serde_json::json!({
            "plan": outcome.plan,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_plan(&outcome.plan);
        for warning in &outcome.warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

pub fn run(action: PlanAction) -> Result<(), CliError> {
    match action {
        PlanAction::Optimize {
            time,
            win_rate,
            queues,
            catalog,
            json,
        } => {
            let mut settings = store::load_settings();
            if let Some(queues) = queues {
                settings.preferred_queues = Some(
                    queues
                        .split(',')
                        .map(|q| QueueId::new(q.trim()))
                        .collect(),
                );
            }
            let time = time.unwrap_or(settings.default_time_budget_minutes);
            let win_rate = win_rate.unwrap_or(settings.default_win_rate);
            let quests = store::load_quests()?;
            let catalog = store::load_catalog(catalog.as_deref())?;

            let outcome = optimize_plan(&quests, time, win_rate, &settings, &catalog)?;
            store::save_plan(&outcome.plan)?;
            print_outcome(&outcome, json)?;
        }
        PlanAction::Show { json } => {
            let plan = store::load_plan()?.ok_or("no stored plan; run 'plan optimize' first")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        PlanAction::Mark { step_id, undo } => {
            let plan = store::load_plan()?.ok_or("no stored plan; run 'plan optimize' first")?;
            let updated = mark_step(&plan, &step_id, !undo)?;
            store::save_plan(&updated)?;
            print_plan(&updated);
        }
        PlanAction::Recalc { catalog, json } => {
            let plan = store::load_plan()?.ok_or("no stored plan; run 'plan optimize' first")?;
            let settings = store::load_settings();
            let quests = store::load_quests()?;
            let catalog = store::load_catalog(catalog.as_deref())?;

            let outcome = recalculate(&plan, &quests, &settings, &catalog)?;
            store::save_plan(&outcome.plan)?;
            print_outcome(&outcome, json)?;
        }
    }
    Ok(())
}
