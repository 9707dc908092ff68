//! Monte Carlo robustness command.

use std::path::PathBuf;

use questline_core::{MonteCarloConfig, MonteCarloSimulator};

use crate::store::{self, CliError};

pub fn run(
    iterations: usize,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let plan = store::load_plan()?.ok_or("no stored plan; run 'plan optimize' first")?;
    let quests = store::load_quests()?;
    let catalog = store::load_catalog(catalog.as_deref())?;
    let settings = store::load_settings();

    let simulator = MonteCarloSimulator::with_config(MonteCarloConfig { iterations, seed });
    let report = simulator.simulate(&plan, &quests, &catalog, &settings.policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} iterations: mean {:.0} gold value (p10 {:.0}, p90 {:.0}), risk {:?}",
            report.iterations,
            report.mean_gold_value,
            report.p10_gold_value,
            report.p90_gold_value,
            report.risk_level
        );
        for quest in &report.quest_completion {
            println!(
                "  {}: completes in {:.0}% of runs",
                quest.description,
                quest.completion_rate * 100.0
            );
        }
    }
    Ok(())
}
