//! Monte Carlo simulation for plan robustness scoring.
//!
//! A plan's expected totals hide the variance of actually playing it out.
//! This module replays a plan many times with sampled game outcomes and
//! reports the spread of gold value and per-quest completion rates, so a
//! player can see how fragile a plan is before committing an evening to it.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::optimizer::ledger::ProgressLedger;
use crate::plan::OptimizedPlan;
use crate::quest::{Quest, QuestKind};
use crate::rewards::{QueueRewardProfile, RewardCatalog, GEMS_TO_GOLD, PACKS_TO_GOLD};
use crate::settings::PlannerPolicy;

/// Configuration for Monte Carlo simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of simulation iterations
    pub iterations: usize,
    /// Random seed for reproducibility (None = from entropy)
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            seed: None,
        }
    }
}

/// Risk level classification for plans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 80-100% of quests complete across simulations - very safe
    Low,
    /// 50-79% - acceptable
    Medium,
    /// 20-49% - risky
    High,
    /// 0-19% - very risky
    Critical,
}

impl From<f32> for RiskLevel {
    fn from(score: f32) -> Self {
        if score >= 80.0 {
            RiskLevel::Low
        } else if score >= 50.0 {
            RiskLevel::Medium
        } else if score >= 20.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// Completion statistics for a single quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestCompletionInfo {
    pub quest_id: String,
    pub description: String,
    /// Fraction of simulations in which the quest finished (0.0-1.0)
    pub completion_rate: f32,
}

/// Result of Monte Carlo plan simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobustnessReport {
    pub iterations: usize,
    /// Mean sampled gold value net of entry costs
    pub mean_gold_value: f64,
    /// 10th percentile of sampled gold value
    pub p10_gold_value: f64,
    /// 90th percentile of sampled gold value
    pub p90_gold_value: f64,
    /// Per-quest completion rates
    pub quest_completion: Vec<QuestCompletionInfo>,
    /// Risk classification from the mean completion rate
    pub risk_level: RiskLevel,
}

/// Monte Carlo simulator for plan robustness.
pub struct MonteCarloSimulator {
    config: MonteCarloConfig,
}

impl MonteCarloSimulator {
    /// Create a new simulator with default config.
    pub fn new() -> Self {
        Self {
            config: MonteCarloConfig::default(),
        }
    }

    /// Create a simulator with custom config.
    pub fn with_config(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Replay a plan `iterations` times and aggregate the outcomes.
    ///
    /// Each plan game is sampled as one run of the win-streak model: the
    /// streak length is drawn from the stop distribution, the reward
    /// arrays are read at that index, and quest progress is drawn from a
    /// per-game win sample. Deterministic under a fixed seed.
    pub fn simulate(
        &self,
        plan: &OptimizedPlan,
        quests: &[Quest],
        catalog: &RewardCatalog,
        policy: &PlannerPolicy,
    ) -> RobustnessReport {
        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        let iterations = self.config.iterations.max(1);
        let win_rate = plan.win_rate;

        let active: Vec<&Quest> = quests.iter().filter(|q| q.is_active()).collect();
        let mut gold_values = Vec::with_capacity(iterations);
        let mut completions = vec![0u32; active.len()];

        for _ in 0..iterations {
            let mut tracker = ProgressLedger::new(active.iter().copied());
            let mut gold_value = 0.0;

            for step in &plan.steps {
                let profile = catalog.lookup(&step.queue);
                for _ in 0..step.target_games {
                    gold_value += sample_game_value(&mut rng, profile, win_rate);
                    for &quest in &active {
                        let progress =
                            sample_quest_progress(&mut rng, quest.kind, profile, win_rate, policy);
                        tracker.apply(&quest.id, progress);
                    }
                }
            }

            gold_values.push(gold_value);
            for (index, quest) in active.iter().enumerate() {
                if tracker.is_satisfied(&quest.id) {
                    completions[index] += 1;
                }
            }
        }

        gold_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mean_gold_value = gold_values.iter().sum::<f64>() / iterations as f64;
        let quest_completion: Vec<QuestCompletionInfo> = active
            .iter()
            .zip(&completions)
            .map(|(quest, &count)| QuestCompletionInfo {
                quest_id: quest.id.clone(),
                description: quest.description.clone(),
                completion_rate: count as f32 / iterations as f32,
            })
            .collect();
        let mean_completion = if quest_completion.is_empty() {
            1.0
        } else {
            quest_completion
                .iter()
                .map(|q| q.completion_rate)
                .sum::<f32>()
                / quest_completion.len() as f32
        };

        RobustnessReport {
            iterations,
            mean_gold_value,
            p10_gold_value: percentile(&gold_values, 0.10),
            p90_gold_value: percentile(&gold_values, 0.90),
            quest_completion,
            risk_level: RiskLevel::from(mean_completion * 100.0),
        }
    }
}

impl Default for MonteCarloSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample one game's gold value: draw a streak length from the stop
/// distribution and read every reward array at that index.
fn sample_game_value(rng: &mut Mcg128Xsl64, profile: &QueueRewardProfile, win_rate: f64) -> f64 {
    let longest = profile
        .gold_by_wins
        .len()
        .max(profile.gems_by_wins.as_ref().map_or(0, |a| a.len()))
        .max(profile.packs_by_wins.as_ref().map_or(0, |a| a.len()));
    if longest == 0 {
        return -(profile.entry_cost_gold as f64);
    }

    let mut wins = 0usize;
    while wins < longest - 1 && rng.gen_bool(win_rate) {
        wins += 1;
    }

    let at = |array: &[u32]| -> f64 {
        if array.is_empty() {
            0.0
        } else {
            array[wins.min(array.len() - 1)] as f64
        }
    };
    let gold = at(&profile.gold_by_wins);
    let gems = profile.gems_by_wins.as_deref().map_or(0.0, &at);
    let packs = profile.packs_by_wins.as_deref().map_or(0.0, &at);
    gold + gems * GEMS_TO_GOLD + packs * PACKS_TO_GOLD - profile.entry_cost_gold as f64
}

/// Sample one game's progress toward a quest.
fn sample_quest_progress(
    rng: &mut Mcg128Xsl64,
    kind: QuestKind,
    profile: &QueueRewardProfile,
    win_rate: f64,
    policy: &PlannerPolicy,
) -> f64 {
    let multiplier = profile.progress_multipliers.for_kind(kind);
    match kind {
        QuestKind::WinGames => {
            if rng.gen_bool(win_rate) {
                multiplier
            } else {
                0.0
            }
        }
        QuestKind::CastSpells => policy.base_spells_per_game * multiplier,
        QuestKind::PlayColors => multiplier,
    }
}

fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() - 1) as f64 * fraction).round() as usize;
    sorted[index.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::optimize_plan;
    use crate::settings::PlannerSettings;

    fn seeded_report(seed: u64) -> RobustnessReport {
        let catalog = RewardCatalog::builtin();
        let settings = PlannerSettings::default();
        let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];
        let outcome = optimize_plan(&quests, 60, 0.6, &settings, &catalog).unwrap();
        let simulator = MonteCarloSimulator::with_config(MonteCarloConfig {
            iterations: 200,
            seed: Some(seed),
        });
        simulator.simulate(&outcome.plan, &quests, &catalog, &settings.policy)
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let a = seeded_report(7);
        let b = seeded_report(7);
        assert_eq!(a.mean_gold_value, b.mean_gold_value);
        assert_eq!(a.p10_gold_value, b.p10_gold_value);
        assert_eq!(
            a.quest_completion[0].completion_rate,
            b.quest_completion[0].completion_rate
        );
    }

    #[test]
    fn percentiles_bracket_the_mean() {
        let report = seeded_report(11);
        assert!(report.p10_gold_value <= report.mean_gold_value);
        assert!(report.mean_gold_value <= report.p90_gold_value);
        assert_eq!(report.iterations, 200);
    }

    #[test]
    fn risk_banding_matches_completion() {
        assert_eq!(RiskLevel::from(95.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from(60.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from(30.0), RiskLevel::High);
        assert_eq!(RiskLevel::from(5.0), RiskLevel::Critical);
    }
}
