//! Greedy plan optimizer.
//!
//! The optimizer turns active quests, a time budget, and a win-rate
//! estimate into an ordered plan of queue sessions. Each iteration scores
//! every allowed queue against the quests still outstanding (EV per
//! minute, boosted for imminent expiries), emits the best-fitting option
//! as a plan step, deducts the consumed time and progress, and repeats.
//! Re-scoring against the updated state each round is what makes the plan
//! adaptive instead of a single static ranking.

pub mod ledger;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use crate::error::OptimizeError;
use crate::ev::{estimate_completion, progress_per_game, queue_ev};
use crate::plan::{OptimizedPlan, PlanStep, PlanWarning, QuestProgress};
use crate::quest::Quest;
use crate::rewards::{CurrencyBundle, ExpectedRewards, QueueId, QueueRewardProfile, RewardCatalog};
use crate::settings::{PlannerPolicy, PlannerSettings};

use ledger::ProgressLedger;

/// A successful optimization: the plan plus advisory warnings.
#[derive(Debug, Clone)]
pub struct Optimization {
    pub plan: OptimizedPlan,
    pub warnings: Vec<PlanWarning>,
}

/// Loop state of the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptimizerState {
    /// Still has time and outstanding quests
    Accumulating,
    /// Time exhausted, quests satisfied, or step cap reached
    Done,
}

/// One candidate session, scored for the current iteration.
#[derive(Debug, Clone)]
struct QueueOption {
    queue: QueueId,
    display_name: String,
    target_games: u32,
    estimated_minutes: u32,
    expected_per_game: ExpectedRewards,
    priority: f64,
    soonest_expiry_days: u32,
    quest_progress: Vec<QuestProgress>,
}

/// Urgency boost for a quest expiring in the given number of days.
fn urgency_multiplier(expires_in_days: u32, policy: &PlannerPolicy) -> f64 {
    if expires_in_days <= 1 {
        policy.urgency_1day_multiplier
    } else if expires_in_days <= 2 {
        policy.urgency_2day_multiplier
    } else {
        1.0
    }
}

/// Preference order between two candidate options.
///
/// Highest priority wins; ties go to the option touching the soonest
/// expiry, then to the lexicographically-first queue id, so selection is
/// deterministic rather than implementation-defined.
fn option_preference(a: &QueueOption, b: &QueueOption) -> Ordering {
    a.priority
        .partial_cmp(&b.priority)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.soonest_expiry_days.cmp(&a.soonest_expiry_days))
        .then_with(|| b.queue.cmp(&a.queue))
}

/// Score one queue against the outstanding quests.
///
/// Returns `None` when the queue advances no outstanding quest or not even
/// a single game fits the remaining time.
fn build_queue_option(
    profile: &QueueRewardProfile,
    quests: &[&Quest],
    ledger: &ProgressLedger,
    win_rate: f64,
    remaining_minutes: u32,
    policy: &PlannerPolicy,
) -> Result<Option<QueueOption>, OptimizeError> {
    let max_fit = (remaining_minutes as f64 / profile.average_game_minutes).floor() as u32;
    if max_fit == 0 {
        return Ok(None);
    }

    let base = queue_ev(profile, win_rate)?;

    let mut amortized_bonus = 0.0;
    let mut soonest_expiry: Option<u32> = None;
    let mut fewest_games: Option<u64> = None;
    let mut contributions: Vec<(&Quest, f64, f64)> = Vec::new();
    for &quest in quests {
        if ledger.is_satisfied(&quest.id) {
            continue;
        }
        let rate = progress_per_game(quest.kind, profile, win_rate, policy)?;
        if rate <= 0.0 {
            continue;
        }
        let tracked = ledger.remaining(&quest.id);
        let games_needed = (tracked / rate).ceil().max(1.0) as u64;
        amortized_bonus += policy.completion_bonus_gold / games_needed as f64;
        soonest_expiry = Some(soonest_expiry.map_or(quest.expires_in_days, |d| {
            d.min(quest.expires_in_days)
        }));
        fewest_games = Some(fewest_games.map_or(games_needed, |g| g.min(games_needed)));
        contributions.push((quest, rate, tracked));
    }
    if contributions.is_empty() {
        return Ok(None);
    }

    let soonest_expiry_days = soonest_expiry.unwrap_or(u32::MAX);
    let urgency = urgency_multiplier(soonest_expiry_days, policy);
    let net_with_bonus = base.net_gold_value + amortized_bonus;
    let priority = net_with_bonus / profile.average_game_minutes * urgency;

    // Sessions are kept short so the loop can re-evaluate often; aim for
    // the nearest completion but never more than fits the clock.
    let desired = fewest_games
        .unwrap_or(1)
        .min(policy.max_games_per_step as u64) as u32;
    let target_games = desired.clamp(1, policy.max_games_per_step.min(max_fit));
    let estimated_minutes = (target_games as f64 * profile.average_game_minutes).ceil() as u32;

    let quest_progress = contributions
        .iter()
        .map(|(quest, rate, tracked)| QuestProgress {
            quest_id: quest.id.clone(),
            amount: (rate * target_games as f64).min(*tracked),
        })
        .collect();

    Ok(Some(QueueOption {
        queue: profile.queue.clone(),
        display_name: profile.display_name.clone(),
        target_games,
        estimated_minutes,
        expected_per_game: base.expected,
        priority,
        soonest_expiry_days,
        quest_progress,
    }))
}

fn into_step(option: QueueOption) -> PlanStep {
    PlanStep {
        id: Uuid::new_v4().to_string(),
        queue: option.queue,
        display_name: option.display_name,
        target_games: option.target_games,
        estimated_minutes: option.estimated_minutes,
        expected_rewards: option
            .expected_per_game
            .scale(option.target_games as f64)
            .round(),
        quest_progress: option.quest_progress,
        completed: false,
    }
}

/// Produce an ordered, time-bounded plan for the given quests.
///
/// Fails fast with a typed error when inputs are out of range, no quest
/// has progress left, or the budget cannot finish a single quest in any
/// allowed queue. Successful results carry advisory warnings.
pub fn optimize_plan(
    quests: &[Quest],
    time_budget_minutes: u32,
    win_rate: f64,
    settings: &PlannerSettings,
    catalog: &RewardCatalog,
) -> Result<Optimization, OptimizeError> {
    let policy = &settings.policy;

    if time_budget_minutes < policy.min_time_budget_minutes
        || time_budget_minutes > policy.max_time_budget_minutes
    {
        return Err(crate::error::ValidationError::TimeBudgetOutOfRange {
            minutes: time_budget_minutes,
            min: policy.min_time_budget_minutes,
            max: policy.max_time_budget_minutes,
        }
        .into());
    }
    if win_rate.is_nan() || win_rate < policy.min_win_rate || win_rate > policy.max_win_rate {
        return Err(crate::error::ValidationError::WinRateOutOfRange {
            value: win_rate,
            min: policy.min_win_rate,
            max: policy.max_win_rate,
        }
        .into());
    }
    for quest in quests {
        quest.validate()?;
    }

    let active: Vec<&Quest> = quests.iter().filter(|q| q.is_active()).collect();
    if active.is_empty() {
        return Err(OptimizeError::NoActiveQuests);
    }

    let allowed: Vec<QueueId> = match &settings.preferred_queues {
        Some(queues) if !queues.is_empty() => {
            let mut unique = queues.clone();
            unique.sort();
            unique.dedup();
            unique
        }
        _ => catalog.queue_ids().cloned().collect(),
    };

    // Fail fast when the budget cannot finish anything at all.
    let mut infeasible_warnings = Vec::new();
    let mut any_feasible = false;
    for quest in &active {
        let mut feasible = false;
        for queue in &allowed {
            let profile = catalog.lookup(queue);
            let estimate =
                estimate_completion(quest, profile, win_rate, time_budget_minutes, policy)?;
            if estimate.can_complete {
                feasible = true;
                break;
            }
        }
        if feasible {
            any_feasible = true;
        } else {
            infeasible_warnings.push(PlanWarning::QuestNotCompletable {
                quest_id: quest.id.clone(),
                description: quest.description.clone(),
            });
        }
    }
    if !any_feasible {
        return Err(OptimizeError::InsufficientTime {
            budget_minutes: time_budget_minutes,
            warnings: infeasible_warnings,
        });
    }

    let mut tracker = ProgressLedger::new(active.iter().copied());
    let mut remaining_minutes = time_budget_minutes;
    let mut steps: Vec<PlanStep> = Vec::new();
    let mut state = OptimizerState::Accumulating;

    while state == OptimizerState::Accumulating {
        if steps.len() >= policy.max_plan_steps || tracker.all_satisfied() {
            state = OptimizerState::Done;
            continue;
        }

        let mut best: Option<QueueOption> = None;
        for queue in &allowed {
            let profile = catalog.lookup(queue);
            let Some(option) = build_queue_option(
                profile,
                &active,
                &tracker,
                win_rate,
                remaining_minutes,
                policy,
            )?
            else {
                continue;
            };
            best = match best {
                Some(current) if option_preference(&option, &current) != Ordering::Greater => {
                    Some(current)
                }
                _ => Some(option),
            };
        }

        match best {
            None => state = OptimizerState::Done,
            Some(option) => {
                log::debug!(
                    "step {}: {} x{} ({}min, priority {:.2})",
                    steps.len() + 1,
                    option.queue,
                    option.target_games,
                    option.estimated_minutes,
                    option.priority
                );
                for progress in &option.quest_progress {
                    tracker.apply(&progress.quest_id, progress.amount);
                }
                remaining_minutes -= option.estimated_minutes;
                steps.push(into_step(option));
            }
        }
    }

    if steps.is_empty() {
        // feasibility passed but nothing fit; treat as insufficient time
        return Err(OptimizeError::InsufficientTime {
            budget_minutes: time_budget_minutes,
            warnings: infeasible_warnings,
        });
    }

    let total_estimated_minutes = steps.iter().map(|s| s.estimated_minutes).sum();
    let total_expected_rewards = steps
        .iter()
        .fold(CurrencyBundle::default(), |acc, s| {
            acc.saturating_add(s.expected_rewards)
        });
    let completable_quest_ids: BTreeSet<String> = active
        .iter()
        .filter(|q| tracker.is_satisfied(&q.id))
        .map(|q| q.id.clone())
        .collect();

    let mut warnings = Vec::new();
    for quest in &active {
        if quest.expires_within(1) {
            warnings.push(PlanWarning::QuestExpiringSoon {
                quest_id: quest.id.clone(),
                description: quest.description.clone(),
                expires_in_days: quest.expires_in_days,
            });
        }
    }
    for quest in &active {
        if !tracker.is_satisfied(&quest.id) {
            warnings.push(PlanWarning::QuestNotCompletable {
                quest_id: quest.id.clone(),
                description: quest.description.clone(),
            });
        }
    }
    if remaining_minutes > policy.unused_time_warning_minutes {
        warnings.push(PlanWarning::UnusedBudget {
            minutes: remaining_minutes,
        });
    }

    let now = Utc::now();
    let plan = OptimizedPlan {
        id: Uuid::new_v4().to_string(),
        steps,
        total_estimated_minutes,
        total_expected_rewards,
        completable_quest_ids,
        time_budget_minutes,
        win_rate,
        created_at: now,
        updated_at: now,
    };
    Ok(Optimization { plan, warnings })
}

/// Re-plan the unused portion of a plan's budget.
///
/// Completed steps stay spent: their minutes are subtracted from the
/// original budget and the remainder is optimized fresh against the
/// updated quests at the plan's original win rate. When nothing viable
/// remains the current plan is returned unchanged with a warning.
pub fn recalculate(
    plan: &OptimizedPlan,
    updated_quests: &[Quest],
    settings: &PlannerSettings,
    catalog: &RewardCatalog,
) -> Result<Optimization, OptimizeError> {
    let remaining = plan.remaining_budget_minutes();
    if remaining <= 0 {
        return Ok(Optimization {
            plan: plan.clone(),
            warnings: vec![PlanWarning::AllTimeUsed],
        });
    }
    if (remaining as u32) < settings.policy.min_time_budget_minutes {
        return Ok(Optimization {
            plan: plan.clone(),
            warnings: vec![PlanWarning::InsufficientRemainingTime { minutes: remaining }],
        });
    }
    optimize_plan(
        updated_quests,
        remaining as u32,
        plan.win_rate,
        settings,
        catalog,
    )
}
