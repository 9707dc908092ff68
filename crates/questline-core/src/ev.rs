//! Expected-value calculator.
//!
//! Pure numeric functions over the reward model: no mutation, no I/O.
//! Queue EV uses a win-streak stop distribution derived from a single
//! win-rate parameter; quest progress rates translate a queue's per-game
//! multipliers into games and minutes needed to finish a quest.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::quest::{Quest, QuestKind};
use crate::rewards::{ExpectedRewards, QueueRewardProfile};
use crate::settings::PlannerPolicy;

/// Expected value of playing one game in a queue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QueueEv {
    /// Expected payout per game, by currency.
    pub expected: ExpectedRewards,
    /// Entry cost charged against the payout.
    pub entry_cost_gold: u32,
    /// Gold-equivalent payout net of entry cost.
    pub net_gold_value: f64,
    /// Net value divided by average game duration.
    pub ev_per_minute: f64,
}

/// Quest progress yielded by games in one queue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProgressRate {
    /// Expected progress per game, capped at the quest's remaining count.
    pub progress_per_game: f64,
    /// Games needed to finish the quest; `None` when the queue cannot
    /// advance it at all.
    pub games_to_complete: Option<u64>,
    /// Minutes needed to finish the quest in this queue.
    pub minutes_to_complete: Option<f64>,
}

/// Feasibility of finishing a quest inside a time budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompletionEstimate {
    pub can_complete: bool,
    pub games_needed: Option<u64>,
    pub minutes_needed: Option<f64>,
    /// Budget left over after completion; zero when it does not fit.
    pub minutes_left_over: f64,
}

fn check_win_rate(win_rate: f64) -> Result<(), ValidationError> {
    if win_rate.is_nan() || !(0.0..=1.0).contains(&win_rate) {
        return Err(ValidationError::WinRateOutOfRange {
            value: win_rate,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

/// Expected value of one reward array under the win-streak model.
///
/// For an array indexed by win count `0..=n`, the probability of stopping
/// at exactly `w` wins is `(1-p)` for `w = 0` and `p^w * (1-p)` below the
/// cap; the cap itself is reached with probability `p^n`. A single-entry
/// array therefore pays out with certainty, and the `p = 0` / `p = 1`
/// boundaries collapse to the first and last entries exactly.
pub fn expected_array_value(rewards: &[u32], win_rate: f64) -> Result<f64, ValidationError> {
    check_win_rate(win_rate)?;
    let Some((&capped, below_cap)) = rewards.split_last() else {
        return Ok(0.0);
    };
    let n = below_cap.len();
    let mut value = 0.0;
    for (wins, &reward) in below_cap.iter().enumerate() {
        let stop_probability = if wins == 0 {
            1.0 - win_rate
        } else {
            win_rate.powi(wins as i32) * (1.0 - win_rate)
        };
        value += stop_probability * reward as f64;
    }
    value += win_rate.powi(n as i32) * capped as f64;
    debug_assert!(value.is_finite());
    Ok(value)
}

/// Expected value of playing one game in a queue at the given win rate.
pub fn queue_ev(profile: &QueueRewardProfile, win_rate: f64) -> Result<QueueEv, ValidationError> {
    let gold = expected_array_value(&profile.gold_by_wins, win_rate)?;
    let gems = match &profile.gems_by_wins {
        Some(array) => expected_array_value(array, win_rate)?,
        None => 0.0,
    };
    let packs = match &profile.packs_by_wins {
        Some(array) => expected_array_value(array, win_rate)?,
        None => 0.0,
    };
    let expected = ExpectedRewards { gold, gems, packs };
    let net_gold_value = expected.value_in_gold() - profile.entry_cost_gold as f64;
    let ev_per_minute = net_gold_value / profile.average_game_minutes;
    debug_assert!(ev_per_minute.is_finite());
    Ok(QueueEv {
        expected,
        entry_cost_gold: profile.entry_cost_gold,
        net_gold_value,
        ev_per_minute,
    })
}

/// Expected quest progress from one game of the given kind in a queue.
pub fn progress_per_game(
    kind: QuestKind,
    profile: &QueueRewardProfile,
    win_rate: f64,
    policy: &PlannerPolicy,
) -> Result<f64, ValidationError> {
    check_win_rate(win_rate)?;
    let multiplier = profile.progress_multipliers.for_kind(kind);
    let rate = match kind {
        QuestKind::WinGames => win_rate * multiplier,
        QuestKind::CastSpells => policy.base_spells_per_game * multiplier,
        QuestKind::PlayColors => multiplier,
    };
    Ok(rate)
}

/// Progress rate, games, and minutes needed to finish a quest in a queue.
pub fn quest_progress_rate(
    quest: &Quest,
    profile: &QueueRewardProfile,
    win_rate: f64,
    policy: &PlannerPolicy,
) -> Result<ProgressRate, ValidationError> {
    let rate = progress_per_game(quest.kind, profile, win_rate, policy)?;
    if quest.remaining == 0 {
        return Ok(ProgressRate {
            progress_per_game: 0.0,
            games_to_complete: Some(0),
            minutes_to_complete: Some(0.0),
        });
    }
    if rate <= 0.0 {
        return Ok(ProgressRate {
            progress_per_game: 0.0,
            games_to_complete: None,
            minutes_to_complete: None,
        });
    }
    let capped = rate.min(quest.remaining as f64);
    let games = (quest.remaining as f64 / capped).ceil() as u64;
    let minutes = games as f64 * profile.average_game_minutes;
    Ok(ProgressRate {
        progress_per_game: capped,
        games_to_complete: Some(games),
        minutes_to_complete: Some(minutes),
    })
}

/// Whether a quest fits inside a time budget when played in this queue.
pub fn estimate_completion(
    quest: &Quest,
    profile: &QueueRewardProfile,
    win_rate: f64,
    budget_minutes: u32,
    policy: &PlannerPolicy,
) -> Result<CompletionEstimate, ValidationError> {
    let rate = quest_progress_rate(quest, profile, win_rate, policy)?;
    let estimate = match rate.minutes_to_complete {
        Some(minutes) if minutes <= budget_minutes as f64 => CompletionEstimate {
            can_complete: true,
            games_needed: rate.games_to_complete,
            minutes_needed: Some(minutes),
            minutes_left_over: budget_minutes as f64 - minutes,
        },
        minutes_needed => CompletionEstimate {
            can_complete: false,
            games_needed: rate.games_to_complete,
            minutes_needed,
            minutes_left_over: 0.0,
        },
    };
    Ok(estimate)
}

/// Queue EV augmented with the amortized value of quest completion.
///
/// The flat completion bonus is spread over the games needed to finish the
/// quest in this queue, representing the marginal value of progress rather
/// than raw queue payout alone.
pub fn combined_ev(
    quest: &Quest,
    profile: &QueueRewardProfile,
    win_rate: f64,
    policy: &PlannerPolicy,
) -> Result<QueueEv, ValidationError> {
    let base = queue_ev(profile, win_rate)?;
    let rate = quest_progress_rate(quest, profile, win_rate, policy)?;
    let amortized = match rate.games_to_complete {
        Some(games) if games > 0 => policy.completion_bonus_gold / games as f64,
        _ => 0.0,
    };
    let net_gold_value = base.net_gold_value + amortized;
    Ok(QueueEv {
        net_gold_value,
        ev_per_minute: net_gold_value / profile.average_game_minutes,
        ..base
    })
}
