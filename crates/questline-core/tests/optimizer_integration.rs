//! Integration tests for the plan optimizer and recalculation flow.
//!
//! These tests drive the full optimize -> mark -> recalculate workflow
//! against the builtin catalog and hand-built catalog documents.

use questline_core::{
    mark_step, optimize_plan, recalculate, CurrencyBundle, OptimizeError, OptimizedPlan,
    PlanWarning, PlannerSettings, Quest, QuestKind, QueueId, RewardCatalog, ValidationError,
};

fn assert_plan_invariants(plan: &OptimizedPlan) {
    assert!(!plan.steps.is_empty());
    assert!(plan.steps.len() <= 10);
    let minute_sum: u32 = plan.steps.iter().map(|s| s.estimated_minutes).sum();
    assert_eq!(plan.total_estimated_minutes, minute_sum);
    assert!(plan.total_estimated_minutes <= plan.time_budget_minutes);
    let reward_sum = plan
        .steps
        .iter()
        .fold(CurrencyBundle::default(), |acc, s| {
            acc.saturating_add(s.expected_rewards)
        });
    assert_eq!(plan.total_expected_rewards, reward_sum);
    for step in &plan.steps {
        assert!(step.target_games >= 1);
        assert!(step.estimated_minutes > 0);
        for progress in &step.quest_progress {
            assert!(progress.amount > 0.0);
        }
    }
}

#[test]
fn end_to_end_single_win_quest() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];

    let outcome = optimize_plan(&quests, 60, 0.6, &settings, &catalog).unwrap();
    assert_plan_invariants(&outcome.plan);
    assert!(outcome.plan.total_estimated_minutes <= 60);
    assert!(outcome
        .plan
        .steps
        .iter()
        .any(|s| s.quest_progress.iter().any(|p| p.quest_id == quests[0].id)));
    assert!(outcome.plan.completable_quest_ids.contains(&quests[0].id));
}

#[test]
fn empty_quest_list_fails_with_no_active_quests() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    assert!(matches!(
        optimize_plan(&[], 60, 0.5, &settings, &catalog),
        Err(OptimizeError::NoActiveQuests)
    ));
}

#[test]
fn fully_progressed_quests_fail_with_no_active_quests() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 0, 3)];
    assert!(matches!(
        optimize_plan(&quests, 60, 0.5, &settings, &catalog),
        Err(OptimizeError::NoActiveQuests)
    ));
}

#[test]
fn oversized_quest_in_minimal_budget_fails_with_insufficient_time() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 50 games", 50, 3)];

    match optimize_plan(&quests, 15, 0.5, &settings, &catalog) {
        Err(OptimizeError::InsufficientTime {
            budget_minutes,
            warnings,
        }) => {
            assert_eq!(budget_minutes, 15);
            assert!(warnings
                .iter()
                .any(|w| matches!(w, PlanWarning::QuestNotCompletable { quest_id, .. } if *quest_id == quests[0].id)));
        }
        other => panic!("expected InsufficientTime, got {other:?}"),
    }
}

#[test]
fn out_of_range_inputs_fail_validation() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];

    assert!(matches!(
        optimize_plan(&quests, 10, 0.5, &settings, &catalog),
        Err(OptimizeError::Validation(
            ValidationError::TimeBudgetOutOfRange { .. }
        ))
    ));
    assert!(matches!(
        optimize_plan(&quests, 60, 0.9, &settings, &catalog),
        Err(OptimizeError::Validation(
            ValidationError::WinRateOutOfRange { .. }
        ))
    ));
    let colorless = vec![Quest::new(QuestKind::PlayColors, "Play 20 cards", 20, 2)];
    assert!(matches!(
        optimize_plan(&colorless, 60, 0.5, &settings, &catalog),
        Err(OptimizeError::Validation(
            ValidationError::MissingColors { .. }
        ))
    ));
}

/// Two isolated queues with identical payouts: the quest expiring within a
/// day must be served by the very first step.
#[test]
fn expiring_quest_is_served_first() {
    let catalog_json = serde_json::json!({
        "version": 1,
        "default": {
            "queue": "play",
            "display_name": "Open Play",
            "entry_cost_gold": 0,
            "gold_by_wins": [0, 250],
            "average_game_minutes": 8.0
        },
        "queues": {
            "aaa": {
                "queue": "aaa",
                "display_name": "Queue A",
                "entry_cost_gold": 0,
                "gold_by_wins": [0, 100],
                "average_game_minutes": 8.0,
                "progress_multipliers": {
                    "win_games": 1.0,
                    "cast_spells": 0.0,
                    "play_colors": 0.0
                }
            },
            "bbb": {
                "queue": "bbb",
                "display_name": "Queue B",
                "entry_cost_gold": 0,
                "gold_by_wins": [0, 100],
                "average_game_minutes": 8.0,
                "progress_multipliers": {
                    "win_games": 0.0,
                    "cast_spells": 0.5,
                    "play_colors": 0.0
                }
            }
        }
    });
    let catalog = RewardCatalog::from_json_str(&catalog_json.to_string()).unwrap();
    let settings = PlannerSettings::default();

    let urgent = Quest::new(QuestKind::WinGames, "Win 2 games", 2, 1);
    let later = Quest::new(QuestKind::CastSpells, "Cast 20 spells", 20, 3);
    let quests = vec![later.clone(), urgent.clone()];

    let outcome = optimize_plan(&quests, 120, 0.5, &settings, &catalog).unwrap();
    assert_plan_invariants(&outcome.plan);
    let first = &outcome.plan.steps[0];
    assert_eq!(first.queue, QueueId::from("aaa"));
    assert!(first
        .quest_progress
        .iter()
        .any(|p| p.quest_id == urgent.id));
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, PlanWarning::QuestExpiringSoon { quest_id, .. } if *quest_id == urgent.id)));
}

#[test]
fn preferred_queues_restrict_the_plan() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings {
        preferred_queues: Some(vec![QueueId::from("ranked")]),
        ..PlannerSettings::default()
    };
    let quests = vec![Quest::new(QuestKind::CastSpells, "Cast 30 spells", 30, 3)];

    let outcome = optimize_plan(&quests, 90, 0.5, &settings, &catalog).unwrap();
    assert_plan_invariants(&outcome.plan);
    assert!(outcome
        .plan
        .steps
        .iter()
        .all(|s| s.queue == QueueId::from("ranked")));
}

#[test]
fn step_cap_bounds_plans_with_unfinishable_quests() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quick = Quest::new(QuestKind::WinGames, "Win 1 game", 1, 3);
    let endless = Quest::new(QuestKind::PlayColors, "Play 500 green cards", 500, 6)
        .with_colors([questline_core::ColorTag::Green]);
    let quests = vec![quick.clone(), endless.clone()];

    let outcome = optimize_plan(&quests, 180, 0.5, &settings, &catalog).unwrap();
    assert_plan_invariants(&outcome.plan);
    assert_eq!(outcome.plan.steps.len(), 10);
    assert!(outcome.plan.completable_quest_ids.contains(&quick.id));
    assert!(!outcome.plan.completable_quest_ids.contains(&endless.id));
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, PlanWarning::QuestNotCompletable { quest_id, .. } if *quest_id == endless.id)));
}

#[test]
fn recalculate_after_all_time_used_keeps_plan() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];

    // 54 minutes is consumed exactly by three 18-minute midweek sessions
    let outcome = optimize_plan(&quests, 54, 0.6, &settings, &catalog).unwrap();
    assert_eq!(outcome.plan.total_estimated_minutes, 54);

    let mut plan = outcome.plan;
    let step_ids: Vec<String> = plan.steps.iter().map(|s| s.id.clone()).collect();
    for id in &step_ids {
        plan = mark_step(&plan, id, true).unwrap();
    }
    assert!(plan.all_steps_completed());

    let updated = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 0, 3)];
    let recalc = recalculate(&plan, &updated, &settings, &catalog).unwrap();
    assert_eq!(recalc.plan.id, plan.id);
    assert_eq!(recalc.plan.steps.len(), plan.steps.len());
    assert!(recalc.warnings.contains(&PlanWarning::AllTimeUsed));
}

#[test]
fn recalculate_with_slim_remainder_keeps_plan() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];

    let outcome = optimize_plan(&quests, 60, 0.6, &settings, &catalog).unwrap();
    let mut plan = outcome.plan;
    let step_ids: Vec<String> = plan.steps.iter().map(|s| s.id.clone()).collect();
    for id in &step_ids {
        plan = mark_step(&plan, id, true).unwrap();
    }
    // 6 unused minutes are below the minimum viable budget
    assert_eq!(plan.remaining_budget_minutes(), 6);

    let recalc = recalculate(&plan, &quests, &settings, &catalog).unwrap();
    assert_eq!(recalc.plan.id, plan.id);
    assert!(recalc
        .warnings
        .iter()
        .any(|w| matches!(w, PlanWarning::InsufficientRemainingTime { minutes: 6 })));
}

#[test]
fn recalculate_replans_the_unused_budget() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];

    let outcome = optimize_plan(&quests, 60, 0.6, &settings, &catalog).unwrap();
    let first_id = outcome.plan.steps[0].id.clone();
    let first_minutes = outcome.plan.steps[0].estimated_minutes;
    let plan = mark_step(&outcome.plan, &first_id, true).unwrap();

    let updated = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 3, 3)];
    let recalc = recalculate(&plan, &updated, &settings, &catalog).unwrap();
    assert_ne!(recalc.plan.id, plan.id);
    assert_plan_invariants(&recalc.plan);
    assert_eq!(recalc.plan.time_budget_minutes, 60 - first_minutes);
    assert_eq!(recalc.plan.win_rate, plan.win_rate);
}

#[test]
fn marking_a_step_does_not_disturb_totals() {
    let catalog = RewardCatalog::builtin();
    let settings = PlannerSettings::default();
    let quests = vec![Quest::new(QuestKind::WinGames, "Win 5 games", 5, 3)];

    let outcome = optimize_plan(&quests, 60, 0.6, &settings, &catalog).unwrap();
    let step_id = outcome.plan.steps[0].id.clone();
    let marked = mark_step(&outcome.plan, &step_id, true).unwrap();
    let mut restored = mark_step(&marked, &step_id, false).unwrap();
    restored.updated_at = outcome.plan.updated_at;
    assert_eq!(restored, outcome.plan);
}
