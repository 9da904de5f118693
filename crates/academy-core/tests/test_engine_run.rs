//! Integration tests for a whole academy run.
//!
//! Drives the engine through its public surface only: staffing, scouting,
//! events, season completion and the final rating.

use academy_core::prelude::*;
use academy_logic::config::GameConfig;

// ── Helpers ────────────────────────────────────────────────────────────

fn config_with_gate(gate: u32) -> GameConfig {
    let mut config = GameConfig::default();
    config.settings.gate_threshold = gate;
    config
}

fn top_coach(name: &str) -> StaffCandidate {
    StaffCandidate {
        name: name.to_string(),
        role_id: "assistant_coach".to_string(),
        title: "Assistant coach".to_string(),
        category: StaffCategory::Coaches,
        skill: 5,
        experience: 12,
        salary: 4_000,
    }
}

/// Close whatever event is open so it does not pile up.
fn settle_event<R: RandomValueProvider>(engine: &mut AcademyEngine<R>) {
    if let Some(event) = engine.pending_event().cloned() {
        engine.dismiss_event(event.instance_id).unwrap();
    }
}

/// Send every idle scout to `region` on a two-week mission and wait for it.
fn scout_region<R: RandomValueProvider>(
    engine: &mut AcademyEngine<R>,
    region: &str,
) -> ScoutingReport {
    let scouts: Vec<u32> = engine.state().available_scouts().map(|s| s.id).collect();
    let mission = engine
        .dispatch_scouts(region, &scouts, ScoutingDuration::TwoWeeks)
        .unwrap();
    let observations = engine.advance_weeks(2).unwrap();
    settle_event(engine);
    observations
        .into_iter()
        .find_map(|o| match o {
            Observation::ScoutingReport(report) if report.mission_id == mission => Some(report),
            _ => None,
        })
        .expect("mission resolves after its duration")
}

/// Do enough work to reach 55% in season one: coaches, scouting, facility.
fn work_season_one<R: RandomValueProvider>(engine: &mut AcademyEngine<R>) {
    for name in ["Coach A", "Coach B", "Coach C"] {
        engine.hire_staff(top_coach(name)).unwrap();
    }
    for region in ["almaty", "astana", "shymkent"] {
        scout_region(engine, region);
    }
    engine.upgrade_facility("training_fields", 15).unwrap();
}

// ── Season gate ────────────────────────────────────────────────────────

#[test]
fn season_one_work_reaches_fifty_five_percent() {
    let mut engine = AcademyEngine::with_config(config_with_gate(50), 11).unwrap();
    work_season_one(&mut engine);

    let tracker = &engine.state().objectives;
    assert!(tracker.is_completed(ObjectiveId::HireTopCoaches));
    assert!(tracker.is_completed(ObjectiveId::ScoutRegionsDeep));
    assert!(tracker.is_completed(ObjectiveId::UpgradeKeyFacility));
    assert!(engine.progress_percent() >= 55);
    assert!(engine.is_season_completable());

    let summary = engine.attempt_complete_season().unwrap();
    assert_eq!(summary.season, 1);
    assert_eq!(summary.team_finishes.len(), 6);
    assert!(summary.ended_positive);
    assert_eq!(engine.phase(), SeasonPhase::SeasonComplete);
}

#[test]
fn default_gate_blocks_partial_season() {
    let mut engine = AcademyEngine::new(11);
    engine.hire_staff(top_coach("Coach A")).unwrap();
    engine.upgrade_facility("medical_center", 15).unwrap();

    let err = engine.attempt_complete_season().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GateNotMet);
    assert_eq!(engine.phase(), SeasonPhase::SeasonInProgress);
}

#[test]
fn operations_rejected_outside_season() {
    let mut engine = AcademyEngine::with_config(config_with_gate(0), 3).unwrap();
    engine.attempt_complete_season().unwrap();

    assert!(matches!(
        engine.upgrade_facility("gym", 1),
        Err(EngineError::WrongPhase { .. })
    ));
    assert!(matches!(engine.advance_weeks(1), Err(EngineError::WrongPhase { .. })));
    assert!(matches!(
        engine.attempt_complete_season(),
        Err(EngineError::WrongPhase { .. })
    ));
}

// ── Rollover ───────────────────────────────────────────────────────────

#[test]
fn rollover_abandons_open_missions_and_escalates() {
    let mut engine = AcademyEngine::with_config(config_with_gate(0), 5).unwrap();
    let scouts: Vec<u32> = engine.state().available_scouts().map(|s| s.id).collect();
    engine
        .dispatch_scouts("almaty", &scouts, ScoutingDuration::FourWeeks)
        .unwrap();

    let summary = engine.attempt_complete_season().unwrap();
    assert!(summary
        .next_requirements
        .contains(&(ObjectiveId::HireTopCoaches, 4)));

    assert_eq!(engine.acknowledge_summary().unwrap(), SeasonPhase::SeasonInProgress);
    assert_eq!(engine.state().season, 2);
    assert!(engine.open_missions().is_empty());
    assert!(engine.prospects().is_empty());
    assert!(engine.pending_event().is_none());
    assert!(engine.state().staff.iter().all(|s| !s.is_busy));
    assert_eq!(engine.state().scouting_budget, 150_000);

    // only the fresh event trigger survives the rollover
    let tasks = engine.scheduled_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].season, 2);

    let coaches = engine
        .state()
        .objectives
        .get(ObjectiveId::HireTopCoaches)
        .unwrap();
    assert_eq!(coaches.required_value, 4);
    assert_eq!(coaches.current_value, 0);
}

#[test]
fn transfer_revenue_counts_toward_one_season_only() {
    let mut engine = AcademyEngine::with_config(config_with_gate(0), 9).unwrap();
    let seller = engine
        .state()
        .players
        .iter()
        .find(|p| p.age >= 16)
        .map(|p| p.id)
        .unwrap();
    let offer = engine.sell_player(seller).unwrap();

    let summary = engine.attempt_complete_season().unwrap();
    assert_eq!(summary.income.transfer_revenue, offer);
    assert_eq!(engine.state().achievements.transfer_revenue, 0);
}

// ── Full run ───────────────────────────────────────────────────────────

#[test]
fn ungated_run_completes_all_seasons() {
    let mut engine = AcademyEngine::with_config(config_with_gate(0), 77).unwrap();
    let mut summaries = Vec::new();

    while engine.phase() != SeasonPhase::RunComplete {
        engine.advance_weeks(8).unwrap();
        settle_event(&mut engine);
        summaries.push(engine.attempt_complete_season().unwrap());
        engine.acknowledge_summary().unwrap();
    }

    assert_eq!(summaries.len(), 5);
    assert!(summaries.last().unwrap().next_requirements.is_empty());
    let result = engine.final_result().unwrap();
    assert_eq!(result.seasons_played, 5);
    assert!((1..=5).contains(&result.score.rating));
    assert!(!result.rating_text.is_empty());
    assert!(engine.scheduled_tasks().is_empty());

    // terminal: nothing moves any more
    assert!(engine.advance_weeks(1).is_err());
    assert!(engine.acknowledge_summary().is_err());
}

#[test]
fn same_seed_replays_same_run() {
    let run = |seed| {
        let mut engine = AcademyEngine::with_config(config_with_gate(0), seed).unwrap();
        let observations = engine.advance_weeks(10).unwrap();
        settle_event(&mut engine);
        let summary = engine.attempt_complete_season().unwrap();
        (observations, summary, engine.state().budget)
    };
    assert_eq!(run(123), run(123));
}

#[test]
fn state_serializes_to_json() {
    let engine = AcademyEngine::new(1);
    let json = engine.state().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["season"], 1);
    assert_eq!(value["budget"], 2_500_000);
}
