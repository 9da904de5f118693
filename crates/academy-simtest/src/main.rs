//! Academy Headless Simulation Harness
//!
//! Validates the pure rules and plays a scripted multi-season run against
//! the engine, checking run invariants along the way.
//!
//! Usage:
//!   cargo run -p academy-simtest
//!   cargo run -p academy-simtest -- --verbose --seed 7
//!   cargo run -p academy-simtest -- --config path/to/config.json

use academy_core::engine::{AcademyEngine, Observation};
use academy_core::generation::{generate_players, generate_prospects, ScoutingInput};
use academy_core::random::{RandomValueProvider, SeededRandom};
use academy_core::state::IdSequence;
use academy_core::systems::{PendingEvent, SeasonPhase};
use academy_logic::config::GameConfig;
use academy_logic::constants::{ObjectiveId, ScoutingDuration, StaffCategory};
use academy_logic::economy::{self, Achievements};
use academy_logic::objectives::{ObjectiveTracker, ProgressUpdate};

// ── Harness rules (relaxed gate so a scripted policy can finish) ────────
const HARNESS_CONFIG_JSON: &str = include_str!("../../../data/harness_config.json");

/// Weeks the scripted policy may spend on one season before giving up.
const MAX_WEEKS_PER_SEASON: u32 = 40;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

struct Options {
    verbose: bool,
    seed: u64,
    config_path: Option<String>,
}

fn parse_options() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seed: value_of("--seed").and_then(|s| s.parse().ok()).unwrap_or(42),
        config_path: value_of("--config"),
    }
}

fn main() {
    let options = parse_options();
    let default_filter = if options.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    println!("=== Academy Simulation Harness (seed {}) ===\n", options.seed);

    let mut results = Vec::new();

    // 1. Configuration
    let config = match load_config(&options, &mut results) {
        Some(config) => config,
        None => {
            report(&results, options.verbose);
            std::process::exit(1);
        }
    };
    results.extend(validate_config(&config, options.verbose));

    // 2. Economy formulas
    results.extend(validate_economy(options.verbose));

    // 3. Objective tracking
    results.extend(validate_objectives(&config, options.verbose));

    // 4. Generation sweep
    results.extend(validate_generation(&config, options.seed, options.verbose));

    // 5. Scripted run
    results.extend(run_scripted_season_loop(&config, options.seed, options.verbose));

    if report(&results, options.verbose) > 0 {
        std::process::exit(1);
    }
}

/// Print the result table and return the failure count.
fn report(results: &[TestResult], verbose: bool) -> usize {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    failed
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn load_config(options: &Options, results: &mut Vec<TestResult>) -> Option<GameConfig> {
    println!("--- Configuration ---");
    let (source, json) = match &options.config_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => (path.clone(), json),
            Err(e) => {
                results.push(TestResult::new(
                    "config_read",
                    false,
                    format!("{}: {}", path, e),
                ));
                return None;
            }
        },
        None => ("bundled harness rules".to_string(), HARNESS_CONFIG_JSON.to_string()),
    };

    match GameConfig::from_json_str(&json) {
        Ok(config) => {
            results.push(TestResult::new("config_parse", true, format!("loaded {}", source)));
            Some(config)
        }
        Err(e) => {
            results.push(TestResult::new("config_parse", false, format!("{}: {}", source, e)));
            None
        }
    }
}

fn validate_config(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    results.push(TestResult::new(
        "config_default_valid",
        GameConfig::default().validate().is_ok(),
        "built-in tables pass validation",
    ));

    let weight: u32 = config.objectives.iter().map(|o| o.weight).sum();
    results.push(TestResult::new(
        "config_objective_weight",
        weight == 100,
        format!("objective weights total {}", weight),
    ));

    results.push(TestResult::new(
        "config_distribution_balanced",
        config.budget_distribution.is_balanced(),
        format!("distribution totals {}%", config.budget_distribution.total()),
    ));

    let unbalanced = r#"{ "budget_distribution": { "salaries": 90, "scouting": 90,
        "infrastructure": 0, "tournaments": 0, "medical": 0 } }"#;
    results.push(TestResult::new(
        "config_rejects_unbalanced",
        GameConfig::from_json_str(unbalanced).is_err(),
        "distribution of 180% rejected",
    ));

    let key_ok = config
        .key_facilities
        .iter()
        .all(|id| config.facility(id).is_some());
    results.push(TestResult::new(
        "config_key_facilities_exist",
        key_ok,
        format!("{} key facilities", config.key_facilities.len()),
    ));

    for category in StaffCategory::ALL {
        let roles = config.roles_in(category).count();
        if verbose {
            println!("  {} roles: {}", category.label(), roles);
        }
        results.push(TestResult::new(
            &format!("config_roles_{}", category.label().to_lowercase()),
            roles > 0,
            format!("{} roles", roles),
        ));
    }

    results
}

// ── 2. Economy ──────────────────────────────────────────────────────────

fn validate_economy(verbose: bool) -> Vec<TestResult> {
    println!("--- Economy ---");
    let mut results = Vec::new();

    let cost = economy::facility_upgrade_cost(100_000, 75, 10);
    results.push(TestResult::new(
        "economy_upgrade_cost",
        cost == 17_500,
        format!("+10 on level 75 costs {}", cost),
    ));

    let over = economy::check_facility_upgrade(2_500_000, 70_000, 80, 100, 25);
    results.push(TestResult::new(
        "economy_upgrade_cap",
        over.is_err(),
        "upgrade past max level rejected",
    ));

    results.push(TestResult::new(
        "economy_hire_commitment",
        economy::check_hire(119_999, 10_000).is_err() && economy::check_hire(120_000, 10_000).is_ok(),
        "hiring requires a year of salary",
    ));

    results.push(TestResult::new(
        "economy_severance",
        economy::severance(8_000) == 24_000,
        "three months of salary",
    ));

    let income = economy::seasonal_income(&[1, 2, 3, 4, 8], 0, vec![15, 20]);
    let expected_bonus = 150_000 + 100_000 + 50_000;
    results.push(TestResult::new(
        "economy_league_bonus",
        income.performance_bonus == expected_bonus,
        format!("podium bonus {}", income.performance_bonus),
    ));

    // Score must rise with every achievement.
    let base = Achievements::default();
    let levels = [60, 60, 60];
    let mut prev = economy::final_score(&base, 0, &levels).points;
    let mut monotonic = true;
    for step in 1..=5u32 {
        let a = Achievements {
            top_players_produced: step,
            championships_won: step,
            ..base
        };
        let points = economy::final_score(&a, 0, &levels).points;
        if verbose {
            println!("  step {}: {:.1} points, rating {}", step, points, economy::rating_for(points));
        }
        monotonic &= points > prev;
        prev = points;
    }
    results.push(TestResult::new(
        "economy_score_monotonic",
        monotonic,
        format!("final step scores {:.1} points", prev),
    ));

    results
}

// ── 3. Objectives ───────────────────────────────────────────────────────

fn validate_objectives(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Objectives ---");
    let mut results = Vec::new();
    let mut tracker = ObjectiveTracker::with_gate(&config.objectives, config.settings.gate_threshold);

    results.push(TestResult::new(
        "objectives_start_empty",
        tracker.progress_percent() == 0,
        format!("gate at {}%", tracker.gate_threshold()),
    ));

    let first = tracker.record_facility_progress("training_fields", 5);
    let second = tracker.record_facility_progress("medical_center", 5);
    results.push(TestResult::new(
        "objectives_facility_lock",
        first.changed_state() && !second.changed_state(),
        format!("second facility: {:?}", second),
    ));

    tracker.record_progress(ObjectiveId::HireTopCoaches, ProgressUpdate::Set(u32::MAX));
    let coaches = tracker.get(ObjectiveId::HireTopCoaches).map(|o| o.current_value);
    results.push(TestResult::new(
        "objectives_clamped",
        coaches == tracker.get(ObjectiveId::HireTopCoaches).map(|o| o.required_value),
        format!("coach progress {:?}", coaches),
    ));

    let mut schedule = Vec::new();
    for season in 2..=config.settings.total_seasons {
        tracker.roll_over(season);
        let required: Vec<u32> = tracker.objectives().iter().map(|o| o.required_value).collect();
        if verbose {
            println!("  season {}: {:?}", season, required);
        }
        schedule.push(required);
    }
    let non_decreasing = schedule
        .windows(2)
        .all(|w| w[0].iter().zip(&w[1]).all(|(a, b)| b >= a));
    results.push(TestResult::new(
        "objectives_escalate",
        non_decreasing && tracker.progress_percent() == 0,
        format!("{} rollovers", schedule.len()),
    ));

    results
}

// ── 4. Generation ───────────────────────────────────────────────────────

fn validate_generation(config: &GameConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Generation ---");
    let mut results = Vec::new();
    let mut rng = SeededRandom::new(seed);
    let mut ids = IdSequence::starting_at(1);

    let players = generate_players(config, &mut ids, &mut rng);
    let expected: u32 = config.teams.iter().map(|t| t.player_count).sum();
    results.push(TestResult::new(
        "generation_roster_size",
        players.len() == expected as usize,
        format!("{} players", players.len()),
    ));

    let bad_age = players.iter().filter(|p| {
        config
            .team(&p.team)
            .map_or(true, |t| p.age > t.age || p.age + 2 < t.age)
    });
    let bad_age = bad_age.count();
    results.push(TestResult::new(
        "generation_ages_match_team",
        bad_age == 0,
        format!("{} players outside their age band", bad_age),
    ));

    let bad_potential = players.iter().filter(|p| !(1..=5).contains(&p.potential)).count();
    results.push(TestResult::new(
        "generation_potential_range",
        bad_potential == 0,
        format!("{} out-of-range potentials", bad_potential),
    ));

    let mut tier_counts = [0usize; 5];
    let mut sorted = true;
    for region in &config.regions {
        let input = ScoutingInput {
            region,
            duration: ScoutingDuration::FourWeeks,
            scout_count: 2,
            average_scout_skill: 3.0,
        };
        let prospects = generate_prospects(input, &config.positions, &mut ids, &mut rng);
        sorted &= prospects.windows(2).all(|w| w[0].potential >= w[1].potential);
        for p in &prospects {
            tier_counts[(p.potential as usize).clamp(1, 5) - 1] += 1;
        }
    }
    if verbose {
        println!("  prospect tiers 1-5: {:?}", tier_counts);
    }
    results.push(TestResult::new(
        "generation_prospects_sorted",
        sorted,
        format!("tiers {:?}", tier_counts),
    ));

    results
}

// ── 5. Scripted run ─────────────────────────────────────────────────────

/// Pick an option for an event: the first one that does not cost money.
fn choose_option(event: &PendingEvent) -> usize {
    event
        .options
        .iter()
        .position(|o| o.effects.budget >= 0)
        .unwrap_or(0)
}

fn settle_event<R: RandomValueProvider>(engine: &mut AcademyEngine<R>, verbose: bool) {
    let Some(event) = engine.pending_event().cloned() else {
        return;
    };
    let choice = choose_option(&event);
    match engine.apply_event_option(event.instance_id, choice) {
        Ok(resolution) => {
            if verbose {
                println!(
                    "    event {}: option {}, budget {:+}",
                    resolution.template_id, choice, resolution.budget_delta
                );
            }
        }
        Err(e) => {
            log::warn!("Option {} on {} failed: {}", choice, event.template_id, e);
            let _ = engine.dismiss_event(event.instance_id);
        }
    }
}

/// Hire top coaches until the season's coaching objective is met.
fn staff_up<R: RandomValueProvider>(engine: &mut AcademyEngine<R>) {
    for _ in 0..50 {
        if engine.state().objectives.is_completed(ObjectiveId::HireTopCoaches) {
            return;
        }
        let Ok(candidates) = engine.generate_candidates(StaffCategory::Coaches, "assistant_coach")
        else {
            return;
        };
        for candidate in candidates.into_iter().filter(|c| c.skill >= 4) {
            if engine.hire_staff(candidate).is_err() {
                return;
            }
        }
    }
}

fn upgrade_key_facility<R: RandomValueProvider>(engine: &mut AcademyEngine<R>) {
    let Some(objective) = engine.state().objectives.get(ObjectiveId::UpgradeKeyFacility) else {
        return;
    };
    let needed = objective.required_value.saturating_sub(objective.current_value);
    let target = engine
        .config()
        .key_facilities
        .iter()
        .filter_map(|id| engine.state().facility(id))
        .find(|f| f.headroom() >= needed)
        .map(|f| f.id.clone());
    if let Some(id) = target {
        if let Err(e) = engine.upgrade_facility(&id, needed) {
            log::warn!("Upgrade of {} failed: {}", id, e);
        }
    }
}

/// Send idle scouts on deep missions to regions not yet scouted this season.
fn scout_next_region<R: RandomValueProvider>(engine: &mut AcademyEngine<R>) {
    let scouts: Vec<u32> = engine.state().available_scouts().map(|s| s.id).collect();
    if scouts.is_empty() {
        return;
    }
    let region = engine
        .config()
        .regions
        .iter()
        .find(|r| !engine.state().scouted_regions.contains(&r.id))
        .map(|r| r.id.clone());
    if let Some(region) = region {
        if let Err(e) = engine.dispatch_scouts(&region, &scouts, ScoutingDuration::TwoWeeks) {
            log::info!("Could not scout {}: {}", region, e);
        }
    }
}

fn invite_top_prospects<R: RandomValueProvider>(engine: &mut AcademyEngine<R>) -> u32 {
    let top: Vec<u32> = engine
        .prospects()
        .iter()
        .filter(|p| p.potential == 5)
        .map(|p| p.id)
        .collect();
    let mut invited = 0;
    for id in top {
        if engine.invite_prospect(id).is_ok() {
            invited += 1;
        }
    }
    invited
}

fn run_scripted_season_loop(config: &GameConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted Run ---");
    let mut results = Vec::new();
    let mut engine = match AcademyEngine::with_config(config.clone(), seed) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(TestResult::new("run_start", false, e.to_string()));
            return results;
        }
    };

    let mut lowest_budget = engine.state().budget;
    let mut events_seen = 0;
    let mut talents = 0;

    while engine.phase() == SeasonPhase::SeasonInProgress {
        let season = engine.state().season;
        staff_up(&mut engine);
        upgrade_key_facility(&mut engine);

        let mut weeks = 0;
        while !engine.is_season_completable() && weeks < MAX_WEEKS_PER_SEASON {
            scout_next_region(&mut engine);
            let observations = engine.advance_weeks(1).unwrap_or_default();
            weeks += 1;
            for observation in &observations {
                match observation {
                    Observation::EventPresented(_) => events_seen += 1,
                    Observation::ScoutingReport(report) if verbose => println!(
                        "    week {}: {} prospects in {}",
                        engine.state().week,
                        report.prospects.len(),
                        report.region_id
                    ),
                    _ => {}
                }
            }
            settle_event(&mut engine, verbose);
            talents += invite_top_prospects(&mut engine);
            lowest_budget = lowest_budget.min(engine.state().budget);
        }

        let summary = match engine.attempt_complete_season() {
            Ok(summary) => summary,
            Err(e) => {
                results.push(TestResult::new(
                    &format!("run_season_{}_gate", season),
                    false,
                    format!("{} after {} weeks", e, weeks),
                ));
                return results;
            }
        };
        if verbose {
            println!(
                "  season {}: {}% in {} weeks, income {}, budget {}",
                season,
                summary.progress_percent,
                weeks,
                summary.income.total(),
                summary.budget_after
            );
        }
        results.push(TestResult::new(
            &format!("run_season_{}_complete", season),
            summary.progress_percent >= config.settings.gate_threshold,
            format!("{}% progress", summary.progress_percent),
        ));

        match engine.acknowledge_summary() {
            Ok(SeasonPhase::SeasonInProgress) => {
                let state = engine.state();
                let clean = engine.open_missions().is_empty()
                    && engine.prospects().is_empty()
                    && state.staff.iter().all(|s| !s.is_busy)
                    && state.scouting_budget == config.settings.scouting_budget
                    && state.objectives.progress_percent() == 0
                    && state.season == season + 1;
                results.push(TestResult::new(
                    &format!("run_rollover_{}", season),
                    clean,
                    format!("season {} started clean", state.season),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                results.push(TestResult::new("run_acknowledge", false, e.to_string()));
                return results;
            }
        }
    }

    results.push(TestResult::new(
        "run_budget_never_negative",
        lowest_budget >= 0,
        format!("lowest budget {}", lowest_budget),
    ));

    match engine.final_result() {
        Some(result) => {
            println!(
                "  Final: {} seasons, budget {}, {:.1} points, rating {}/5",
                result.seasons_played, result.budget, result.score.points, result.score.rating
            );
            println!("  {}", result.rating_text);
            if verbose {
                match serde_json::to_string_pretty(result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => log::warn!("Could not serialize final result: {}", e),
                }
            }
            results.push(TestResult::new(
                "run_final_result",
                result.seasons_played == config.settings.total_seasons
                    && (1..=5).contains(&result.score.rating),
                format!(
                    "{} events, {} top talents invited",
                    events_seen, talents
                ),
            ));
        }
        None => results.push(TestResult::new(
            "run_final_result",
            false,
            format!("run ended in phase {:?}", engine.phase()),
        )),
    }

    results
}
