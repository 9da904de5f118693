//! Season lifecycle: completion gate, seasonal income, rollover and final
//! scoring.

use academy_logic::constants::ObjectiveId;
use academy_logic::economy::{
    final_score, league_bonus, rating_text, seasonal_income, Achievements, FinalScore,
    IncomeBreakdown,
};
use academy_logic::objectives::ProgressUpdate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::random::RandomValueProvider;
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPhase {
    SeasonInProgress,
    /// Income credited; waiting for the summary to be acknowledged.
    SeasonComplete,
    /// Terminal.
    RunComplete,
}

/// One team's league finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFinish {
    pub team_id: String,
    pub position: u32,
    pub league_size: u32,
    pub bonus: i64,
}

/// Record produced when a season completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season: u32,
    pub team_finishes: Vec<TeamFinish>,
    pub income: IncomeBreakdown,
    pub progress_percent: u32,
    pub completed_objectives: usize,
    pub total_objectives: usize,
    pub ended_positive: bool,
    pub budget_after: i64,
    /// Empty when this was the last season.
    pub next_requirements: Vec<(ObjectiveId, u32)>,
}

/// Outcome of the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub seasons_played: u32,
    pub budget: i64,
    pub achievements: Achievements,
    pub score: FinalScore,
    pub rating_text: String,
}

/// Roll a league position for every team. An eligible team winning its league
/// completes the youth-league objective and counts as a championship, once
/// per season.
fn play_leagues(state: &mut SimulationState, rng: &mut impl RandomValueProvider) -> Vec<TeamFinish> {
    let mut finishes = Vec::with_capacity(state.teams.len());
    for i in 0..state.teams.len() {
        let league_size = state.teams[i].league_size;
        let position = rng.range_u32(1, league_size);
        state.teams[i].league_position = Some(position);

        let eligible = state.teams[i].league_eligible;
        if position == 1 && eligible && !state.objectives.is_completed(ObjectiveId::WinYouthLeague) {
            state
                .objectives
                .record_progress(ObjectiveId::WinYouthLeague, ProgressUpdate::Set(1));
            state.achievements.championships_won += 1;
            log::info!("{} won their league", state.teams[i].name);
        }
        finishes.push(TeamFinish {
            team_id: state.teams[i].id.clone(),
            position,
            league_size,
            bonus: league_bonus(position),
        });
    }
    finishes
}

/// Close the current season.
///
/// Fails with [`EngineError::GateNotMet`] below the progress threshold and
/// leaves state untouched. Otherwise finalizes the balance objective from the
/// live budget, credits seasonal income and clears the season's transfer
/// revenue.
pub fn complete_season(
    state: &mut SimulationState,
    rng: &mut impl RandomValueProvider,
) -> EngineResult<SeasonSummary> {
    if !state.objectives.is_season_completable() {
        return Err(EngineError::GateNotMet {
            progress: state.objectives.progress_percent(),
            required: state.objectives.gate_threshold(),
        });
    }

    let ended_positive = state.budget >= 0;
    state
        .objectives
        .finalize(ObjectiveId::PositiveBalance, ended_positive);

    let team_finishes = play_leagues(state, rng);
    let positions: Vec<u32> = team_finishes.iter().map(|f| f.position).collect();
    let completed_weights: Vec<u32> = state
        .objectives
        .objectives()
        .iter()
        .filter(|o| o.completed)
        .map(|o| o.weight)
        .collect();
    let income = seasonal_income(
        &positions,
        state.achievements.transfer_revenue,
        completed_weights,
    );
    log::debug!(
        "Seasonal income: base {} + performance {} + transfers {} + objectives {}",
        income.base,
        income.performance_bonus,
        income.transfer_revenue,
        income.objectives_bonus
    );
    state.budget += income.total();
    state.achievements.transfer_revenue = 0;

    let next_requirements = if state.season < state.total_seasons {
        state.objectives.preview_requirements(state.season + 1)
    } else {
        Vec::new()
    };
    Ok(SeasonSummary {
        season: state.season,
        team_finishes,
        income,
        progress_percent: state.objectives.progress_percent(),
        completed_objectives: state.objectives.completed_count(),
        total_objectives: state.objectives.objectives().len(),
        ended_positive,
        budget_after: state.budget,
        next_requirements,
    })
}

/// Start the next season: reset and escalate objectives, refill the scouting
/// allowance and forget last season's scouted regions.
pub fn roll_over(state: &mut SimulationState, scouting_allowance: i64) {
    state.season += 1;
    state.objectives.roll_over(state.season);
    state.scouting_budget = scouting_allowance;
    state.scouted_regions.clear();
    for team in &mut state.teams {
        team.league_position = None;
    }
}

pub fn final_result(state: &SimulationState) -> FinalResult {
    let score = final_score(&state.achievements, state.budget, &state.facility_levels());
    FinalResult {
        seasons_played: state.season,
        budget: state.budget,
        achievements: state.achievements,
        rating_text: rating_text(score.rating).to_string(),
        score,
    }
}
