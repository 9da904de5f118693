//! Scouting missions: dispatch, deferred resolution and cancellation.
//!
//! A scout belongs to at most one open mission. Dispatch marks the assigned
//! scouts busy before returning; only the matching resolution or a
//! cancellation clears the flag.

use academy_logic::config::{PositionSpec, RegionSpec};
use academy_logic::constants::{ObjectiveId, ScoutingDuration, StaffCategory};
use academy_logic::economy::check_scouting_funds;
use academy_logic::objectives::ProgressUpdate;
use serde::{Deserialize, Serialize};

use crate::components::Prospect;
use crate::error::{EngineError, EngineResult};
use crate::generation::{generate_prospects, ScoutingInput};
use crate::random::RandomValueProvider;
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    Dispatched,
    Resolving,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutingMission {
    pub id: u32,
    pub region_id: String,
    pub scout_ids: Vec<u32>,
    pub duration: ScoutingDuration,
    pub cost: i64,
    pub season: u32,
    pub dispatched_week: u32,
    pub due_week: u32,
    pub status: MissionStatus,
    /// Scheduler task that resolves this mission.
    pub task_id: Option<u32>,
}

/// Outcome of a resolved mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutingReport {
    pub mission_id: u32,
    pub region_id: String,
    pub prospects: Vec<Prospect>,
    /// The mission counted toward the scouting-breadth objective.
    pub counted_region: bool,
}

/// Check that every requested id is an idle scout. Duplicates are ignored.
pub fn validate_scouts(state: &SimulationState, scout_ids: &[u32]) -> EngineResult<Vec<u32>> {
    let mut ids = scout_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() || state.available_scouts().next().is_none() {
        return Err(EngineError::NoAvailableScouts);
    }
    for &id in &ids {
        let member = state
            .staff_member(id)
            .ok_or_else(|| EngineError::not_found("staff member", id))?;
        if member.category != StaffCategory::Scouts {
            return Err(EngineError::NotAScout { id });
        }
        if member.is_busy {
            return Err(EngineError::ScoutBusy { id });
        }
    }
    Ok(ids)
}

/// Validate and open a mission. Nothing is mutated unless every check passes.
pub fn dispatch(
    state: &mut SimulationState,
    mission_id: u32,
    region: &RegionSpec,
    scout_ids: &[u32],
    duration: ScoutingDuration,
) -> EngineResult<ScoutingMission> {
    let scout_ids = validate_scouts(state, scout_ids)?;
    let cost = duration.cost();
    check_scouting_funds(state.budget, state.scouting_budget, cost)?;

    state.budget -= cost;
    state.scouting_budget -= cost;
    for &id in &scout_ids {
        if let Some(scout) = state.staff_member_mut(id) {
            scout.is_busy = true;
        }
    }
    Ok(ScoutingMission {
        id: mission_id,
        region_id: region.id.clone(),
        scout_ids,
        duration,
        cost,
        season: state.season,
        dispatched_week: state.week,
        due_week: state.week + duration.weeks(),
        status: MissionStatus::Dispatched,
        task_id: None,
    })
}

fn release_scouts(state: &mut SimulationState, mission: &ScoutingMission) {
    for &id in &mission.scout_ids {
        if let Some(scout) = state.staff_member_mut(id) {
            scout.is_busy = false;
        }
    }
}

fn average_skill(state: &SimulationState, mission: &ScoutingMission) -> f64 {
    let skills: Vec<f64> = mission
        .scout_ids
        .iter()
        .filter_map(|&id| state.staff_member(id))
        .map(|s| s.skill as f64)
        .collect();
    if skills.is_empty() {
        return 0.0;
    }
    skills.iter().sum::<f64>() / skills.len() as f64
}

/// Generate the mission's prospects, free its scouts and credit the
/// scouting-breadth objective once per region per season for deep missions.
pub fn resolve(
    state: &mut SimulationState,
    mission: &mut ScoutingMission,
    region: &RegionSpec,
    positions: &[PositionSpec],
    rng: &mut impl RandomValueProvider,
) -> ScoutingReport {
    mission.status = MissionStatus::Resolving;
    let input = ScoutingInput {
        region,
        duration: mission.duration,
        scout_count: mission.scout_ids.len(),
        average_scout_skill: average_skill(state, mission),
    };
    let prospects = generate_prospects(input, positions, &mut state.ids, rng);
    release_scouts(state, mission);

    let counted_region =
        mission.duration.is_deep() && state.scouted_regions.insert(mission.region_id.clone());
    if counted_region {
        state
            .objectives
            .record_progress(ObjectiveId::ScoutRegionsDeep, ProgressUpdate::Increment(1));
    }
    mission.status = MissionStatus::Resolved;

    ScoutingReport {
        mission_id: mission.id,
        region_id: mission.region_id.clone(),
        prospects,
        counted_region,
    }
}

/// Abandon a mission: scouts are released and no prospects are produced.
pub fn cancel(state: &mut SimulationState, mission: &ScoutingMission) {
    release_scouts(state, mission);
}
