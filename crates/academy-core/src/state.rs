//! The root aggregate every engine operation reads and mutates.

use std::collections::BTreeSet;

use academy_logic::config::{BudgetDistribution, GameConfig};
use academy_logic::constants::StaffCategory;
use academy_logic::economy::{annual_commitment, Achievements};
use academy_logic::objectives::ObjectiveTracker;
use serde::{Deserialize, Serialize};

use crate::components::{Facility, Player, Standing, StaffMember, Team};

/// Monotonic id source shared by players, staff and prospects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete simulation state for one run.
///
/// Owned by the engine; callers only ever see it through `&SimulationState`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// 1-based.
    pub season: u32,
    pub total_seasons: u32,
    /// Weeks elapsed since the run started.
    pub week: u32,
    pub budget: i64,
    pub scouting_budget: i64,
    pub budget_distribution: BudgetDistribution,
    pub players: Vec<Player>,
    pub staff: Vec<StaffMember>,
    pub facilities: Vec<Facility>,
    pub teams: Vec<Team>,
    pub objectives: ObjectiveTracker,
    pub achievements: Achievements,
    pub standing: Standing,
    /// Regions already counted toward the scouting-breadth objective this season.
    pub scouted_regions: BTreeSet<String>,
    pub ids: IdSequence,
}

impl SimulationState {
    /// Fresh state with no players or staff.
    pub fn new(config: &GameConfig) -> Self {
        let settings = &config.settings;
        Self {
            season: 1,
            total_seasons: settings.total_seasons,
            week: 0,
            budget: settings.initial_budget,
            scouting_budget: settings.scouting_budget,
            budget_distribution: config.budget_distribution,
            players: Vec::new(),
            staff: Vec::new(),
            facilities: config.facilities.iter().map(Facility::from).collect(),
            teams: config.teams.iter().map(Team::from).collect(),
            objectives: ObjectiveTracker::with_gate(&config.objectives, settings.gate_threshold),
            achievements: Achievements::default(),
            standing: Standing::default(),
            scouted_regions: BTreeSet::new(),
            ids: IdSequence::starting_at(1),
        }
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn staff_member(&self, id: u32) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn staff_member_mut(&mut self, id: u32) -> Option<&mut StaffMember> {
        self.staff.iter_mut().find(|s| s.id == id)
    }

    pub fn facility(&self, id: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }

    pub fn facility_mut(&mut self, id: &str) -> Option<&mut Facility> {
        self.facilities.iter_mut().find(|f| f.id == id)
    }

    pub fn facility_levels(&self) -> Vec<u32> {
        self.facilities.iter().map(|f| f.level).collect()
    }

    pub fn staff_in(&self, category: StaffCategory) -> impl Iterator<Item = &StaffMember> {
        self.staff.iter().filter(move |s| s.category == category)
    }

    pub fn available_scouts(&self) -> impl Iterator<Item = &StaffMember> {
        self.staff_in(StaffCategory::Scouts).filter(|s| !s.is_busy)
    }

    pub fn annual_payroll(&self) -> i64 {
        self.staff.iter().map(|s| annual_commitment(s.salary)).sum()
    }

    /// JSON snapshot for presentation layers.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_from_default_config() {
        let config = GameConfig::default();
        let state = SimulationState::new(&config);
        assert_eq!(state.season, 1);
        assert_eq!(state.total_seasons, 5);
        assert_eq!(state.budget, 2_500_000);
        assert_eq!(state.scouting_budget, 150_000);
        assert_eq!(state.facilities.len(), 5);
        assert_eq!(state.teams.len(), 6);
        assert_eq!(state.objectives.objectives().len(), 6);
        assert_eq!(state.facility("training_fields").map(|f| f.level), Some(75));
    }

    #[test]
    fn test_id_sequence_is_monotonic() {
        let mut ids = IdSequence::starting_at(5);
        assert_eq!(ids.next_id(), 5);
        assert_eq!(ids.next_id(), 6);
    }

    #[test]
    fn test_snapshot_json_contains_budget() {
        let state = SimulationState::new(&GameConfig::default());
        let json = state.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["budget"], 2_500_000);
    }
}
