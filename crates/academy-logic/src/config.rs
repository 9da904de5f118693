//! Game configuration: the static tables every run is generated from.
//!
//! `GameConfig::default()` carries the canonical academy: six age-group teams,
//! five facilities, eleven staff roles, ten positions, fourteen scouting regions,
//! the six season objectives and the random-event catalog. A JSON document can
//! override any subset of it; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ObjectiveId, StaffCategory};
use crate::events::{default_catalog, EventTemplate};
use crate::objectives::{Escalation, ObjectiveSpec};

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Global run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Display label of the first season.
    pub start_label: String,
    /// Opening main budget.
    pub initial_budget: i64,
    /// Seasonal scouting allowance; refilled at every rollover.
    pub scouting_budget: i64,
    pub total_seasons: u32,
    /// Minimum weighted progress (percent) to close a season.
    pub gate_threshold: u32,
    /// Youngest age at which a player may be sold.
    pub min_sale_age: u32,
    /// Cap on the generated opening staff.
    pub max_initial_staff: usize,
    /// Candidates offered per hiring request.
    pub candidates_per_role: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            start_label: "July 2023".to_string(),
            initial_budget: 2_500_000,
            scouting_budget: 150_000,
            total_seasons: 5,
            gate_threshold: 80,
            min_sale_age: 16,
            max_initial_staff: 15,
            candidates_per_role: 3,
        }
    }
}

/// An academy age-group team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSpec {
    pub id: String,
    pub name: String,
    /// Nominal age: players are this age or up to two years younger.
    pub age: u32,
    pub player_count: u32,
    pub rating: u8,
    /// Size of the league the team plays in.
    pub league_size: u32,
    /// A league win by this team satisfies the youth-league objective.
    pub league_eligible: bool,
}

/// An upgradable infrastructure asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitySpec {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    /// Cost of 100 levels at level zero.
    pub base_cost: i64,
    pub effect: String,
}

/// A hireable staff role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRoleSpec {
    pub id: String,
    pub category: StaffCategory,
    pub title: String,
    /// Monthly salary bounds, `[min, max)`.
    pub salary_min: i64,
    pub salary_max: i64,
    pub effect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSpec {
    pub code: String,
    pub name: String,
}

/// A scouting region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    pub id: String,
    pub name: String,
    /// 1-4, drives prospect count and quality.
    pub talent_rating: u32,
    pub population: u64,
}

/// Five named percentage shares of spending. Must total 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDistribution {
    pub salaries: u32,
    pub scouting: u32,
    pub infrastructure: u32,
    pub tournaments: u32,
    pub medical: u32,
}

impl BudgetDistribution {
    pub fn total(&self) -> u32 {
        self.salaries + self.scouting + self.infrastructure + self.tournaments + self.medical
    }

    pub fn is_balanced(&self) -> bool {
        self.total() == 100
    }
}

impl Default for BudgetDistribution {
    fn default() -> Self {
        Self {
            salaries: 35,
            scouting: 15,
            infrastructure: 30,
            tournaments: 10,
            medical: 10,
        }
    }
}

/// Random-event timing, in simulated weeks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventCadence {
    pub initial_delay_weeks: u32,
    pub min_interval_weeks: u32,
    pub max_interval_weeks: u32,
    /// Delay before retrying a trigger that found no qualifying target.
    pub retry_delay_weeks: u32,
}

impl Default for EventCadence {
    fn default() -> Self {
        Self {
            initial_delay_weeks: 2,
            min_interval_weeks: 4,
            max_interval_weeks: 6,
            retry_delay_weeks: 1,
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settings: GameSettings,
    pub teams: Vec<TeamSpec>,
    pub facilities: Vec<FacilitySpec>,
    /// Facilities nominated for the key-facility objective.
    pub key_facilities: Vec<String>,
    pub staff_roles: Vec<StaffRoleSpec>,
    pub positions: Vec<PositionSpec>,
    pub regions: Vec<RegionSpec>,
    pub budget_distribution: BudgetDistribution,
    pub objectives: Vec<ObjectiveSpec>,
    pub event_cadence: EventCadence,
    pub events: Vec<EventTemplate>,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.total_seasons == 0 {
            return Err(invalid("settings.total_seasons", "must be at least 1"));
        }
        if self.settings.gate_threshold > 100 {
            return Err(invalid("settings.gate_threshold", "must be a percentage"));
        }
        if self.teams.is_empty() {
            return Err(invalid("teams", "at least one team is required"));
        }
        if let Some(team) = self.teams.iter().find(|t| t.player_count == 0 || t.league_size == 0) {
            return Err(invalid(
                "teams",
                format!("team {} needs players and a league", team.id),
            ));
        }
        if self.facilities.is_empty() {
            return Err(invalid("facilities", "at least one facility is required"));
        }
        if let Some(f) = self.facilities.iter().find(|f| f.level > f.max_level) {
            return Err(invalid(
                "facilities",
                format!("{} starts above its max level", f.id),
            ));
        }
        for key in &self.key_facilities {
            if self.facility(key).is_none() {
                return Err(invalid(
                    "key_facilities",
                    format!("unknown facility {}", key),
                ));
            }
        }
        if let Some(role) = self
            .staff_roles
            .iter()
            .find(|r| r.salary_min <= 0 || r.salary_max < r.salary_min)
        {
            return Err(invalid(
                "staff_roles",
                format!("salary range of {} is invalid", role.id),
            ));
        }
        if self.positions.is_empty() {
            return Err(invalid("positions", "at least one position is required"));
        }
        if self.regions.is_empty() {
            return Err(invalid("regions", "at least one region is required"));
        }
        if !self.budget_distribution.is_balanced() {
            return Err(invalid(
                "budget_distribution",
                format!("shares total {}%, expected 100%", self.budget_distribution.total()),
            ));
        }
        if self.objectives.iter().all(|o| o.weight == 0) {
            return Err(invalid("objectives", "total weight must be positive"));
        }
        let cadence = &self.event_cadence;
        if cadence.min_interval_weeks == 0 || cadence.max_interval_weeks < cadence.min_interval_weeks
        {
            return Err(invalid("event_cadence", "interval bounds are invalid"));
        }
        Ok(())
    }

    pub fn team(&self, id: &str) -> Option<&TeamSpec> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn facility(&self, id: &str) -> Option<&FacilitySpec> {
        self.facilities.iter().find(|f| f.id == id)
    }

    pub fn role(&self, category: StaffCategory, id: &str) -> Option<&StaffRoleSpec> {
        self.staff_roles
            .iter()
            .find(|r| r.category == category && r.id == id)
    }

    pub fn roles_in(&self, category: StaffCategory) -> impl Iterator<Item = &StaffRoleSpec> {
        self.staff_roles.iter().filter(move |r| r.category == category)
    }

    pub fn region(&self, id: &str) -> Option<&RegionSpec> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn is_key_facility(&self, id: &str) -> bool {
        self.key_facilities.iter().any(|k| k == id)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let regions = default_regions();
        let region_count = regions.len() as u32;
        Self {
            settings: GameSettings::default(),
            teams: default_teams(),
            facilities: default_facilities(),
            key_facilities: vec!["training_fields".into(), "medical_center".into()],
            staff_roles: default_staff_roles(),
            positions: default_positions(),
            regions,
            budget_distribution: BudgetDistribution::default(),
            objectives: default_objectives(region_count),
            event_cadence: EventCadence::default(),
            events: default_catalog(),
        }
    }
}

fn team(id: &str, age: u32, player_count: u32, rating: u8, league_size: u32) -> TeamSpec {
    TeamSpec {
        id: id.to_string(),
        name: id.to_uppercase(),
        age,
        player_count,
        rating,
        league_size,
        league_eligible: age >= 17,
    }
}

fn default_teams() -> Vec<TeamSpec> {
    vec![
        team("u21", 21, 22, 3, 12),
        team("u19", 19, 24, 4, 10),
        team("u17", 17, 20, 3, 8),
        team("u15", 15, 18, 4, 8),
        team("u13", 13, 16, 3, 8),
        team("u11", 11, 14, 2, 8),
    ]
}

fn facility(id: &str, name: &str, level: u32, base_cost: i64, effect: &str) -> FacilitySpec {
    FacilitySpec {
        id: id.to_string(),
        name: name.to_string(),
        level,
        max_level: 100,
        base_cost,
        effect: effect.to_string(),
    }
}

fn default_facilities() -> Vec<FacilitySpec> {
    vec![
        facility(
            "training_fields",
            "Training fields",
            75,
            100_000,
            "Speeds up technical development",
        ),
        facility(
            "medical_center",
            "Medical center",
            60,
            80_000,
            "Lowers injury risk and recovery time",
        ),
        facility("gym", "Gym", 80, 70_000, "Speeds up physical development"),
        facility(
            "dormitory",
            "Dormitory",
            50,
            120_000,
            "Improves morale and recovery of boarding players",
        ),
        facility(
            "classrooms",
            "Classrooms",
            65,
            50_000,
            "Improves tactical and mental development",
        ),
    ]
}

fn role(
    category: StaffCategory,
    id: &str,
    title: &str,
    salary: (i64, i64),
    effect: &str,
) -> StaffRoleSpec {
    StaffRoleSpec {
        id: id.to_string(),
        category,
        title: title.to_string(),
        salary_min: salary.0,
        salary_max: salary.1,
        effect: effect.to_string(),
    }
}

fn default_staff_roles() -> Vec<StaffRoleSpec> {
    use StaffCategory::*;
    vec![
        role(Coaches, "head_coach", "Head coach", (5_000, 15_000), "Overall player development"),
        role(Coaches, "assistant_coach", "Assistant coach", (2_000, 7_000), "Training support"),
        role(Coaches, "goalkeeping_coach", "Goalkeeping coach", (2_500, 8_000), "Goalkeeper development"),
        role(Coaches, "fitness_coach", "Fitness coach", (2_000, 7_000), "Physical development"),
        role(Coaches, "technical_coach", "Technical coach", (2_500, 8_000), "Technical development"),
        role(Scouts, "head_scout", "Head scout", (4_000, 10_000), "Scouting coordination"),
        role(Scouts, "regional_scout", "Regional scout", (2_000, 6_000), "Regional talent search"),
        role(Scouts, "international_scout", "International scout", (3_000, 9_000), "Talent search abroad"),
        role(Medical, "doctor", "Doctor", (3_000, 9_000), "Injury treatment"),
        role(Medical, "physiotherapist", "Physiotherapist", (2_000, 6_000), "Injury rehabilitation"),
        role(Medical, "nutritionist", "Nutritionist", (1_500, 5_000), "Diet and recovery"),
    ]
}

fn default_positions() -> Vec<PositionSpec> {
    [
        ("GK", "Goalkeeper"),
        ("RB", "Right back"),
        ("CB", "Centre back"),
        ("LB", "Left back"),
        ("DM", "Defensive midfielder"),
        ("CM", "Central midfielder"),
        ("AM", "Attacking midfielder"),
        ("RW", "Right winger"),
        ("LW", "Left winger"),
        ("ST", "Striker"),
    ]
    .iter()
    .map(|(code, name)| PositionSpec {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

fn default_regions() -> Vec<RegionSpec> {
    [
        ("almaty", "Almaty", 4, 2_000_000),
        ("astana", "Astana", 3, 1_200_000),
        ("shymkent", "Shymkent", 3, 1_000_000),
        ("karaganda", "Karaganda", 2, 500_000),
        ("aktobe", "Aktobe", 2, 400_000),
        ("taraz", "Taraz", 2, 350_000),
        ("pavlodar", "Pavlodar", 2, 330_000),
        ("oskemen", "Oskemen", 2, 310_000),
        ("semey", "Semey", 2, 300_000),
        ("kyzylorda", "Kyzylorda", 1, 280_000),
        ("oral", "Oral", 1, 270_000),
        ("kostanay", "Kostanay", 1, 250_000),
        ("atyrau", "Atyrau", 1, 230_000),
        ("aktau", "Aktau", 1, 220_000),
    ]
    .iter()
    .map(|(id, name, talent_rating, population)| RegionSpec {
        id: id.to_string(),
        name: name.to_string(),
        talent_rating: *talent_rating,
        population: *population,
    })
    .collect()
}

/// The six season objectives with their opening requirements and escalation.
pub fn default_objectives(region_count: u32) -> Vec<ObjectiveSpec> {
    vec![
        ObjectiveSpec::new(ObjectiveId::HireTopCoaches, 3, 15, Escalation::Add { step: 1 }),
        ObjectiveSpec::new(
            ObjectiveId::ScoutRegionsDeep,
            3,
            20,
            Escalation::AddCapped {
                step: 1,
                cap: region_count,
            },
        ),
        ObjectiveSpec::new(ObjectiveId::FindTopTalents, 2, 25, Escalation::Add { step: 1 }),
        ObjectiveSpec::new(
            ObjectiveId::UpgradeKeyFacility,
            15,
            20,
            Escalation::AddCapped { step: 5, cap: 50 },
        ),
        ObjectiveSpec::new(ObjectiveId::WinYouthLeague, 1, 15, Escalation::Reset { value: 1 }),
        ObjectiveSpec::new(ObjectiveId::PositiveBalance, 0, 5, Escalation::Fixed),
    ]
}
