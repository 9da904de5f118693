//! Academy assets: facilities, age-group teams and standing counters.

use academy_logic::config::{FacilitySpec, TeamSpec};
use serde::{Deserialize, Serialize};

/// An upgradable facility. Level only goes up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    pub base_cost: i64,
}

impl Facility {
    pub fn headroom(&self) -> u32 {
        self.max_level.saturating_sub(self.level)
    }

    /// Raise the level by up to `amount`, returning the applied increase.
    pub fn raise_capped(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.headroom());
        self.level += applied;
        applied
    }
}

impl From<&FacilitySpec> for Facility {
    fn from(spec: &FacilitySpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            level: spec.level,
            max_level: spec.max_level,
            base_cost: spec.base_cost,
        }
    }
}

/// An age-group team and its league finish for the current season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub rating: u8,
    pub league_size: u32,
    pub league_eligible: bool,
    /// Set when the season is completed.
    pub league_position: Option<u32>,
}

impl From<&TeamSpec> for Team {
    fn from(spec: &TeamSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            age: spec.age,
            rating: spec.rating,
            league_size: spec.league_size,
            league_eligible: spec.league_eligible,
            league_position: None,
        }
    }
}

/// Soft counters moved by event decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Standing {
    pub reputation: i32,
    pub injury_risk: i32,
    pub coaching_level: i32,
    pub morale: i32,
    pub tournament_experience: i32,
}
