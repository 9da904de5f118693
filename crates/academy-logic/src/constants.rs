//! Shared enums and fixed tables: staff categories, scouting durations,
//! objective identifiers.

use serde::{Deserialize, Serialize};

/// Staff department. Only scouts can be marked busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffCategory {
    Coaches,
    Scouts,
    Medical,
}

impl StaffCategory {
    pub const ALL: [StaffCategory; 3] = [
        StaffCategory::Coaches,
        StaffCategory::Scouts,
        StaffCategory::Medical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StaffCategory::Coaches => "Coaches",
            StaffCategory::Scouts => "Scouts",
            StaffCategory::Medical => "Medical staff",
        }
    }
}

/// Length of a scouting mission. The discriminant is the duration in weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ScoutingDuration {
    /// Surface sweep.
    OneWeek = 1,
    /// Standard search.
    TwoWeeks = 2,
    /// Deep search.
    FourWeeks = 4,
}

impl ScoutingDuration {
    pub const ALL: [ScoutingDuration; 3] = [
        ScoutingDuration::OneWeek,
        ScoutingDuration::TwoWeeks,
        ScoutingDuration::FourWeeks,
    ];

    pub fn weeks(&self) -> u32 {
        *self as u32
    }

    /// Flat mission cost, debited from both the main and the scouting budget.
    pub fn cost(&self) -> i64 {
        match self {
            ScoutingDuration::OneWeek => 5_000,
            ScoutingDuration::TwoWeeks => 9_000,
            ScoutingDuration::FourWeeks => 15_000,
        }
    }

    /// Prospect-count multiplier.
    pub fn multiplier(&self) -> f64 {
        match self {
            ScoutingDuration::OneWeek => 0.8,
            ScoutingDuration::TwoWeeks => 1.5,
            ScoutingDuration::FourWeeks => 2.5,
        }
    }

    /// Missions of two weeks or more count toward the scouting-breadth objective.
    pub fn is_deep(&self) -> bool {
        self.weeks() >= 2
    }

    pub fn from_weeks(weeks: u32) -> Option<Self> {
        match weeks {
            1 => Some(ScoutingDuration::OneWeek),
            2 => Some(ScoutingDuration::TwoWeeks),
            4 => Some(ScoutingDuration::FourWeeks),
            _ => None,
        }
    }
}

/// Identifies one of the season objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveId {
    /// Hire coaches rated four stars or better.
    HireTopCoaches,
    /// Run deep (two weeks or longer) scouting missions in distinct regions.
    ScoutRegionsDeep,
    /// Invite five-star prospects for a trial.
    FindTopTalents,
    /// Upgrade one of the nominated key facilities by a percentage.
    UpgradeKeyFacility,
    /// Win a league with an eligible youth team.
    WinYouthLeague,
    /// End the season with a non-negative budget.
    PositiveBalance,
}

impl ObjectiveId {
    pub fn describe(&self, required: u32) -> String {
        match self {
            ObjectiveId::HireTopCoaches => {
                format!("Hire at least {} coaches rated 4 stars or higher", required)
            }
            ObjectiveId::ScoutRegionsDeep => format!(
                "Run deep scouting (2+ weeks) in at least {} different regions",
                required
            ),
            ObjectiveId::FindTopTalents => format!(
                "Discover and invite at least {} players with 5-star potential",
                required
            ),
            ObjectiveId::UpgradeKeyFacility => format!(
                "Upgrade a key facility (training fields or medical center) by at least {}%",
                required
            ),
            ObjectiveId::WinYouthLeague => {
                "Win the league with at least one youth team (U17, U19 or U21)".to_string()
            }
            ObjectiveId::PositiveBalance => {
                "Finish the season with a zero or positive budget balance".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_costs_and_weeks() {
        assert_eq!(ScoutingDuration::OneWeek.cost(), 5_000);
        assert_eq!(ScoutingDuration::TwoWeeks.cost(), 9_000);
        assert_eq!(ScoutingDuration::FourWeeks.cost(), 15_000);
        assert_eq!(ScoutingDuration::FourWeeks.weeks(), 4);
    }

    #[test]
    fn test_deep_scouting_threshold() {
        assert!(!ScoutingDuration::OneWeek.is_deep());
        assert!(ScoutingDuration::TwoWeeks.is_deep());
        assert!(ScoutingDuration::FourWeeks.is_deep());
    }

    #[test]
    fn test_from_weeks() {
        for d in ScoutingDuration::ALL {
            assert_eq!(ScoutingDuration::from_weeks(d.weeks()), Some(d));
        }
        assert_eq!(ScoutingDuration::from_weeks(3), None);
    }
}
