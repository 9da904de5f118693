//! People: academy players, staff, hiring candidates and scouted prospects.

use academy_logic::constants::StaffCategory;
use serde::{Deserialize, Serialize};

/// The four rated attributes of a player, each in `[10, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub technical: u32,
    pub physical: u32,
    pub tactical: u32,
    pub mental: u32,
}

impl Attributes {
    pub fn as_array(&self) -> [u32; 4] {
        [self.technical, self.physical, self.tactical, self.mental]
    }

    pub fn average(&self) -> f64 {
        self.as_array().iter().sum::<u32>() as f64 / 4.0
    }
}

/// An academy player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub age: u32,
    /// Position code, e.g. `"CM"`.
    pub position: String,
    /// Team id, e.g. `"u17"`.
    pub team: String,
    /// 1-5.
    pub potential: u8,
    pub attributes: Attributes,
    /// Market value fixed at creation.
    pub value: i64,
}

/// An employed staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: u32,
    pub name: String,
    pub role_id: String,
    pub title: String,
    pub category: StaffCategory,
    /// 1-5.
    pub skill: u8,
    pub experience: u32,
    /// Monthly.
    pub salary: i64,
    /// Only ever set on scouts, while assigned to an open mission.
    pub is_busy: bool,
}

/// A generated applicant for a staff role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffCandidate {
    pub name: String,
    pub role_id: String,
    pub title: String,
    pub category: StaffCategory,
    pub skill: u8,
    pub experience: u32,
    pub salary: i64,
}

impl StaffCandidate {
    pub fn into_member(self, id: u32) -> StaffMember {
        StaffMember {
            id,
            name: self.name,
            role_id: self.role_id,
            title: self.title,
            category: self.category,
            skill: self.skill,
            experience: self.experience,
            salary: self.salary,
            is_busy: false,
        }
    }
}

/// A young player found by a scouting mission, not yet part of the academy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub position: String,
    pub potential: u8,
    /// Region id the prospect was found in.
    pub region: String,
}
