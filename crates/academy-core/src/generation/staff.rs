//! Staff generation: the opening roster and hiring candidates.

use academy_logic::config::{GameConfig, StaffRoleSpec};

use crate::components::{StaffCandidate, StaffMember};
use crate::generation::names::{generate_name, NamePool};
use crate::random::RandomValueProvider;
use crate::state::IdSequence;

/// Cumulative cutoffs for skill 5, 4 and 3; anything above is skill 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillTable(pub [f64; 3]);

/// Opening roster: stricter, top talent is rare.
pub const INITIAL_SKILL_TABLE: SkillTable = SkillTable([0.05, 0.20, 0.50]);
/// Hiring market.
pub const HIRING_SKILL_TABLE: SkillTable = SkillTable([0.10, 0.30, 0.60]);

/// Probability that a role starts with two members instead of one.
const DOUBLE_STAFFED_CHANCE: f64 = 0.3;

impl SkillTable {
    pub fn skill_for(&self, roll: f64) -> u8 {
        let [five, four, three] = self.0;
        if roll < five {
            5
        } else if roll < four {
            4
        } else if roll < three {
            3
        } else {
            2
        }
    }
}

/// Monthly salary uniform in the role's `[min, max)` range.
pub fn roll_salary(role: &StaffRoleSpec, rng: &mut impl RandomValueProvider) -> i64 {
    let span = (role.salary_max - role.salary_min) as f64;
    role.salary_min + (rng.next_f64() * span).floor() as i64
}

fn roll_candidate(
    role: &StaffRoleSpec,
    experience: (u32, u32),
    table: SkillTable,
    rng: &mut impl RandomValueProvider,
) -> StaffCandidate {
    let name = generate_name(NamePool::Staff, rng);
    let experience = rng.range_u32(experience.0, experience.1);
    let skill = table.skill_for(rng.next_f64());
    let salary = roll_salary(role, rng);
    StaffCandidate {
        name,
        role_id: role.id.clone(),
        title: role.title.clone(),
        category: role.category,
        skill,
        experience,
        salary,
    }
}

/// `count` applicants for `role`, with 3-17 years of experience.
pub fn generate_candidates(
    role: &StaffRoleSpec,
    count: usize,
    rng: &mut impl RandomValueProvider,
) -> Vec<StaffCandidate> {
    (0..count)
        .map(|_| roll_candidate(role, (3, 17), HIRING_SKILL_TABLE, rng))
        .collect()
}

/// Opening staff: one or two members per role, capped at `max_initial_staff`.
pub fn generate_initial_staff(
    config: &GameConfig,
    ids: &mut IdSequence,
    rng: &mut impl RandomValueProvider,
) -> Vec<StaffMember> {
    let cap = config.settings.max_initial_staff;
    let mut staff = Vec::new();
    for role in &config.staff_roles {
        let count = if rng.next_f64() > DOUBLE_STAFFED_CHANCE { 1 } else { 2 };
        for _ in 0..count {
            if staff.len() >= cap {
                break;
            }
            let candidate = roll_candidate(role, (5, 14), INITIAL_SKILL_TABLE, rng);
            staff.push(candidate.into_member(ids.next_id()));
        }
    }
    log::debug!("Generated {} initial staff members", staff.len());
    staff
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_logic::constants::StaffCategory;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_skill_tables() {
        assert_eq!(HIRING_SKILL_TABLE.skill_for(0.05), 5);
        assert_eq!(HIRING_SKILL_TABLE.skill_for(0.10), 4);
        assert_eq!(HIRING_SKILL_TABLE.skill_for(0.45), 3);
        assert_eq!(HIRING_SKILL_TABLE.skill_for(0.60), 2);
        assert_eq!(INITIAL_SKILL_TABLE.skill_for(0.07), 4);
        assert_eq!(INITIAL_SKILL_TABLE.skill_for(0.99), 2);
    }

    #[test]
    fn test_salary_within_range() {
        let config = GameConfig::default();
        let mut rng = SeededRandom::new(1);
        for role in &config.staff_roles {
            for _ in 0..50 {
                let salary = roll_salary(role, &mut rng);
                assert!(salary >= role.salary_min && salary < role.salary_max);
            }
        }
    }

    #[test]
    fn test_candidates() {
        let config = GameConfig::default();
        let role = config.role(StaffCategory::Coaches, "head_coach").unwrap();
        let candidates = generate_candidates(role, 3, &mut SeededRandom::new(5));
        assert_eq!(candidates.len(), 3);
        for c in &candidates {
            assert_eq!(c.category, StaffCategory::Coaches);
            assert!((3..=17).contains(&c.experience));
            assert!((2..=5).contains(&c.skill));
        }
    }

    #[test]
    fn test_initial_staff_single_per_role() {
        // 0.5 > 0.3 so every role gets exactly one member.
        let config = GameConfig::default();
        let staff =
            generate_initial_staff(&config, &mut IdSequence::default(), &mut ScriptedRandom::constant(0.5));
        assert_eq!(staff.len(), config.staff_roles.len());
        assert!(staff.iter().all(|s| s.skill == 2 && !s.is_busy));
    }

    #[test]
    fn test_initial_staff_capped() {
        // 0.1 doubles every role: 22 would be generated without the cap.
        let config = GameConfig::default();
        let staff =
            generate_initial_staff(&config, &mut IdSequence::default(), &mut ScriptedRandom::constant(0.1));
        assert_eq!(staff.len(), config.settings.max_initial_staff);
        assert!(staff.iter().all(|s| s.skill == 4));
    }
}
