//! Scouting prospect generation.
//!
//! The number of prospects a mission finds scales with the region's talent
//! rating, the mission length, how many scouts went and how good they are.
//! Prospect quality uses a cumulative tier table whose cutoffs are scaled by a
//! quality threshold derived from the mission length and region talent.

use academy_logic::config::{PositionSpec, RegionSpec};
use academy_logic::constants::ScoutingDuration;

use crate::components::Prospect;
use crate::generation::names::{generate_name, NamePool};
use crate::random::RandomValueProvider;
use crate::state::IdSequence;

/// Base cumulative cutoffs for potential tiers 5 down to 2. Tier 1 is the rest.
pub const BASE_TIER_CUTOFFS: [(u8, f64); 4] = [(5, 0.05), (4, 0.15), (3, 0.40), (2, 0.70)];

/// Prospects are between 6 and 18 years old.
const MIN_PROSPECT_AGE: u32 = 6;
const MAX_PROSPECT_AGE: u32 = 18;

pub fn quality_threshold(duration: ScoutingDuration, talent_rating: u32) -> f64 {
    0.5 + 0.1 * (duration.weeks() as f64 - 1.0) + 0.05 * (talent_rating as f64 - 1.0)
}

/// Potential tier for a uniform `roll` under quality threshold `quality`.
pub fn potential_tier(roll: f64, quality: f64) -> u8 {
    BASE_TIER_CUTOFFS
        .iter()
        .find(|(_, cutoff)| roll < cutoff * quality)
        .map_or(1, |(tier, _)| *tier)
}

pub fn scout_count_multiplier(scout_count: usize) -> f64 {
    1.0 + 0.3 * (scout_count.max(1) as f64 - 1.0)
}

pub fn skill_multiplier(average_scout_skill: f64) -> f64 {
    0.7 + average_scout_skill * 0.1
}

/// Number of prospects a mission finds; `noise` is expected in `[0.8, 1.2]`.
pub fn prospect_count(
    talent_rating: u32,
    duration: ScoutingDuration,
    scout_count: usize,
    average_scout_skill: f64,
    noise: f64,
) -> u32 {
    let expected = talent_rating as f64
        * 0.5
        * duration.multiplier()
        * scout_count_multiplier(scout_count)
        * skill_multiplier(average_scout_skill)
        * noise;
    expected.floor().max(0.0) as u32
}

/// What a resolving mission feeds into generation.
#[derive(Debug, Clone, Copy)]
pub struct ScoutingInput<'a> {
    pub region: &'a RegionSpec,
    pub duration: ScoutingDuration,
    pub scout_count: usize,
    pub average_scout_skill: f64,
}

/// Generate a mission's prospects, best potential first.
pub fn generate_prospects(
    input: ScoutingInput<'_>,
    positions: &[PositionSpec],
    ids: &mut IdSequence,
    rng: &mut impl RandomValueProvider,
) -> Vec<Prospect> {
    let count = prospect_count(
        input.region.talent_rating,
        input.duration,
        input.scout_count,
        input.average_scout_skill,
        rng.range_f64(0.8, 1.2),
    );
    let quality = quality_threshold(input.duration, input.region.talent_rating);
    log::debug!(
        "Scouting {}: {} prospects, quality threshold {:.2}",
        input.region.id,
        count,
        quality
    );

    let mut prospects: Vec<Prospect> = (0..count)
        .map(|_| {
            let name = generate_name(NamePool::Youth, rng);
            let age = rng.range_u32(MIN_PROSPECT_AGE, MAX_PROSPECT_AGE);
            let position = positions
                .get(rng.index(positions.len()))
                .map(|p| p.code.clone())
                .unwrap_or_default();
            let potential = potential_tier(rng.next_f64(), quality);
            Prospect {
                id: ids.next_id(),
                name,
                age,
                position,
                potential,
                region: input.region.id.clone(),
            }
        })
        .collect();
    prospects.sort_by(|a, b| b.potential.cmp(&a.potential));
    prospects
}
