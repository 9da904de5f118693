//! Academy player generation.

use academy_logic::config::{GameConfig, PositionSpec, TeamSpec};
use academy_logic::economy::player_value;

use crate::components::{Attributes, Player};
use crate::generation::names::{generate_name, NamePool};
use crate::random::RandomValueProvider;
use crate::state::IdSequence;

/// One attribute score from a player's base roll and a per-attribute noise
/// factor in `[0.8, 1.2]`.
pub fn attribute_value(base: f64, age: u32, potential: u8, noise: f64) -> u32 {
    let age_bonus = (age as f64 - 10.0) * 1.5;
    let potential_bonus = potential as f64 * 5.0;
    (base + age_bonus + potential_bonus * noise).round().clamp(10.0, 100.0) as u32
}

/// Generate one player for `team`.
pub fn generate_player(
    id: u32,
    team: &TeamSpec,
    positions: &[PositionSpec],
    rng: &mut impl RandomValueProvider,
) -> Player {
    let name = generate_name(NamePool::Youth, rng);
    let age = team.age.saturating_sub(rng.range_u32(0, 2));
    let position = positions
        .get(rng.index(positions.len()))
        .map(|p| p.code.clone())
        .unwrap_or_default();
    let potential = rng.range_u32(1, 5) as u8;

    let base = rng.range_f64(20.0, 50.0);
    let mut roll = || attribute_value(base, age, potential, rng.range_f64(0.8, 1.2));
    let attributes = Attributes {
        technical: roll(),
        physical: roll(),
        tactical: roll(),
        mental: roll(),
    };
    let value = player_value(age, potential, attributes.as_array(), rng.range_f64(0.8, 1.2));

    Player {
        id,
        name,
        age,
        position,
        team: team.id.clone(),
        potential,
        attributes,
        value,
    }
}

/// Generate the full opening roster: `player_count` players for every team.
pub fn generate_players(
    config: &GameConfig,
    ids: &mut IdSequence,
    rng: &mut impl RandomValueProvider,
) -> Vec<Player> {
    let mut players = Vec::new();
    for team in &config.teams {
        for _ in 0..team.player_count {
            players.push(generate_player(ids.next_id(), team, &config.positions, rng));
        }
    }
    log::debug!("Generated {} players", players.len());
    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_attribute_value_formula() {
        // 30 + (15 - 10) * 1.5 + 3 * 5 * 1.0 = 52.5, rounds to 53
        assert_eq!(attribute_value(30.0, 15, 3, 1.0), 53);
    }

    #[test]
    fn test_attribute_value_clamped() {
        assert_eq!(attribute_value(20.0, 8, 1, 0.8), 21);
        assert_eq!(attribute_value(0.0, 5, 1, 0.8), 10);
        assert_eq!(attribute_value(50.0, 21, 5, 1.2), 97);
        assert_eq!(attribute_value(50.0, 30, 5, 1.2), 100);
    }

    #[test]
    fn test_generate_players_counts_and_bounds() {
        let config = GameConfig::default();
        let mut ids = IdSequence::starting_at(1);
        let mut rng = SeededRandom::new(42);
        let players = generate_players(&config, &mut ids, &mut rng);

        let expected: u32 = config.teams.iter().map(|t| t.player_count).sum();
        assert_eq!(players.len(), expected as usize);
        for p in &players {
            let team = config.team(&p.team).unwrap();
            assert!(p.age <= team.age && p.age + 2 >= team.age);
            assert!((1..=5).contains(&p.potential));
            for a in p.attributes.as_array() {
                assert!((10..=100).contains(&a));
            }
            assert_eq!(p.value % 100, 0);
            assert!(p.value > 0);
        }
    }

    #[test]
    fn test_generate_player_scripted() {
        let config = GameConfig::default();
        let team = config.team("u17").unwrap();
        // All rolls 0.5: age offset 1, potential 3, base 35, noise 1.0.
        let mut rng = ScriptedRandom::constant(0.5);
        let p = generate_player(9, team, &config.positions, &mut rng);
        assert_eq!(p.age, 16);
        assert_eq!(p.potential, 3);
        // 35 + 9 + 15 = 59
        assert_eq!(p.attributes.as_array(), [59, 59, 59, 59]);
        // 5000 + 16000 + 30000 + 29500 = 80500
        assert_eq!(p.value, 80_500);
    }

    #[test]
    fn test_same_seed_same_roster() {
        let config = GameConfig::default();
        let a = generate_players(&config, &mut IdSequence::default(), &mut SeededRandom::new(9));
        let b = generate_players(&config, &mut IdSequence::default(), &mut SeededRandom::new(9));
        assert_eq!(a, b);
    }
}
