//! Name generation utilities

use crate::random::RandomValueProvider;

/// Which name pool to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePool {
    /// Academy players and scouted prospects.
    Youth,
    /// Coaches, scouts and medical staff.
    Staff,
}

/// Generate a random full name from `pool`.
pub fn generate_name(pool: NamePool, rng: &mut impl RandomValueProvider) -> String {
    let (given, family) = match pool {
        NamePool::Youth => (YOUTH_GIVEN_NAMES, YOUTH_FAMILY_NAMES),
        NamePool::Staff => (STAFF_GIVEN_NAMES, STAFF_FAMILY_NAMES),
    };
    let first = given[rng.index(given.len())];
    let last = family[rng.index(family.len())];
    format!("{} {}", first, last)
}

static YOUTH_GIVEN_NAMES: &[&str] = &[
    "Askar", "Arman", "Baurzhan", "Timur", "Yerlan", "Nurlan", "Daniyar", "Ruslan", "Alikhan",
    "Dias",
];

static YOUTH_FAMILY_NAMES: &[&str] = &[
    "Zhumabekov",
    "Orazov",
    "Aliyev",
    "Nurpeisov",
    "Suleimenov",
    "Baitasov",
    "Akhmetov",
    "Kassymov",
    "Zhanibekov",
    "Aitzhanov",
];

static STAFF_GIVEN_NAMES: &[&str] = &[
    "Alexander", "Sergey", "Dmitry", "Andrey", "Maxim", "Ivan", "Artem", "Nikolai", "Mikhail",
    "Yegor",
];

static STAFF_FAMILY_NAMES: &[&str] = &[
    "Ivanov", "Smirnov", "Kuznetsov", "Popov", "Vasiliev", "Petrov", "Sokolov", "Mikhailov",
    "Novikov", "Fedorov",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_generate_name_has_two_parts() {
        let mut rng = SeededRandom::new(3);
        for pool in [NamePool::Youth, NamePool::Staff] {
            let name = generate_name(pool, &mut rng);
            assert_eq!(name.split(' ').count(), 2);
        }
    }

    #[test]
    fn test_scripted_name() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.95]);
        assert_eq!(generate_name(NamePool::Youth, &mut rng), "Askar Aitzhanov");
    }
}
