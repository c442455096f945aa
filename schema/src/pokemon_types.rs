use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Hash,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    Typeless,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl PokemonType {
    /// Calculate type effectiveness multiplier for attacking type vs defending type
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f64 {
        use PokemonType::*;

        match (attacking, defending) {
            (Typeless, _) | (_, Typeless) => 1.0,

            // Normal
            (Normal, Ghost) => 0.0,
            (Normal, Rock) | (Normal, Steel) => 0.5,
            (Normal, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, _) => 1.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, _) => 1.0,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon)
            | (Grass, Steel) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, _) => 1.0,

            // Ice
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
            (Ice, _) => 1.0,

            // Fighting
            (Fighting, Poison)
            | (Fighting, Flying)
            | (Fighting, Psychic)
            | (Fighting, Bug)
            | (Fighting, Fairy) => 0.5,
            (Fighting, Ghost) => 0.0,
            (Fighting, Normal)
            | (Fighting, Ice)
            | (Fighting, Rock)
            | (Fighting, Dark)
            | (Fighting, Steel) => 2.0,
            (Fighting, _) => 1.0,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, Steel) => 0.0,
            (Poison, Grass) | (Poison, Fairy) => 2.0,
            (Poison, _) => 1.0,

            // Ground
            (Ground, Grass) | (Ground, Bug) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire)
            | (Ground, Electric)
            | (Ground, Poison)
            | (Ground, Rock)
            | (Ground, Steel) => 2.0,
            (Ground, _) => 1.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
            (Flying, _) => 1.0,

            // Psychic
            (Psychic, Psychic) | (Psychic, Steel) => 0.5,
            (Psychic, Dark) => 0.0,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, _) => 1.0,

            // Bug
            (Bug, Fire)
            | (Bug, Fighting)
            | (Bug, Poison)
            | (Bug, Flying)
            | (Bug, Ghost)
            | (Bug, Steel)
            | (Bug, Fairy) => 0.5,
            (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
            (Bug, _) => 1.0,

            // Rock
            (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
            (Rock, _) => 1.0,

            // Ghost
            (Ghost, Normal) => 0.0,
            (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
            (Ghost, Dark) => 0.5,
            (Ghost, _) => 1.0,

            // Dragon
            (Dragon, Dragon) => 2.0,
            (Dragon, Steel) => 0.5,
            (Dragon, Fairy) => 0.0,
            (Dragon, _) => 1.0,

            // Dark
            (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
            (Dark, Psychic) | (Dark, Ghost) => 2.0,
            (Dark, _) => 1.0,

            // Steel
            (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
            (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
            (Steel, _) => 1.0,

            // Fairy
            (Fairy, Fire) | (Fairy, Poison) | (Fairy, Steel) => 0.5,
            (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
            (Fairy, _) => 1.0,
        }
    }

    /// Combined multiplier against every type the defender carries.
    pub fn effectiveness_against(self, defending: &[PokemonType]) -> f64 {
        defending
            .iter()
            .map(|defending_type| Self::type_effectiveness(self, *defending_type))
            .product()
    }

    pub fn is_immune(attacking: PokemonType, defending: PokemonType) -> bool {
        Self::type_effectiveness(attacking, defending) == 0.0
    }
}

/// Categorical result of a type matchup, after both defending types are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Effectiveness {
    Normal,
    SuperEffective,
    NotVeryEffective,
    NotEffective,
}

impl Effectiveness {
    /// Re-buckets a combined multiplier. Dual types can produce 0.25 and 4.0,
    /// which collapse into the single-type buckets.
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NotEffective
        } else if multiplier == 0.25 || multiplier == 0.5 {
            Effectiveness::NotVeryEffective
        } else if multiplier == 2.0 || multiplier == 4.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Normal
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Effectiveness::Normal => "It's normally effective.",
            Effectiveness::SuperEffective => "It's super effective!",
            Effectiveness::NotVeryEffective => "It's not very effective...",
            Effectiveness::NotEffective => "It had no effect!",
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(PokemonType::Grass, &[PokemonType::Electric], Effectiveness::Normal)]
    #[case(PokemonType::Electric, &[PokemonType::Grass, PokemonType::Poison], Effectiveness::NotVeryEffective)]
    #[case(PokemonType::Fire, &[PokemonType::Grass, PokemonType::Bug], Effectiveness::SuperEffective)]
    #[case(PokemonType::Grass, &[PokemonType::Fire, PokemonType::Flying], Effectiveness::NotVeryEffective)]
    #[case(PokemonType::Ground, &[PokemonType::Flying, PokemonType::Normal], Effectiveness::NotEffective)]
    #[case(PokemonType::Water, &[PokemonType::Fire, PokemonType::Grass], Effectiveness::Normal)]
    #[case(PokemonType::Ice, &[PokemonType::Dragon, PokemonType::Ground], Effectiveness::SuperEffective)]
    fn test_combined_effectiveness_buckets(
        #[case] attacking: PokemonType,
        #[case] defending: &[PokemonType],
        #[case] expected: Effectiveness,
    ) {
        assert_eq!(
            Effectiveness::from_multiplier(attacking.effectiveness_against(defending)),
            expected
        );
    }

    #[test]
    fn test_quad_multipliers_are_rebucketed() {
        assert_eq!(
            PokemonType::Fire.effectiveness_against(&[PokemonType::Grass, PokemonType::Bug]),
            4.0
        );
        assert_eq!(
            PokemonType::Grass.effectiveness_against(&[PokemonType::Fire, PokemonType::Flying]),
            0.25
        );
        assert_eq!(Effectiveness::from_multiplier(4.0), Effectiveness::SuperEffective);
        assert_eq!(Effectiveness::from_multiplier(0.25), Effectiveness::NotVeryEffective);
    }

    #[test]
    fn test_typeless_is_always_normal() {
        for defending in PokemonType::iter() {
            assert_eq!(
                PokemonType::type_effectiveness(PokemonType::Typeless, defending),
                1.0,
                "Typeless vs {} should be neutral",
                defending
            );
        }
    }

    #[test]
    fn test_immunities() {
        assert!(PokemonType::is_immune(PokemonType::Normal, PokemonType::Ghost));
        assert!(PokemonType::is_immune(PokemonType::Electric, PokemonType::Ground));
        assert!(PokemonType::is_immune(PokemonType::Dragon, PokemonType::Fairy));
        assert!(PokemonType::is_immune(PokemonType::Psychic, PokemonType::Dark));
        assert!(!PokemonType::is_immune(PokemonType::Fire, PokemonType::Water));
    }

    #[test]
    fn test_type_parses_case_insensitively() {
        assert_eq!("grass".parse::<PokemonType>(), Ok(PokemonType::Grass));
        assert_eq!("FAIRY".parse::<PokemonType>(), Ok(PokemonType::Fairy));
        assert!("Sound".parse::<PokemonType>().is_err());
    }
}
