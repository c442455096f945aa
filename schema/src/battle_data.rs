use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weather {
    #[default]
    None,
    HarshSunlight,
    ExtremelyHarshSunlight,
    Rain,
    HeavyRain,
    Sandstorm,
    Hail,
}

impl Weather {
    pub fn is_sunny(self) -> bool {
        matches!(self, Weather::HarshSunlight | Weather::ExtremelyHarshSunlight)
    }

    pub fn is_rainy(self) -> bool {
        matches!(self, Weather::Rain | Weather::HeavyRain)
    }

    /// Damage percentage applied to a move of the given type.
    pub fn damage_modifier_percent(self, move_type: PokemonType) -> u32 {
        match (move_type, self) {
            (PokemonType::Fire, Weather::HeavyRain) => 0,
            (PokemonType::Fire, w) if w.is_sunny() => 150,
            (PokemonType::Fire, Weather::Rain) => 50,
            (PokemonType::Water, Weather::ExtremelyHarshSunlight) => 0,
            (PokemonType::Water, w) if w.is_rainy() => 150,
            (PokemonType::Water, Weather::HarshSunlight) => 50,
            _ => 100,
        }
    }

    /// Extreme weather voids moves of the opposing element entirely.
    pub fn blocks(self, move_type: PokemonType) -> bool {
        matches!(
            (move_type, self),
            (PokemonType::Fire, Weather::HeavyRain)
                | (PokemonType::Water, Weather::ExtremelyHarshSunlight)
        )
    }

    pub fn block_message(self, move_type: PokemonType) -> Option<String> {
        match (move_type, self) {
            (PokemonType::Fire, Weather::HeavyRain) => {
                Some("The Fire-type attack fizzled out in the heavy rain!".to_string())
            }
            (PokemonType::Water, Weather::ExtremelyHarshSunlight) => Some(
                "The Water-type attack evaporated in the extremely harsh sunlight!".to_string(),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Weather::None => "no active weather",
            Weather::HarshSunlight => "harsh sunlight",
            Weather::ExtremelyHarshSunlight => "extremely harsh sunlight",
            Weather::Rain => "rain",
            Weather::HeavyRain => "heavy rain",
            Weather::Sandstorm => "sandstorm",
            Weather::Hail => "hail",
        };
        write!(f, "{}", description)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Terrain {
    #[default]
    None,
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Terrain::None => "no terrain",
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        };
        write!(f, "{}", display_name)
    }
}
