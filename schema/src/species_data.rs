use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// Stats in HP, ATK, DEF, SP.ATK, SP.DEF, SPD order.
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

/// Abilities the engine knows by name. Only a couple of them carry battle
/// behaviour; the rest are recorded so species data can be validated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "title_case", ascii_case_insensitive)]
pub enum Ability {
    Overgrow,
    Chlorophyll,
    Blaze,
    SolarPower,
    Torrent,
    RainDish,
    Static,
    LightningRod,
    Protean,
    Adaptability,
    Download,
    Analytic,
    CursedBody,
    Sturdy,
    RockHead,
    KeenEye,
    TangledFeet,
    Levitate,
    Synchronize,
    InnerFocus,
}

impl Ability {
    /// Type-mimicry: the holder becomes the type of the move it is about to use.
    pub fn changes_type_before_attacking(self) -> bool {
        matches!(self, Ability::Protean)
    }

    pub fn stab_multiplier(self) -> StabBonus {
        match self {
            Ability::Adaptability => StabBonus::Double,
            _ => StabBonus::Standard,
        }
    }
}

/// Same-type attack bonus granted to a holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabBonus {
    /// x1.5
    Standard,
    /// x2.0
    Double,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub pokedex_number: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub abilities: Vec<Ability>,
}

impl PokemonSpecies {
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }
}

impl fmt::Display for PokemonSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pokémon Species: {}", self.name)
    }
}
