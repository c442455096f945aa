use crate::{PokemonType, Terrain, Weather};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Who receives a move's bonus effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    Attacker,
    Defender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatType {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::SpecialAttack => "Special Attack",
            StatType::SpecialDefense => "Special Defense",
            StatType::Speed => "Speed",
            StatType::Accuracy => "accuracy",
        };
        write!(f, "{}", display_name)
    }
}

/// Dice the engine knows how to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    D3,
    D5,
    D6,
    D10,
}

impl Die {
    pub fn faces(self) -> u32 {
        match self {
            Die::D3 => 3,
            Die::D5 => 5,
            Die::D6 => 6,
            Die::D10 => 10,
        }
    }
}

/// Probability gate for a secondary effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chance {
    Always,
    /// Triggers when the die lands on 1.
    OneIn(Die),
    Percent(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    Paralysis,
    Poison,
    BadPoison,
    Burn,
    Freeze,
    Sleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatileEffect {
    Confusion,
    Flinch,
    Protection,
    Recharge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatType,
    pub stages: i8,
}

/// When a two-turn move may skip its charging turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeCondition {
    WeatherIs(Vec<Weather>),
    Never,
}

impl ChargeCondition {
    pub fn is_met(&self, weather: Weather) -> bool {
        match self {
            ChargeCondition::WeatherIs(allowed) => allowed.contains(&weather),
            ChargeCondition::Never => false,
        }
    }
}

/// Secondary behaviour attached to a move name. Data only; the battle crate
/// interprets each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusEffect {
    StatChange(Vec<StatChange>),
    InflictStatus { status: StatusEffect, chance: Chance },
    CureStatus(StatusEffect),
    ApplyVolatile { volatile: VolatileEffect, chance: Chance },
    /// Restores a percentage of the target's max HP.
    HealPercent(u8),
    /// Restores a percentage of the damage the move just dealt.
    DrainPercent(u8),
    SetWeather(Weather),
    SetTerrain(Terrain),
    MultiHit { min_hits: u8, max_hits: u8 },
    Charge { condition: ChargeCondition },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u16,
    /// `None` means the move cannot miss.
    #[serde(default)]
    pub accuracy: Option<u8>,
    pub base_pp: u8,
    pub max_pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub breaks_protect: bool,
    #[serde(default)]
    pub effect_target: Option<EffectTarget>,
    #[serde(default)]
    pub bonus_effect: Option<BonusEffect>,
}

impl MoveData {
    /// Zero-power typeless status move standing in for a name the data
    /// repository does not know.
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            move_type: PokemonType::Typeless,
            category: MoveCategory::Status,
            power: 0,
            accuracy: None,
            base_pp: 1,
            max_pp: 1,
            priority: 0,
            breaks_protect: false,
            effect_target: None,
            bonus_effect: None,
        }
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power > 0
    }

    /// Copy of this move with its bonus effect removed, used for the
    /// follow-up hits of multi-hit moves and for releasing a charged move.
    pub fn without_bonus_effect(&self) -> Self {
        Self {
            bonus_effect: None,
            effect_target: None,
            ..self.clone()
        }
    }

    pub fn is_multi_hit(&self) -> bool {
        matches!(self.bonus_effect, Some(BonusEffect::MultiHit { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solar_beam() -> MoveData {
        MoveData {
            name: "Solar Beam".to_string(),
            move_type: PokemonType::Grass,
            category: MoveCategory::Special,
            power: 120,
            accuracy: Some(100),
            base_pp: 10,
            max_pp: 16,
            priority: 0,
            breaks_protect: false,
            effect_target: Some(EffectTarget::Attacker),
            bonus_effect: Some(BonusEffect::Charge {
                condition: ChargeCondition::WeatherIs(vec![
                    Weather::HarshSunlight,
                    Weather::ExtremelyHarshSunlight,
                ]),
            }),
        }
    }

    #[test]
    fn test_placeholder_is_harmless() {
        let placeholder = MoveData::placeholder("Unknown Move");
        assert_eq!(placeholder.name, "Unknown Move");
        assert_eq!(placeholder.power, 0);
        assert_eq!(placeholder.category, MoveCategory::Status);
        assert!(!placeholder.is_damaging());
    }

    #[test]
    fn test_stripping_bonus_keeps_the_attack() {
        let stripped = solar_beam().without_bonus_effect();
        assert_eq!(stripped.bonus_effect, None);
        assert_eq!(stripped.power, 120);
        assert_eq!(stripped.name, "Solar Beam");
    }

    #[test]
    fn test_charge_condition() {
        let Some(BonusEffect::Charge { condition }) = solar_beam().bonus_effect else {
            panic!("Solar Beam should charge");
        };
        assert!(condition.is_met(Weather::HarshSunlight));
        assert!(!condition.is_met(Weather::Rain));
        assert!(!ChargeCondition::Never.is_met(Weather::HarshSunlight));
    }

    #[test]
    fn test_move_data_survives_postcard() {
        let bytes = postcard::to_allocvec(&solar_beam()).expect("encode");
        let decoded: MoveData = postcard::from_bytes(&bytes).expect("decode");
        assert_eq!(decoded, solar_beam());
    }
}
