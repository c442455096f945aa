//! Name-keyed table of move bonus effects.
//!
//! Reference data only describes a move's base numbers. What a move does on
//! top of its damage lives here, keyed by the move's display name, together
//! with a separate table saying which combatant receives the effect.

use schema::{
    BonusEffect, Chance, ChargeCondition, Die, EffectTarget, MoveData, StatChange, StatType,
    StatusEffect, Terrain, VolatileEffect, Weather,
};

static EFFECT_TARGETS: phf::Map<&'static str, EffectTarget> = phf::phf_map! {
    "Bullet Seed" => EffectTarget::Defender,
    "Calm Mind" => EffectTarget::Attacker,
    "Confuse Ray" => EffectTarget::Defender,
    "Dark Pulse" => EffectTarget::Defender,
    "Double Slap" => EffectTarget::Defender,
    "Ember" => EffectTarget::Defender,
    "Extrasensory" => EffectTarget::Defender,
    "Flamethrower" => EffectTarget::Defender,
    "Giga Drain" => EffectTarget::Attacker,
    "Growl" => EffectTarget::Defender,
    "Hyper Beam" => EffectTarget::Attacker,
    "Hypnosis" => EffectTarget::Defender,
    "Ice Beam" => EffectTarget::Defender,
    "Protect" => EffectTarget::Attacker,
    "Recover" => EffectTarget::Attacker,
    "Sludge Bomb" => EffectTarget::Defender,
    "Solar Beam" => EffectTarget::Attacker,
    "Sparkling Aria" => EffectTarget::Defender,
    "Swords Dance" => EffectTarget::Attacker,
    "Thunder Wave" => EffectTarget::Defender,
    "Thunderbolt" => EffectTarget::Defender,
    "Toxic" => EffectTarget::Defender,
    "Will-O-Wisp" => EffectTarget::Defender,
};

/// Who receives the bonus effect of the named move. `None` means the effect
/// needs no combatant (weather, terrain) or the move has no effect.
pub fn effect_target_for(name: &str) -> Option<EffectTarget> {
    EFFECT_TARGETS.get(name).copied()
}

/// The bonus effect registered for the named move, if any.
pub fn bonus_effect_for(name: &str) -> Option<BonusEffect> {
    let effect = match name {
        "Bullet Seed" => BonusEffect::MultiHit {
            min_hits: 2,
            max_hits: 5,
        },
        "Double Slap" => BonusEffect::MultiHit {
            min_hits: 2,
            max_hits: 2,
        },
        "Calm Mind" => BonusEffect::StatChange(vec![
            StatChange {
                stat: StatType::SpecialAttack,
                stages: 1,
            },
            StatChange {
                stat: StatType::SpecialDefense,
                stages: 1,
            },
        ]),
        "Growl" => BonusEffect::StatChange(vec![StatChange {
            stat: StatType::Attack,
            stages: -1,
        }]),
        "Swords Dance" => BonusEffect::StatChange(vec![StatChange {
            stat: StatType::Attack,
            stages: 2,
        }]),
        "Confuse Ray" => BonusEffect::ApplyVolatile {
            volatile: VolatileEffect::Confusion,
            chance: Chance::Always,
        },
        "Dark Pulse" => BonusEffect::ApplyVolatile {
            volatile: VolatileEffect::Flinch,
            chance: Chance::OneIn(Die::D5),
        },
        "Extrasensory" => BonusEffect::ApplyVolatile {
            volatile: VolatileEffect::Flinch,
            chance: Chance::OneIn(Die::D10),
        },
        "Hyper Beam" => BonusEffect::ApplyVolatile {
            volatile: VolatileEffect::Recharge,
            chance: Chance::Always,
        },
        "Protect" => BonusEffect::ApplyVolatile {
            volatile: VolatileEffect::Protection,
            chance: Chance::Always,
        },
        "Thunderbolt" => BonusEffect::InflictStatus {
            status: StatusEffect::Paralysis,
            chance: Chance::OneIn(Die::D6),
        },
        "Thunder Wave" => BonusEffect::InflictStatus {
            status: StatusEffect::Paralysis,
            chance: Chance::Always,
        },
        "Ice Beam" => BonusEffect::InflictStatus {
            status: StatusEffect::Freeze,
            chance: Chance::OneIn(Die::D10),
        },
        "Ember" | "Flamethrower" => BonusEffect::InflictStatus {
            status: StatusEffect::Burn,
            chance: Chance::Percent(10),
        },
        "Will-O-Wisp" => BonusEffect::InflictStatus {
            status: StatusEffect::Burn,
            chance: Chance::Always,
        },
        "Sludge Bomb" => BonusEffect::InflictStatus {
            status: StatusEffect::Poison,
            chance: Chance::Percent(30),
        },
        "Toxic" => BonusEffect::InflictStatus {
            status: StatusEffect::BadPoison,
            chance: Chance::Always,
        },
        "Hypnosis" => BonusEffect::InflictStatus {
            status: StatusEffect::Sleep,
            chance: Chance::Always,
        },
        "Sparkling Aria" => BonusEffect::CureStatus(StatusEffect::Burn),
        "Recover" => BonusEffect::HealPercent(50),
        "Giga Drain" => BonusEffect::DrainPercent(50),
        "Rain Dance" => BonusEffect::SetWeather(Weather::Rain),
        "Sunny Day" => BonusEffect::SetWeather(Weather::HarshSunlight),
        "Electric Terrain" => BonusEffect::SetTerrain(Terrain::Electric),
        "Grassy Terrain" => BonusEffect::SetTerrain(Terrain::Grassy),
        "Solar Beam" => BonusEffect::Charge {
            condition: ChargeCondition::WeatherIs(vec![
                Weather::HarshSunlight,
                Weather::ExtremelyHarshSunlight,
            ]),
        },
        _ => return None,
    };
    Some(effect)
}

/// Fills in the registry's bonus effect and target for a move loaded from
/// reference data. Entries already present on the data are kept.
pub fn attach_bonus_effect(mut move_data: MoveData) -> MoveData {
    if move_data.bonus_effect.is_none() {
        move_data.bonus_effect = bonus_effect_for(&move_data.name);
    }
    if move_data.effect_target.is_none() {
        move_data.effect_target = effect_target_for(&move_data.name);
    }
    move_data
}
