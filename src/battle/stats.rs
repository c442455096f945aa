use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Nature, StatType};

/// Multipliers for stages -6..=+6, in thousandths.
const STAGE_MULTIPLIERS_PER_MILLE: [u32; 13] = [
    250, 285, 330, 400, 500, 660, 1000, 1500, 2000, 2500, 3000, 3500, 4000,
];

fn stat_core(base: u8, iv: u8, ev: u8, level: u8) -> u32 {
    (2 * u32::from(base) + u32::from(iv) + u32::from(ev) / 4) * u32::from(level) / 100
}

/// HP = floor((2*base + iv + floor(ev/4)) * level / 100) + level + 10
pub fn hp_stat(base: u8, iv: u8, ev: u8, level: u8) -> u16 {
    let hp = stat_core(base, iv, ev, level) + u32::from(level) + 10;
    hp.min(u32::from(u16::MAX)) as u16
}

/// Any non-HP stat: floor((floor((2*base + iv + floor(ev/4)) * level / 100) + 5) * nature)
pub fn other_stat(base: u8, iv: u8, ev: u8, level: u8, nature_percent: u32) -> u16 {
    let stat = (stat_core(base, iv, ev, level) + 5) * nature_percent / 100;
    stat.min(u32::from(u16::MAX)) as u16
}

/// Index of a stat in HP, ATK, DEF, SP.ATK, SP.DEF, SPD ordered blocks.
/// Accuracy has no stored stat.
pub fn stat_index(stat: StatType) -> Option<usize> {
    match stat {
        StatType::Attack => Some(1),
        StatType::Defense => Some(2),
        StatType::SpecialAttack => Some(3),
        StatType::SpecialDefense => Some(4),
        StatType::Speed => Some(5),
        StatType::Accuracy => None,
    }
}

/// Stats at creation time: HP first, then the five nature-modified stats.
pub fn calculate_stats(
    base_stats: [u8; 6],
    ivs: [u8; 6],
    evs: [u8; 6],
    level: u8,
    nature: Nature,
) -> [u16; 6] {
    let mut stats = [0u16; 6];
    stats[0] = hp_stat(base_stats[0], ivs[0], evs[0], level);
    for stat in [
        StatType::Attack,
        StatType::Defense,
        StatType::SpecialAttack,
        StatType::SpecialDefense,
        StatType::Speed,
    ] {
        if let Some(i) = stat_index(stat) {
            stats[i] = other_stat(
                base_stats[i],
                ivs[i],
                evs[i],
                level,
                nature.modifier_percent(stat),
            );
        }
    }
    stats
}

pub fn stage_multiplier_per_mille(stage: i8) -> u32 {
    let clamped = stage.clamp(-6, 6);
    STAGE_MULTIPLIERS_PER_MILLE[(clamped + 6) as usize]
}

/// Apply stat stage multipliers from the stage table, flooring the result.
pub fn apply_stat_stage_multiplier(stat: u16, stage: i8) -> u16 {
    let modified = u32::from(stat) * stage_multiplier_per_mille(stage) / 1000;
    modified.min(u32::from(u16::MAX)) as u16
}

/// Accuracy stages scale hit chance by 3/(3-n) below zero and (3+n)/3 above.
pub fn accuracy_stage_fraction(stage: i8) -> (u32, u32) {
    let clamped = i32::from(stage.clamp(-6, 6));
    if clamped < 0 {
        (3, (3 - clamped) as u32)
    } else {
        ((3 + clamped) as u32, 3)
    }
}

/// Hit chance in percent for a move of `base_accuracy` under an accuracy stage.
pub fn effective_accuracy(base_accuracy: u8, stage: i8) -> u32 {
    let (numerator, denominator) = accuracy_stage_fraction(stage);
    u32::from(base_accuracy) * numerator / denominator
}

/// Calculate effective speed including stat stages and paralysis
pub fn effective_speed(pokemon: &PokemonInst) -> u16 {
    let speed = pokemon.modified_stat(StatType::Speed);
    if matches!(pokemon.status(), StatusCondition::Paralysed) {
        speed / 2
    } else {
        speed
    }
}
