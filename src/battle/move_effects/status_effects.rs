use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::{VolatileKind, VolatileStatus};
use crate::battle::rng::BattleRng;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Chance, PokemonType, StatusEffect, VolatileEffect};

/// Sleep lasts 1..=3 of the sleeper's own turns.
const SLEEP_TURNS_MIN: u32 = 1;
const SLEEP_TURNS_MAX: u32 = 3;

/// Rolls a secondary effect's chance. `Always` draws nothing.
pub(super) fn chance_succeeds(chance: Chance, rng: &mut BattleRng) -> bool {
    match chance {
        Chance::Always => true,
        Chance::OneIn(die) => rng.roll(die) == 1,
        Chance::Percent(percent) => rng.percent_chance(i32::from(percent)),
    }
}

fn is_immune(status: StatusEffect, pokemon: &PokemonInst) -> bool {
    match status {
        StatusEffect::Burn => pokemon.has_type(PokemonType::Fire),
        StatusEffect::Paralysis => pokemon.has_type(PokemonType::Electric),
        StatusEffect::Freeze => pokemon.has_type(PokemonType::Ice),
        StatusEffect::Poison | StatusEffect::BadPoison => {
            pokemon.has_type(PokemonType::Poison) || pokemon.has_type(PokemonType::Steel)
        }
        StatusEffect::Sleep => false,
    }
}

fn matches_effect(status: StatusCondition, effect: StatusEffect) -> bool {
    matches!(
        (status, effect),
        (StatusCondition::Paralysed, StatusEffect::Paralysis)
            | (StatusCondition::Poisoned, StatusEffect::Poison)
            | (StatusCondition::BadlyPoisoned { .. }, StatusEffect::BadPoison)
            | (StatusCondition::Burned, StatusEffect::Burn)
            | (StatusCondition::Frozen, StatusEffect::Freeze)
            | (StatusCondition::Asleep { .. }, StatusEffect::Sleep)
    )
}

/// Inflicts a persistent status on a healthy target. A target that already
/// has a status, or whose type shrugs it off, is left alone without a roll.
pub(super) fn apply_status_effect(
    status: StatusEffect,
    chance: Chance,
    target: PlayerTarget,
    pokemon: &PokemonInst,
    rng: &mut BattleRng,
) -> Vec<BattleCommand> {
    if !pokemon.status().is_healthy() || is_immune(status, pokemon) {
        return Vec::new();
    }
    if !chance_succeeds(chance, rng) {
        return Vec::new();
    }

    let condition = match status {
        StatusEffect::Paralysis => StatusCondition::Paralysed,
        StatusEffect::Poison => StatusCondition::Poisoned,
        StatusEffect::BadPoison => StatusCondition::BadlyPoisoned { counter: 1 },
        StatusEffect::Burn => StatusCondition::Burned,
        StatusEffect::Freeze => StatusCondition::Frozen,
        StatusEffect::Sleep => StatusCondition::Asleep {
            turns_remaining: rng.uniform_between(SLEEP_TURNS_MIN, SLEEP_TURNS_MAX) as u8,
        },
    };
    vec![BattleCommand::SetPokemonStatus {
        target,
        status: condition,
    }]
}

pub(super) fn apply_cure_status_effect(
    status: StatusEffect,
    target: PlayerTarget,
    pokemon: &PokemonInst,
) -> Vec<BattleCommand> {
    if !matches_effect(pokemon.status(), status) {
        return Vec::new();
    }
    vec![BattleCommand::SetPokemonStatus {
        target,
        status: StatusCondition::Healthy,
    }]
}

pub(super) fn apply_volatile_effect(
    volatile: VolatileEffect,
    chance: Chance,
    target: PlayerTarget,
    pokemon: &PokemonInst,
    rng: &mut BattleRng,
) -> Vec<BattleCommand> {
    // Confusion does not stack or refresh.
    if volatile == VolatileEffect::Confusion
        && pokemon.volatile_status.contains_kind(VolatileKind::Confused)
    {
        return Vec::new();
    }
    if !chance_succeeds(chance, rng) {
        return Vec::new();
    }

    let status = match volatile {
        VolatileEffect::Confusion => VolatileStatus::Confused {
            turns_remaining: rng.confusion_duration() as u8,
        },
        VolatileEffect::Flinch => VolatileStatus::Flinch,
        VolatileEffect::Protection => VolatileStatus::Protected,
        VolatileEffect::Recharge => VolatileStatus::MustRecharge,
    };
    vec![BattleCommand::AddVolatile { target, status }]
}
