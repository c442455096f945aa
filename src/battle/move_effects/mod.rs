// --- 1. DECLARE HELPER MODULES ---
mod field_effects;
pub mod registry;
mod special_effects;
mod stat_effects;
mod status_effects;

// --- 2. IMPORTS ---
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::rng::BattleRng;
use crate::battle::state::BattleState;
use crate::config::BattleConfig;
use crate::pokemon::PokemonInst;
use log::debug;
use schema::{BonusEffect, MoveData};

use self::{field_effects::*, special_effects::*, stat_effects::*, status_effects::*};

pub use registry::{attach_bonus_effect, bonus_effect_for, effect_target_for};

// --- 3. BATTLE-SPECIFIC DATA STRUCTURES ---

/// Who is attacking whom, with what, and how much damage the attack dealt.
#[derive(Debug, Clone)]
pub struct EffectContext {
    pub attacker: PlayerTarget,
    pub defender: PlayerTarget,
    pub attack: MoveData,
    pub damage_dealt: u16,
}

impl EffectContext {
    pub fn new(attacker: PlayerTarget, attack: MoveData, damage_dealt: u16) -> Self {
        Self {
            attacker,
            defender: attacker.opponent(),
            attack,
            damage_dealt,
        }
    }
}

// --- 4. DISPATCH ---

/// Commands for a move's bonus effect.
///
/// `target` is the side receiving the effect, or `None` when the move names
/// no combatant. Effects that act on a Pokemon do nothing without one, and
/// nothing happens to a fainted target.
pub fn dispatch_bonus_effect(
    effect: &BonusEffect,
    target: Option<PlayerTarget>,
    context: &EffectContext,
    state: &BattleState,
    rng: &mut BattleRng,
    config: &BattleConfig,
) -> Vec<BattleCommand> {
    match effect {
        BonusEffect::SetWeather(weather) => return apply_weather_effect(*weather, config),
        BonusEffect::SetTerrain(terrain) => return apply_terrain_effect(*terrain, config),
        BonusEffect::MultiHit { min_hits, max_hits } => {
            return apply_multi_hit_effect(*min_hits, *max_hits, context, rng)
        }
        // Resolved by the engine before damage is dealt.
        BonusEffect::Charge { .. } => return Vec::new(),
        _ => {}
    }

    let Some((target, pokemon)) = target.and_then(|side| live_target(side, state)) else {
        debug!("{} has no live target for its bonus effect", context.attack.name);
        return Vec::new();
    };

    match effect {
        BonusEffect::StatChange(changes) => apply_stat_change_effect(changes, target),
        BonusEffect::InflictStatus { status, chance } => {
            apply_status_effect(*status, *chance, target, pokemon, rng)
        }
        BonusEffect::CureStatus(status) => apply_cure_status_effect(*status, target, pokemon),
        BonusEffect::ApplyVolatile { volatile, chance } => {
            apply_volatile_effect(*volatile, *chance, target, pokemon, rng)
        }
        BonusEffect::HealPercent(percent) => apply_heal_effect(*percent, target, pokemon),
        BonusEffect::DrainPercent(percent) => apply_drain_effect(*percent, target, context),
        BonusEffect::SetWeather(_)
        | BonusEffect::SetTerrain(_)
        | BonusEffect::MultiHit { .. }
        | BonusEffect::Charge { .. } => Vec::new(),
    }
}

fn live_target(side: PlayerTarget, state: &BattleState) -> Option<(PlayerTarget, &PokemonInst)> {
    state
        .active(side)
        .ok()
        .filter(|pokemon| !pokemon.is_fainted())
        .map(|pokemon| (side, pokemon))
}
