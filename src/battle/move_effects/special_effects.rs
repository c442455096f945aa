use super::EffectContext;
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::rng::BattleRng;
use crate::battle::state::BattleEvent;
use crate::battle::turn::{Action, AttackOrigin, Turn};
use crate::pokemon::PokemonInst;

/// Rolls the hit count and queues that many stripped hits ahead of every
/// other pending turn. The triggering turn itself deals no damage.
pub(super) fn apply_multi_hit_effect(
    min_hits: u8,
    max_hits: u8,
    context: &EffectContext,
    rng: &mut BattleRng,
) -> Vec<BattleCommand> {
    let hits = rng.uniform_between(u32::from(min_hits), u32::from(max_hits)) as u8;
    let single_hit = context.attack.without_bonus_effect();
    let sub_turns = (0..hits)
        .map(|_| Turn {
            player: context.attacker,
            action: Action::Attack {
                attack: single_hit.clone(),
                origin: AttackOrigin::MultiHitInstance,
            },
        })
        .collect();

    vec![
        BattleCommand::EmitEvent(BattleEvent::MultiHitRolled {
            move_name: context.attack.name.clone(),
            hits,
        }),
        BattleCommand::PushTurnsFront(sub_turns),
    ]
}

/// Restores `percent` of the target's max HP.
pub(super) fn apply_heal_effect(
    percent: u8,
    target: PlayerTarget,
    pokemon: &PokemonInst,
) -> Vec<BattleCommand> {
    let amount = u32::from(pokemon.max_hp()) * u32::from(percent) / 100;
    if amount == 0 {
        return Vec::new();
    }
    vec![BattleCommand::HealPokemon {
        target,
        amount: amount.min(u32::from(u16::MAX)) as u16,
    }]
}

/// Restores `percent` of the damage just dealt, rounded half up.
pub(super) fn apply_drain_effect(
    percent: u8,
    target: PlayerTarget,
    context: &EffectContext,
) -> Vec<BattleCommand> {
    let amount = (u32::from(context.damage_dealt) * u32::from(percent) + 50) / 100;
    if amount == 0 {
        return Vec::new();
    }
    vec![BattleCommand::HealPokemon {
        target,
        amount: amount.min(u32::from(u16::MAX)) as u16,
    }]
}
