use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::rng::BattleRng;
use crate::battle::state::BattleEvent;
use crate::pokemon::PokemonInst;
use log::debug;
use schema::{
    Effectiveness, MoveCategory, MoveData, PokemonType, StabBonus, StatType, Weather,
};

/// Lowest and highest percent of the random damage band.
pub const DAMAGE_ROLL_MIN: u32 = 85;
pub const DAMAGE_ROLL_MAX: u32 = 100;

/// Result of one damage calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: Effectiveness,
    /// Combined type multiplier before bucketing.
    pub multiplier: f64,
}

impl DamageOutcome {
    pub fn is_blocked(&self) -> bool {
        self.effectiveness == Effectiveness::NotEffective
    }
}

/// Attacking and defending stats for a move, after stat stages.
fn attack_and_defense(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    attack: &MoveData,
) -> (u16, u16) {
    let (attack_stat, defense_stat) = match attack.category {
        MoveCategory::Special => (StatType::SpecialAttack, StatType::SpecialDefense),
        _ => (StatType::Attack, StatType::Defense),
    };
    let attacking = match attack.name.as_str() {
        // Uses the target's own Attack against it.
        "Foul Play" => defender.modified_stat(StatType::Attack),
        _ => attacker.modified_stat(attack_stat),
    };
    let defending = match attack.name.as_str() {
        // Special attack that hits the physical Defense stat.
        "Psyshock" => defender.modified_stat(StatType::Defense),
        _ => defender.modified_stat(defense_stat),
    };
    (attacking, defending)
}

fn apply_stab(damage: u32, attacker: &PokemonInst, move_type: PokemonType) -> u32 {
    if move_type == PokemonType::Typeless || !attacker.has_type(move_type) {
        return damage;
    }
    match attacker.ability.stab_multiplier() {
        StabBonus::Standard => damage * 3 / 2,
        StabBonus::Double => damage * 2,
    }
}

/// Damage for a fixed roll in percent (85..=100). Pure: no RNG, no side effects.
pub fn damage_with_roll(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    attack: &MoveData,
    weather: Weather,
    roll_percent: u32,
) -> DamageOutcome {
    let multiplier = attack.move_type.effectiveness_against(&defender.types);
    let effectiveness = Effectiveness::from_multiplier(multiplier);

    if !attack.is_damaging() {
        return DamageOutcome {
            damage: 0,
            effectiveness,
            multiplier,
        };
    }

    let (attacking, defending) = attack_and_defense(attacker, defender, attack);
    let level_term = 2 * u64::from(attacker.level) / 5 + 2;
    let base = level_term * u64::from(attack.power) * u64::from(attacking)
        / u64::from(defending.max(1));
    let bracket = (base / 50 + 2).min(u64::from(u32::MAX)) as u32;

    let after_weather = bracket * weather.damage_modifier_percent(attack.move_type) / 100;
    let after_roll = after_weather * roll_percent / 100;
    let after_stab = apply_stab(after_roll, attacker, attack.move_type);
    let typed = (f64::from(after_stab) * multiplier).floor() as u32;

    let damage = if effectiveness == Effectiveness::NotEffective {
        0
    } else {
        typed.max(1)
    };

    DamageOutcome {
        damage: damage.min(u32::from(u16::MAX)) as u16,
        effectiveness,
        multiplier,
    }
}

/// Damage for one hit, drawing the damage roll from the battle RNG.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    attack: &MoveData,
    weather: Weather,
    rng: &mut BattleRng,
) -> DamageOutcome {
    let roll = rng.damage_roll_percent();
    let outcome = damage_with_roll(attacker, defender, attack, weather, roll);
    debug!(
        "{} -> {} with {}: roll {}%, {} damage ({:?})",
        attacker.display_name(),
        defender.display_name(),
        attack.name,
        roll,
        outcome.damage,
        outcome.effectiveness
    );
    outcome
}

/// The lowest and highest damage a move could deal right now. Reads state
/// only: no RNG draw and no ability hooks.
pub fn preview_damage_range(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    attack: &MoveData,
    weather: Weather,
) -> (u16, u16) {
    let low = damage_with_roll(attacker, defender, attack, weather, DAMAGE_ROLL_MIN);
    let high = damage_with_roll(attacker, defender, attack, weather, DAMAGE_ROLL_MAX);
    (low.damage, high.damage)
}

/// Ability effects that fire as an attack is about to land. Protean turns
/// the attacker into the move's type before damage is calculated, so the
/// new type counts for the same-type bonus.
pub fn apply_pre_damage_ability_hooks(
    attacker: &PokemonInst,
    attacker_target: PlayerTarget,
    attack: &MoveData,
) -> Vec<BattleCommand> {
    if !attacker.ability.changes_type_before_attacking()
        || attack.move_type == PokemonType::Typeless
        || attacker.types == [attack.move_type]
    {
        return Vec::new();
    }
    let new_types = vec![attack.move_type];
    vec![
        BattleCommand::ChangeTypes {
            target: attacker_target,
            types: new_types.clone(),
        },
        BattleCommand::EmitEvent(BattleEvent::AbilityActivated {
            pokemon: attacker.display_name().to_string(),
            ability: attacker.ability,
            new_types,
        }),
    ]
}

/// The typeless 40-power physical hit a confused Pokemon deals to itself.
pub fn confusion_self_hit() -> MoveData {
    MoveData {
        name: "Confused".to_string(),
        move_type: PokemonType::Typeless,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: None,
        ..MoveData::placeholder("Confused")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokedex::{get_move_data, Pokedex};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Ability, Nature};

    fn competitive(species: &str, nature: Nature, moves: &[&str]) -> PokemonInst {
        PokemonInst::from_repository(Pokedex::compiled(), species, 50, nature, moves)
            .expect("test species should exist")
            .with_ivs([31; 6])
            .with_evs([0, 0, 4, 252, 0, 252])
    }

    fn golden_pair() -> (PokemonInst, PokemonInst) {
        (
            competitive("Bulbasaur", Nature::Modest, &["Giga Drain"]),
            competitive("Pikachu", Nature::Timid, &["Thunderbolt"]),
        )
    }

    #[test]
    fn test_golden_damage_range() {
        let (bulbasaur, pikachu) = golden_pair();
        let giga_drain = get_move_data("Giga Drain");

        assert_eq!(
            preview_damage_range(&bulbasaur, &pikachu, &giga_drain, Weather::None),
            (78, 93)
        );

        let mut rng = BattleRng::from_seed_str("golden");
        for _ in 0..50 {
            let outcome = calculate_damage(&bulbasaur, &pikachu, &giga_drain, Weather::None, &mut rng);
            assert!((78..=93).contains(&outcome.damage), "got {}", outcome.damage);
            assert_eq!(outcome.effectiveness, Effectiveness::Normal);
        }
    }

    #[rstest]
    #[case("Earthquake", "Pidgey", Effectiveness::NotEffective)]
    #[case("Tackle", "Gengar", Effectiveness::NotEffective)]
    #[case("Water Gun", "Geodude", Effectiveness::SuperEffective)]
    #[case("Thunderbolt", "Bulbasaur", Effectiveness::NotVeryEffective)]
    fn test_effectiveness_buckets(
        #[case] move_name: &str,
        #[case] defender_species: &str,
        #[case] expected: Effectiveness,
    ) {
        let attacker = competitive("Squirtle", Nature::Hardy, &["Tackle"]);
        let defender = competitive(defender_species, Nature::Hardy, &["Tackle"]);
        let outcome = damage_with_roll(
            &attacker,
            &defender,
            &get_move_data(move_name),
            Weather::None,
            100,
        );
        assert_eq!(outcome.effectiveness, expected);
        assert_eq!(outcome.damage == 0, expected == Effectiveness::NotEffective);
    }

    #[test]
    fn test_weather_scales_damage() {
        let squirtle = competitive("Squirtle", Nature::Hardy, &["Water Gun"]);
        let charmander = competitive("Charmander", Nature::Hardy, &["Ember"]);
        let water_gun = get_move_data("Water Gun");

        let clear = damage_with_roll(&squirtle, &charmander, &water_gun, Weather::None, 100);
        let rain = damage_with_roll(&squirtle, &charmander, &water_gun, Weather::Rain, 100);
        let harsh = damage_with_roll(
            &squirtle,
            &charmander,
            &water_gun,
            Weather::ExtremelyHarshSunlight,
            100,
        );
        assert!(rain.damage > clear.damage);
        // A zeroed bracket still deals the minimum of one.
        assert_eq!(harsh.damage, 1);
    }

    #[test]
    fn test_adaptability_doubles_stab() {
        let porygon = competitive("Porygon-Z", Nature::Hardy, &["Tackle"]);
        let mut plain = porygon.clone();
        plain.ability = Ability::Download;
        let defender = competitive("Squirtle", Nature::Hardy, &["Tackle"]);
        let tackle = get_move_data("Tackle");

        let doubled = damage_with_roll(&porygon, &defender, &tackle, Weather::None, 100);
        let standard = damage_with_roll(&plain, &defender, &tackle, Weather::None, 100);
        assert!(doubled.damage > standard.damage);
    }

    #[test]
    fn test_protean_hook_only_fires_on_type_change() {
        let greninja = competitive("Greninja", Nature::Hardy, &["Ice Beam", "Water Gun"])
            .with_ability(Ability::Protean)
            .expect("Greninja can have Protean");

        let commands =
            apply_pre_damage_ability_hooks(&greninja, PlayerTarget::Player1, &get_move_data("Ice Beam"));
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            BattleCommand::ChangeTypes {
                target: PlayerTarget::Player1,
                types: vec![PokemonType::Ice],
            }
        );

        let mut already_ice = greninja.clone();
        already_ice.types = vec![PokemonType::Ice];
        assert!(
            apply_pre_damage_ability_hooks(&already_ice, PlayerTarget::Player1, &get_move_data("Ice Beam"))
                .is_empty()
        );

        let torrent = competitive("Greninja", Nature::Hardy, &["Ice Beam"]);
        assert!(
            apply_pre_damage_ability_hooks(&torrent, PlayerTarget::Player1, &get_move_data("Ice Beam"))
                .is_empty()
        );
    }

    #[test]
    fn test_preview_leaves_attacker_untouched() {
        let greninja = competitive("Greninja", Nature::Hardy, &["Ice Beam"])
            .with_ability(Ability::Protean)
            .expect("Greninja can have Protean");
        let defender = competitive("Pidgey", Nature::Hardy, &["Tackle"]);
        let before = greninja.clone();
        preview_damage_range(&greninja, &defender, &get_move_data("Ice Beam"), Weather::None);
        assert_eq!(greninja, before);
    }

    #[test]
    fn test_foul_play_uses_defender_attack() {
        let gengar = competitive("Gengar", Nature::Hardy, &["Foul Play"]);
        let mut strong = competitive("Geodude", Nature::Hardy, &["Tackle"]);
        let weak = strong.clone();
        strong.set_stat_stage(StatType::Attack, 6);
        let foul_play = get_move_data("Foul Play");

        let against_strong = damage_with_roll(&gengar, &strong, &foul_play, Weather::None, 100);
        let against_weak = damage_with_roll(&gengar, &weak, &foul_play, Weather::None, 100);
        assert!(against_strong.damage > against_weak.damage);
    }

    #[test]
    fn test_psyshock_hits_physical_defense() {
        let espeon = competitive("Espeon", Nature::Modest, &["Psyshock"]);
        let squirtle = competitive("Squirtle", Nature::Hardy, &["Tackle"]);
        let psyshock = get_move_data("Psyshock");
        let baseline = damage_with_roll(&espeon, &squirtle, &psyshock, Weather::None, 100);

        let mut walled = squirtle.clone();
        walled.set_stat_stage(StatType::Defense, 2);
        let against_defense = damage_with_roll(&espeon, &walled, &psyshock, Weather::None, 100);
        assert!(against_defense.damage < baseline.damage);

        let mut calm = squirtle;
        calm.set_stat_stage(StatType::SpecialDefense, 2);
        let against_sp_def = damage_with_roll(&espeon, &calm, &psyshock, Weather::None, 100);
        assert_eq!(against_sp_def.damage, baseline.damage);
    }
}
