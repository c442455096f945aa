use crate::battle::conditions::{VolatileKind, VolatileStatus};
use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::battle::turn::{Turn, TurnQueue};
use crate::errors::{BattleResult, BattleStateError};
use crate::pokemon::{PokemonInst, StatusCondition};
use log::debug;
use schema::{PokemonType, StatType, Terrain, Weather};
use serde::{Deserialize, Serialize};

/// Player target for commands - provides type safety over raw indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTarget {
    Player1,
    Player2,
}

impl PlayerTarget {
    pub fn to_index(self) -> usize {
        match self {
            PlayerTarget::Player1 => 0,
            PlayerTarget::Player2 => 1,
        }
    }

    pub fn opponent(self) -> PlayerTarget {
        match self {
            PlayerTarget::Player1 => PlayerTarget::Player2,
            PlayerTarget::Player2 => PlayerTarget::Player1,
        }
    }

    pub fn both() -> [PlayerTarget; 2] {
        [PlayerTarget::Player1, PlayerTarget::Player2]
    }
}

impl TryFrom<usize> for PlayerTarget {
    type Error = BattleStateError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PlayerTarget::Player1),
            1 => Ok(PlayerTarget::Player2),
            _ => Err(BattleStateError::InvalidPlayerIndex(index)),
        }
    }
}

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    // Pokemon modifications
    DealDamage {
        target: PlayerTarget,
        amount: u16,
    },
    HealPokemon {
        target: PlayerTarget,
        amount: u16,
    },
    SetPokemonStatus {
        target: PlayerTarget,
        status: StatusCondition,
    },
    ChangeStatStage {
        target: PlayerTarget,
        stat: StatType,
        delta: i8,
    },
    AddVolatile {
        target: PlayerTarget,
        status: VolatileStatus,
    },
    RemoveVolatile {
        target: PlayerTarget,
        kind: VolatileKind,
    },
    ChangeTypes {
        target: PlayerTarget,
        types: Vec<PokemonType>,
    },
    SpendPp {
        target: PlayerTarget,
        move_name: String,
    },
    SwitchPokemon {
        target: PlayerTarget,
        team_index: usize,
    },

    // Field
    SetWeather {
        weather: Weather,
        turns: u8,
    },
    SetTerrain {
        terrain: Terrain,
        turns: u8,
    },

    // Battle flow
    EmitEvent(BattleEvent),
    PushTurnsFront(Vec<Turn>),
}

/// Execute a batch of commands in order
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
    queue: &mut TurnQueue,
) -> BattleResult<()> {
    for command in commands {
        execute_command(command, state, bus, queue)?;
    }
    Ok(())
}

/// Runs `operation` on the target's active Pokemon unless it has fainted.
/// Commands aimed at a fainted Pokemon are dropped.
fn execute_pokemon_command<F>(
    target: PlayerTarget,
    state: &mut BattleState,
    operation: F,
) -> BattleResult<()>
where
    F: FnOnce(&mut PokemonInst, usize),
{
    let pokemon = state.active_mut(target)?;
    if pokemon.is_fainted() {
        debug!("Skipping command for fainted {}", pokemon.display_name());
        return Ok(());
    }
    operation(pokemon, target.to_index());
    Ok(())
}

/// Helper function specifically for DealDamage command with event emission
fn execute_deal_damage_command(
    target: PlayerTarget,
    amount: u16,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> BattleResult<()> {
    execute_pokemon_command(target, state, |pokemon, player_index| {
        let before = pokemon.current_hp();
        let did_faint = pokemon.take_damage(amount);
        let remaining_hp = pokemon.current_hp();

        bus.push(BattleEvent::DamageDealt {
            target: pokemon.display_name().to_string(),
            damage: before - remaining_hp,
            remaining_hp,
        });

        if did_faint {
            bus.push(BattleEvent::PokemonFainted {
                player_index,
                pokemon: pokemon.display_name().to_string(),
            });
        }
    })
}

pub fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    bus: &mut EventBus,
    queue: &mut TurnQueue,
) -> BattleResult<()> {
    match command {
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
            Ok(())
        }
        BattleCommand::DealDamage { target, amount } => {
            execute_deal_damage_command(target, amount, state, bus)
        }
        BattleCommand::HealPokemon { target, amount } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                let restored = pokemon.heal(amount);
                if restored > 0 {
                    bus.push(BattleEvent::PokemonHealed {
                        target: pokemon.display_name().to_string(),
                        amount: restored,
                        new_hp: pokemon.current_hp(),
                    });
                }
            })
        }
        BattleCommand::SetPokemonStatus { target, status } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                let previous = pokemon.status();
                if !pokemon.set_status(status) {
                    return;
                }
                let name = pokemon.display_name().to_string();
                if status.is_healthy() {
                    bus.push(BattleEvent::StatusRemoved {
                        target: name,
                        status: previous,
                    });
                } else if !previous.same_kind(&status) {
                    bus.push(BattleEvent::StatusApplied {
                        target: name,
                        status,
                    });
                }
            })
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => execute_pokemon_command(target, state, |pokemon, _| {
            let (old_stage, new_stage) = pokemon.change_stat_stage(stat, delta);
            let name = pokemon.display_name().to_string();
            if old_stage == new_stage {
                bus.push(BattleEvent::StatChangeBlocked {
                    target: name,
                    stat,
                    rising: delta > 0,
                });
            } else {
                bus.push(BattleEvent::StatStageChanged {
                    target: name,
                    stat,
                    old_stage,
                    new_stage,
                });
            }
        }),
        BattleCommand::AddVolatile { target, status } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                pokemon.volatile_status.insert(status.clone());
                bus.push(BattleEvent::VolatileApplied {
                    target: pokemon.display_name().to_string(),
                    status,
                });
            })
        }
        BattleCommand::RemoveVolatile { target, kind } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                if let Some(status) = pokemon.volatile_status.remove_kind(kind) {
                    bus.push(BattleEvent::VolatileRemoved {
                        target: pokemon.display_name().to_string(),
                        status,
                    });
                }
            })
        }
        BattleCommand::ChangeTypes { target, types } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                pokemon.types = types;
            })
        }
        BattleCommand::SpendPp { target, move_name } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                if let Some(instance) = pokemon.moves.iter_mut().find(|m| m.name() == move_name) {
                    instance.use_move();
                }
            })
        }
        BattleCommand::SwitchPokemon { target, team_index } => {
            let player = state.player_mut(target);
            let old_pokemon = player
                .active_pokemon()
                .map(|p| p.display_name().to_string())
                .unwrap_or_default();
            player.switch_pokemon(team_index)?;
            let new_pokemon = player
                .active_pokemon()
                .map(|p| p.display_name().to_string())
                .unwrap_or_default();
            bus.push(BattleEvent::PokemonSwitched {
                player_index: target.to_index(),
                old_pokemon,
                new_pokemon,
            });
            Ok(())
        }
        BattleCommand::SetWeather { weather, turns } => {
            state.weather = weather;
            state.weather_turns_remaining = if weather == Weather::None { 0 } else { turns };
            bus.push(BattleEvent::WeatherChanged { weather });
            Ok(())
        }
        BattleCommand::SetTerrain { terrain, turns } => {
            state.terrain = terrain;
            state.terrain_turns_remaining = if terrain == Terrain::None { 0 } else { turns };
            bus.push(BattleEvent::TerrainChanged { terrain });
            Ok(())
        }
        BattleCommand::PushTurnsFront(turns) => {
            queue.push_front_all(turns);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::BattlePlayer;
    use crate::pokedex::Pokedex;
    use pretty_assertions::assert_eq;
    use schema::Nature;

    fn create_test_battle_state() -> BattleState {
        let build = |species: &str| {
            PokemonInst::from_repository(
                Pokedex::compiled(),
                species,
                25,
                Nature::Hardy,
                &["Tackle", "Thunderbolt"],
            )
            .expect("test species should exist")
        };
        BattleState::new(
            BattlePlayer::new(
                "test1".to_string(),
                "Player 1".to_string(),
                vec![build("Pikachu"), build("Squirtle")],
            )
            .expect("valid team"),
            BattlePlayer::new(
                "test2".to_string(),
                "Player 2".to_string(),
                vec![build("Charmander")],
            )
            .expect("valid team"),
        )
    }

    fn run(command: BattleCommand, state: &mut BattleState) -> EventBus {
        let mut bus = EventBus::new();
        let mut queue = TurnQueue::new();
        execute_command(command, state, &mut bus, &mut queue).expect("command should succeed");
        bus
    }

    #[test]
    fn test_player_target_conversion() {
        assert_eq!(PlayerTarget::try_from(1), Ok(PlayerTarget::Player2));
        assert_eq!(
            PlayerTarget::try_from(2),
            Err(BattleStateError::InvalidPlayerIndex(2))
        );
        assert_eq!(PlayerTarget::Player1.opponent(), PlayerTarget::Player2);
    }

    #[test]
    fn test_lethal_damage_emits_faint() {
        let mut state = create_test_battle_state();
        let hp = state.players[1].team[0].current_hp();

        let bus = run(
            BattleCommand::DealDamage {
                target: PlayerTarget::Player2,
                amount: 999,
            },
            &mut state,
        );

        assert_eq!(
            bus.events(),
            &[
                BattleEvent::DamageDealt {
                    target: "Charmander".to_string(),
                    damage: hp,
                    remaining_hp: 0,
                },
                BattleEvent::PokemonFainted {
                    player_index: 1,
                    pokemon: "Charmander".to_string(),
                },
            ]
        );
        assert!(state.players[1].team[0].is_fainted());

        // Further commands against the fainted Pokemon are dropped.
        let bus = run(
            BattleCommand::SetPokemonStatus {
                target: PlayerTarget::Player2,
                status: StatusCondition::Burned,
            },
            &mut state,
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn test_stat_stage_clamps_and_reports_block() {
        let mut state = create_test_battle_state();
        let bus = run(
            BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player1,
                stat: StatType::Attack,
                delta: 12,
            },
            &mut state,
        );
        assert_eq!(state.players[0].team[0].stat_stage(StatType::Attack), 6);
        assert!(matches!(
            bus.events(),
            [BattleEvent::StatStageChanged { new_stage: 6, .. }]
        ));

        let bus = run(
            BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player1,
                stat: StatType::Attack,
                delta: 1,
            },
            &mut state,
        );
        assert!(matches!(
            bus.events(),
            [BattleEvent::StatChangeBlocked { rising: true, .. }]
        ));
    }

    #[test]
    fn test_status_cure_reports_previous_status() {
        let mut state = create_test_battle_state();
        run(
            BattleCommand::SetPokemonStatus {
                target: PlayerTarget::Player1,
                status: StatusCondition::Burned,
            },
            &mut state,
        );
        let bus = run(
            BattleCommand::SetPokemonStatus {
                target: PlayerTarget::Player1,
                status: StatusCondition::Healthy,
            },
            &mut state,
        );
        assert_eq!(
            bus.events(),
            &[BattleEvent::StatusRemoved {
                target: "Pikachu".to_string(),
                status: StatusCondition::Burned,
            }]
        );
    }

    #[test]
    fn test_switch_and_spend_pp() {
        let mut state = create_test_battle_state();
        run(
            BattleCommand::SpendPp {
                target: PlayerTarget::Player1,
                move_name: "Thunderbolt".to_string(),
            },
            &mut state,
        );
        assert_eq!(state.players[0].team[0].moves[1].pp, 14);

        let bus = run(
            BattleCommand::SwitchPokemon {
                target: PlayerTarget::Player1,
                team_index: 1,
            },
            &mut state,
        );
        assert_eq!(state.players[0].active_pokemon_index, 1);
        assert_eq!(
            bus.events(),
            &[BattleEvent::PokemonSwitched {
                player_index: 0,
                old_pokemon: "Pikachu".to_string(),
                new_pokemon: "Squirtle".to_string(),
            }]
        );
    }

    #[test]
    fn test_weather_none_has_no_duration() {
        let mut state = create_test_battle_state();
        run(
            BattleCommand::SetWeather {
                weather: Weather::Rain,
                turns: 5,
            },
            &mut state,
        );
        assert_eq!(state.weather_turns_remaining, 5);
        run(
            BattleCommand::SetWeather {
                weather: Weather::None,
                turns: 5,
            },
            &mut state,
        );
        assert_eq!(state.weather_turns_remaining, 0);
    }
}
