use crate::battle::commands::PlayerTarget;
use crate::battle::conditions::VolatileStatus;
use crate::errors::{BattleResult, BattleStateError};
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Ability, Effectiveness, PokemonType, StatType, Terrain, Weather};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    Running,
    WaitingForPlayer1Replacement, // Player 1 needs to send out a new Pokemon after faint
    WaitingForPlayer2Replacement, // Player 2 needs to send out a new Pokemon after faint
    WaitingForBothReplacements,   // Both players need to send out new Pokemon after faints
    Player1Win,
    Player2Win,
}

impl GameState {
    pub fn is_completed(self) -> bool {
        matches!(self, GameState::Player1Win | GameState::Player2Win)
    }

    pub fn is_awaiting_replacement(self) -> bool {
        matches!(
            self,
            GameState::WaitingForPlayer1Replacement
                | GameState::WaitingForPlayer2Replacement
                | GameState::WaitingForBothReplacements
        )
    }

    /// Whether the given side must send out a replacement before play continues.
    pub fn awaits_replacement_from(self, player: PlayerTarget) -> bool {
        matches!(
            (self, player),
            (GameState::WaitingForBothReplacements, _)
                | (GameState::WaitingForPlayer1Replacement, PlayerTarget::Player1)
                | (GameState::WaitingForPlayer2Replacement, PlayerTarget::Player2)
        )
    }

    pub fn winner(self) -> Option<PlayerTarget> {
        match self {
            GameState::Player1Win => Some(PlayerTarget::Player1),
            GameState::Player2Win => Some(PlayerTarget::Player2),
            _ => None,
        }
    }

    /// Waiting state for the sides that still need a replacement.
    pub fn from_pending_replacements(player1: bool, player2: bool) -> Self {
        match (player1, player2) {
            (true, true) => GameState::WaitingForBothReplacements,
            (true, false) => GameState::WaitingForPlayer1Replacement,
            (false, true) => GameState::WaitingForPlayer2Replacement,
            (false, false) => GameState::Running,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Round Management
    ClearLog,
    RoundStarted {
        round: u32,
    },
    RoundEnded {
        round: u32,
    },

    // Pokemon Actions
    PokemonSwitched {
        player_index: usize,
        old_pokemon: String,
        new_pokemon: String,
    },
    MoveUsed {
        player_index: usize,
        pokemon: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
        move_name: String,
    },
    MoveBlockedByProtect {
        defender: String,
    },
    MultiHitRolled {
        move_name: String,
        hits: u8,
    },
    ChargingMove {
        pokemon: String,
        move_name: String,
    },
    AbilityActivated {
        pokemon: String,
        ability: Ability,
        new_types: Vec<PokemonType>,
    },

    // Damage and Healing
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonHealed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    PokemonFainted {
        player_index: usize,
        pokemon: String,
    },
    AttackTypeEffectiveness {
        effectiveness: Effectiveness,
    },
    AttackBlockedByWeather {
        weather: Weather,
        move_type: PokemonType,
    },

    // Status Conditions
    PokemonConfused {
        pokemon: String,
    },
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusRemoved {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },
    VolatileApplied {
        target: String,
        status: VolatileStatus,
    },
    VolatileRemoved {
        target: String,
        status: VolatileStatus,
    },

    // Stat Changes
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
        rising: bool,
    },

    // Field
    WeatherChanged {
        weather: Weather,
    },
    TerrainChanged {
        terrain: Terrain,
    },

    // Action Failures
    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },

    // Battle End
    ReplacementNeeded {
        player_index: usize,
    },
    PlayerRan {
        player_index: usize,
    },
    PlayerDefeated {
        player_index: usize,
    },
    BattleEnded {
        winner: usize,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let player_name = |index: &usize| -> String {
            battle_state
                .players
                .get(*index)
                .map(|player| player.player_name.clone())
                .unwrap_or_else(|| format!("Player {}", index + 1))
        };

        match self {
            // === Round Management Events ===
            BattleEvent::ClearLog => None,
            BattleEvent::RoundStarted { round } => Some(format!("=== Turn {} ===", round)),
            BattleEvent::RoundEnded { .. } => None,

            // === Pokemon Action Events ===
            BattleEvent::PokemonSwitched {
                player_index,
                old_pokemon,
                new_pokemon,
            } => Some(format!(
                "{} recalled {} and sent out {}!",
                player_name(player_index),
                old_pokemon,
                new_pokemon
            )),
            BattleEvent::MoveUsed {
                player_index,
                pokemon,
                move_name,
            } => Some(format!(
                "{}'s {} used {}!",
                player_name(player_index),
                pokemon,
                move_name
            )),
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::MoveBlockedByProtect { defender } => {
                Some(format!("{} is protected!", defender))
            }
            BattleEvent::MultiHitRolled { move_name, hits } => {
                Some(format!("{} will hit {} times!", move_name, hits))
            }
            BattleEvent::ChargingMove { pokemon, move_name } => {
                Some(format!("{} is preparing to use {}!", pokemon, move_name))
            }
            BattleEvent::AbilityActivated {
                pokemon,
                ability,
                new_types,
            } => {
                let types: Vec<String> = new_types.iter().map(|t| t.to_string()).collect();
                Some(format!(
                    "[{}] {} became {} type!",
                    ability,
                    pokemon,
                    types.join("/")
                ))
            }

            // === Damage and Healing Events ===
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::PokemonHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),
            BattleEvent::AttackTypeEffectiveness { effectiveness } => match effectiveness {
                Effectiveness::Normal => None,
                other => Some(other.to_string()),
            },
            BattleEvent::AttackBlockedByWeather { weather, move_type } => {
                weather.block_message(*move_type)
            }

            // === Status Events ===
            BattleEvent::PokemonConfused { pokemon } => Some(format!("{} is confused!", pokemon)),
            BattleEvent::StatusApplied { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_applied(status)
            )),
            BattleEvent::StatusRemoved { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_removed(status)
            )),
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by {}! ({} damage)",
                target, status, damage
            )),
            BattleEvent::VolatileApplied { target, status } => match status {
                VolatileStatus::Confused { .. } => Some(format!("{} became confused!", target)),
                VolatileStatus::Protected => Some(format!("{} protected itself!", target)),
                // Flinching, recharging and charging announce themselves when they act.
                _ => None,
            },
            BattleEvent::VolatileRemoved { target, status } => match status {
                VolatileStatus::Confused { .. } => {
                    Some(format!("{} snapped out of its confusion!", target))
                }
                _ => None,
            },

            // === Stat Change Events ===
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let degree = match (new_stage - old_stage).abs() {
                    1 => "",
                    2 => " sharply",
                    _ => " drastically",
                };
                let direction = if new_stage > old_stage { "rose" } else { "fell" };
                Some(format!("{}'s {}{} {}!", target, stat, degree, direction))
            }
            BattleEvent::StatChangeBlocked {
                target,
                stat,
                rising,
            } => {
                let limit = if *rising { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", target, stat, limit))
            }

            // === Field Events ===
            BattleEvent::WeatherChanged { weather } => match weather {
                Weather::None => Some("The weather calmed down.".to_string()),
                other => Some(format!("The weather became {}!", other)),
            },
            BattleEvent::TerrainChanged { terrain } => match terrain {
                Terrain::None => Some("The terrain returned to normal.".to_string()),
                other => Some(format!("{} spread across the battlefield!", other)),
            },

            // === Action Failure Events ===
            BattleEvent::ActionFailed { pokemon, reason } => Some(format!(
                "{} {}",
                pokemon,
                Self::format_action_failure_reason(reason)
            )),

            // === Battle End Events ===
            BattleEvent::ReplacementNeeded { player_index } => Some(format!(
                "{} must choose a Pokémon to send out!",
                player_name(player_index)
            )),
            BattleEvent::PlayerRan { player_index } => {
                Some(format!("{} ran away!", player_name(player_index)))
            }
            BattleEvent::PlayerDefeated { player_index } => Some(format!(
                "{} is out of usable Pokémon!",
                player_name(player_index)
            )),
            BattleEvent::BattleEnded { winner } => {
                Some(format!("{} has won the battle!", player_name(winner)))
            }
        }
    }

    // --- Private Helper Functions ---

    fn format_status_applied(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Asleep { .. } => "fell asleep!".to_string(),
            StatusCondition::Poisoned => "was poisoned!".to_string(),
            StatusCondition::BadlyPoisoned { .. } => "was badly poisoned!".to_string(),
            StatusCondition::Burned => "was burned!".to_string(),
            StatusCondition::Frozen => "was frozen solid!".to_string(),
            StatusCondition::Paralysed => "is paralyzed! It may be unable to move!".to_string(),
            StatusCondition::Fainted => "fainted!".to_string(),
            StatusCondition::Healthy => "is healthy.".to_string(),
        }
    }

    fn format_status_removed(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Asleep { .. } => "woke up!".to_string(),
            StatusCondition::Frozen => "thawed out!".to_string(),
            _ => format!("was cured of its {}!", status),
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> String {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep.".to_string(),
            ActionFailureReason::IsFrozen => "is frozen solid!".to_string(),
            ActionFailureReason::MustRecharge => "must recharge!".to_string(),
            ActionFailureReason::IsParalysed => "is fully paralyzed!".to_string(),
            ActionFailureReason::IsFlinching => "flinched and couldn't move!".to_string(),
            ActionFailureReason::HurtItselfInConfusion => {
                "hurt itself in its confusion!".to_string()
            }
            ActionFailureReason::NoTarget => "has no target! But it failed!".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    MustRecharge,
    IsParalysed,
    IsFlinching,
    HurtItselfInConfusion,
    NoTarget, // The opposing Pokemon has already fainted
}

/// Event bus for collecting and managing battle events.
///
/// The order of events is the narrated battle log; two battles fed the same
/// seed and turns produce identical buses.
///
/// ```rust,ignore
/// event_bus.print_debug_with_message("Turn 1 events:");
/// event_bus.print_formatted(&battle_state);
/// let json = event_bus.to_json()?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text, falling back to debug
    /// format for silent events.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for event in &self.events {
            match event.format(battle_state) {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    /// The user-visible lines of this log, silent events skipped.
    pub fn formatted_lines(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub players: [BattlePlayer; 2],
    pub game_state: GameState,
    pub weather: Weather,
    pub weather_turns_remaining: u8,
    pub terrain: Terrain,
    pub terrain_turns_remaining: u8,
    pub round: u32,
}

impl BattleState {
    pub fn new(player1: BattlePlayer, player2: BattlePlayer) -> Self {
        Self {
            players: [player1, player2],
            game_state: GameState::Running,
            weather: Weather::None,
            weather_turns_remaining: 0,
            terrain: Terrain::None,
            terrain_turns_remaining: 0,
            round: 1,
        }
    }

    pub fn player(&self, target: PlayerTarget) -> &BattlePlayer {
        &self.players[target.to_index()]
    }

    pub fn player_mut(&mut self, target: PlayerTarget) -> &mut BattlePlayer {
        &mut self.players[target.to_index()]
    }

    /// The side's active Pokémon. A missing one means the active index has
    /// left the team, which only an engine bug can cause.
    pub fn active(&self, target: PlayerTarget) -> BattleResult<&PokemonInst> {
        let player = self.player(target);
        debug_assert!(
            player.active_pokemon_index < player.team.len(),
            "active index {} outside team of {}",
            player.active_pokemon_index,
            player.team.len()
        );
        player.active_pokemon().ok_or_else(|| {
            BattleStateError::InconsistentState(format!(
                "{} has no Pokemon at active index {}",
                player.player_name, player.active_pokemon_index
            ))
            .into()
        })
    }

    pub fn active_mut(&mut self, target: PlayerTarget) -> BattleResult<&mut PokemonInst> {
        let player = self.player_mut(target);
        let index = player.active_pokemon_index;
        let name = player.player_name.clone();
        debug_assert!(index < player.team.len(), "active index {} outside team", index);
        player.active_pokemon_mut().ok_or_else(|| {
            BattleStateError::InconsistentState(format!(
                "{} has no Pokemon at active index {}",
                name, index
            ))
            .into()
        })
    }

    pub fn winner(&self) -> Option<PlayerTarget> {
        self.game_state.winner()
    }
}

#[cfg(test)]
mod event_formatting_tests {
    use super::*;
    use crate::pokedex::Pokedex;
    use pretty_assertions::assert_eq;
    use schema::Nature;

    fn create_test_battle_state() -> BattleState {
        let pikachu =
            PokemonInst::from_repository(Pokedex::compiled(), "Pikachu", 25, Nature::Hardy, &[])
                .expect("Failed to build Pikachu");
        let charmander =
            PokemonInst::from_repository(Pokedex::compiled(), "Charmander", 25, Nature::Hardy, &[])
                .expect("Failed to build Charmander");

        let player1 = BattlePlayer::new("p1".to_string(), "Red".to_string(), vec![pikachu])
            .expect("valid team");
        let player2 = BattlePlayer::new("p2".to_string(), "Blue".to_string(), vec![charmander])
            .expect("valid team");
        BattleState::new(player1, player2)
    }

    #[test]
    fn test_silent_events_return_none() {
        let battle_state = create_test_battle_state();

        let silent_events = vec![
            BattleEvent::ClearLog,
            BattleEvent::RoundEnded { round: 1 },
            BattleEvent::AttackTypeEffectiveness {
                effectiveness: Effectiveness::Normal,
            },
            BattleEvent::VolatileApplied {
                target: "Pikachu".to_string(),
                status: VolatileStatus::Flinch,
            },
        ];

        for event in silent_events {
            assert!(
                event.format(&battle_state).is_none(),
                "Event {:?} should be silent but returned text",
                event
            );
        }
    }

    #[test]
    fn test_event_text_samples() {
        let battle_state = create_test_battle_state();

        let samples = vec![
            (
                BattleEvent::RoundStarted { round: 5 },
                "=== Turn 5 ===",
            ),
            (
                BattleEvent::MoveUsed {
                    player_index: 0,
                    pokemon: "Pikachu".to_string(),
                    move_name: "Thunderbolt".to_string(),
                },
                "Red's Pikachu used Thunderbolt!",
            ),
            (
                BattleEvent::AttackTypeEffectiveness {
                    effectiveness: Effectiveness::NotVeryEffective,
                },
                "It's not very effective...",
            ),
            (
                BattleEvent::MultiHitRolled {
                    move_name: "Bullet Seed".to_string(),
                    hits: 3,
                },
                "Bullet Seed will hit 3 times!",
            ),
            (
                BattleEvent::StatStageChanged {
                    target: "Pikachu".to_string(),
                    stat: StatType::Attack,
                    old_stage: 0,
                    new_stage: 2,
                },
                "Pikachu's Attack sharply rose!",
            ),
            (
                BattleEvent::WeatherChanged {
                    weather: Weather::None,
                },
                "The weather calmed down.",
            ),
            (
                BattleEvent::AttackBlockedByWeather {
                    weather: Weather::HeavyRain,
                    move_type: PokemonType::Fire,
                },
                "The Fire-type attack fizzled out in the heavy rain!",
            ),
            (
                BattleEvent::ActionFailed {
                    pokemon: "Charmander".to_string(),
                    reason: ActionFailureReason::IsParalysed,
                },
                "Charmander is fully paralyzed!",
            ),
            (BattleEvent::BattleEnded { winner: 1 }, "Blue has won the battle!"),
        ];

        for (event, expected) in samples {
            assert_eq!(event.format(&battle_state), Some(expected.to_string()));
        }
    }

    #[test]
    fn test_event_bus_json_round_trips() {
        let mut event_bus = EventBus::new();
        event_bus.push(BattleEvent::RoundStarted { round: 1 });
        event_bus.push(BattleEvent::StatusApplied {
            target: "Pikachu".to_string(),
            status: StatusCondition::Asleep { turns_remaining: 2 },
        });

        let json = event_bus.to_json().expect("events serialise");
        let events: Vec<BattleEvent> = serde_json::from_str(&json).expect("events parse");
        assert_eq!(events, event_bus.events());
        assert_eq!(event_bus.len(), 2);
        assert!(format!("{}", event_bus).contains("RoundStarted"));
    }

    #[test]
    fn test_game_state_helpers() {
        assert!(GameState::WaitingForBothReplacements.awaits_replacement_from(PlayerTarget::Player2));
        assert!(!GameState::WaitingForPlayer1Replacement.awaits_replacement_from(PlayerTarget::Player2));
        assert_eq!(GameState::Player2Win.winner(), Some(PlayerTarget::Player2));
        assert_eq!(
            GameState::from_pending_replacements(false, true),
            GameState::WaitingForPlayer2Replacement
        );
        assert!(!GameState::Running.is_completed());
    }
}
