use crate::battle::commands::PlayerTarget;
use crate::battle::engine::BattleEngine;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, EventBus};
use crate::battle::turn::Turn;
use crate::errors::BattleResult;
use crate::player::BattlePlayer;
use crate::pokedex::Pokedex;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Ability, Nature};

/// A builder for creating test Pokemon instances with common defaults:
/// Hardy nature, zero IVs and EVs, full HP, no status.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 50)
///     .with_moves(&["Tackle"])
///     .with_status(StatusCondition::Paralysed)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: String,
    level: u8,
    nature: Nature,
    ability: Option<Ability>,
    moves: Vec<String>,
    ivs: [u8; 6],
    evs: [u8; 6],
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            nature: Nature::Hardy,
            ability: None,
            moves: vec!["Tackle".to_string()],
            ivs: [0; 6],
            evs: [0; 6],
            status: None,
            current_hp: None,
        }
    }

    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = moves.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Full IVs with the EV spread used by the damage regression checks.
    pub fn competitive(mut self) -> Self {
        self.ivs = [31; 6];
        self.evs = [0, 0, 4, 252, 0, 252];
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonInst {
        let move_names: Vec<&str> = self.moves.iter().map(String::as_str).collect();
        let mut pokemon = match PokemonInst::from_repository(
            Pokedex::compiled(),
            &self.species,
            self.level,
            self.nature,
            &move_names,
        ) {
            Ok(pokemon) => pokemon.with_ivs(self.ivs).with_evs(self.evs),
            Err(err) => panic!("Failed to build test {}: {}", self.species, err),
        };

        if let Some(ability) = self.ability {
            pokemon = match pokemon.with_ability(ability) {
                Ok(pokemon) => pokemon,
                Err(err) => panic!("Failed to build test {}: {}", self.species, err),
            };
        }
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        if let Some(status) = self.status {
            pokemon.set_status(status);
        }
        pokemon
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a test player with a given ID, name, and team.
pub fn create_test_player(id: &str, name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    match BattlePlayer::new(id.to_string(), name.to_string(), team) {
        Ok(player) => player,
        Err(err) => panic!("Failed to build test player {}: {}", name, err),
    }
}

/// Creates a battle between two full teams.
pub fn create_team_battle(
    team1: Vec<PokemonInst>,
    team2: Vec<PokemonInst>,
    rng: BattleRng,
) -> BattleEngine {
    init_logger();
    let player1 = create_test_player("p1", "Red", team1);
    let player2 = create_test_player("p2", "Blue", team2);
    BattleEngine::new(player1, player2, rng)
}

/// Creates a standard 1v1 battle for testing.
pub fn create_test_battle(
    p1_pokemon: PokemonInst,
    p2_pokemon: PokemonInst,
    rng: BattleRng,
) -> BattleEngine {
    create_team_battle(vec![p1_pokemon], vec![p2_pokemon], rng)
}

/// Attack turn for the active Pokemon's move slot.
pub fn use_move(engine: &BattleEngine, player: PlayerTarget, move_index: usize) -> Turn {
    assert_ok(engine.move_turn(player, move_index))
}

/// Submits one turn per side and returns the events of the resolved round.
pub fn play_round(engine: &mut BattleEngine, p1_turn: Turn, p2_turn: Turn) -> EventBus {
    let pending = assert_ok(engine.submit_turn(p1_turn));
    assert!(pending.is_empty(), "round resolved after a single turn");
    assert_ok(engine.submit_turn(p2_turn))
}

/// Both sides use their first move.
pub fn play_first_moves(engine: &mut BattleEngine) -> EventBus {
    let p1_turn = use_move(engine, PlayerTarget::Player1, 0);
    let p2_turn = use_move(engine, PlayerTarget::Player2, 0);
    play_round(engine, p1_turn, p2_turn)
}

pub fn count_events(bus: &EventBus, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
    bus.events().iter().filter(|event| predicate(event)).count()
}

/// Names of the Pokemon that announced a move, in order.
pub fn move_users(bus: &EventBus) -> Vec<String> {
    bus.events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MoveUsed { pokemon, .. } => Some(pokemon.clone()),
            _ => None,
        })
        .collect()
}

/// Total damage the named Pokemon took from attacks this round.
pub fn damage_taken(bus: &EventBus, target_name: &str) -> u16 {
    bus.events()
        .iter()
        .map(|event| match event {
            BattleEvent::DamageDealt { target, damage, .. } if target == target_name => *damage,
            _ => 0,
        })
        .sum()
}

/// First seed below `limit` whose battle satisfies `predicate`.
pub fn find_seed(limit: u64, predicate: impl Fn(u64) -> bool) -> Option<u64> {
    (0..limit).find(|seed| predicate(*seed))
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
