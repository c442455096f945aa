//! Pokemon Battle Engine
//!
//! A deterministic, turn-based battle simulator. Two sides submit turns, the
//! engine orders and resolves them against a seeded random stream, and every
//! state change is narrated as a [`BattleEvent`]. Species and move reference
//! data are compiled into the crate at build time.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod config;
pub mod errors;
pub mod player;
pub mod pokedex;
pub mod pokemon;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-battle` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all core data definitions and static enums.
pub use schema::{
    // Supporting Types & Enums
    Ability,
    BaseStats,
    BonusEffect,
    Chance,
    ChargeCondition,
    Die,
    EffectTarget,
    Effectiveness,
    // Core Enums
    MoveCategory,
    // Core Data Structs
    MoveData,
    Nature,
    PokemonSpecies,
    PokemonType,
    StatChange,
    StatType,
    StatusEffect,
    Terrain,
    VolatileEffect,
    Weather,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine and state.
pub use battle::commands::PlayerTarget;
pub use battle::engine::BattleEngine;
pub use battle::observer::{BattleObserver, RecordingObserver};
pub use battle::rng::BattleRng;
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState};
pub use battle::turn::{Action, Turn};
pub use config::{BattleConfig, BattleType};

// Core runtime types for a battle.
pub use player::BattlePlayer;
pub use pokemon::{MoveInstance, PokemonInst, StatusCondition};

// Primary data access functions.
pub use pokedex::{get_move_data, get_species_data, DataRepository, Pokedex};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, MoveDataError,
    SpeciesDataError, TeamError,
};
