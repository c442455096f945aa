// Pokemon Battle Schema - Shared type definitions
// This crate contains the static reference data shared between the
// pokemon-battle crate and its build script, enabling the use of
// postcard for compiled game data.

// Re-export the main types
pub use battle_data::*;
pub use move_types::*;
pub use nature::*;
pub use pokedex_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod move_types;
pub mod nature;
pub mod pokedex_data;
pub mod pokemon_types;
pub mod species_data;
