use crate::{MoveData, PokemonSpecies};
use serde::{Deserialize, Serialize};

/// Everything the build script compiles into the crate. The position of a
/// record in its list is the value stored in the generated name index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokedexData {
    pub species: Vec<PokemonSpecies>,
    pub moves: Vec<MoveData>,
}

/// Lookup key shared by the build script and the runtime indexes.
pub fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}
