use crate::battle::move_effects::registry::attach_bonus_effect;
use crate::errors::{
    BattleEngineError, MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult,
};
use log::{error, warn};
use schema::{lookup_key, MoveData, PokedexData, PokemonSpecies};
use std::collections::HashMap;
use std::sync::LazyLock;

// Name indexes generated by build.rs (`SPECIES_INDEX`, `MOVE_INDEX`).
include!(concat!(env!("OUT_DIR"), "/generated_data.rs"));

static COMPILED_DATA: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/pokedex.bin"));

static COMPILED_POKEDEX: LazyLock<Pokedex> = LazyLock::new(|| {
    match postcard::from_bytes::<PokedexData>(COMPILED_DATA) {
        Ok(data) => Pokedex {
            data,
            index: PokedexIndex::Compiled,
        },
        Err(e) => {
            error!("Compiled pokedex could not be decoded: {}", e);
            Pokedex {
                data: PokedexData::default(),
                index: PokedexIndex::Runtime {
                    species: HashMap::new(),
                    moves: HashMap::new(),
                },
            }
        }
    }
});

/// Read-only source of species and move definitions. The engine only talks
/// to it while teams are being built.
pub trait DataRepository {
    fn species(&self, name: &str) -> SpeciesDataResult<PokemonSpecies>;

    /// Move definition with its registry bonus effect and target attached.
    fn try_move_data(&self, name: &str) -> MoveDataResult<MoveData>;

    /// Like [`DataRepository::try_move_data`], but an unknown name becomes a
    /// harmless placeholder move instead of an error.
    fn move_data(&self, name: &str) -> MoveData {
        match self.try_move_data(name) {
            Ok(data) => data,
            Err(err) => {
                warn!("{}; using a placeholder move", err);
                MoveData::placeholder(name)
            }
        }
    }
}

#[derive(Debug, Clone)]
enum PokedexIndex {
    /// Backed by the phf maps generated at build time.
    Compiled,
    Runtime {
        species: HashMap<String, usize>,
        moves: HashMap<String, usize>,
    },
}

#[derive(Debug, Clone)]
pub struct Pokedex {
    data: PokedexData,
    index: PokedexIndex,
}

impl Pokedex {
    /// The data compiled into the crate from `data/*.ron`.
    pub fn compiled() -> &'static Pokedex {
        &COMPILED_POKEDEX
    }

    /// Builds a repository from RON lists of species and moves.
    pub fn from_ron(species_source: &str, moves_source: &str) -> Result<Self, BattleEngineError> {
        let species: Vec<PokemonSpecies> = ron::from_str(species_source)
            .map_err(|e| SpeciesDataError::MalformedData(e.to_string()))?;
        let moves: Vec<MoveData> =
            ron::from_str(moves_source).map_err(|e| MoveDataError::MalformedData(e.to_string()))?;

        let mut species_index = HashMap::new();
        for (position, entry) in species.iter().enumerate() {
            if species_index
                .insert(lookup_key(&entry.name), position)
                .is_some()
            {
                return Err(SpeciesDataError::MalformedData(format!(
                    "duplicate species {}",
                    entry.name
                ))
                .into());
            }
        }
        let mut move_index = HashMap::new();
        for (position, entry) in moves.iter().enumerate() {
            if move_index.insert(lookup_key(&entry.name), position).is_some() {
                return Err(
                    MoveDataError::MalformedData(format!("duplicate move {}", entry.name)).into(),
                );
            }
        }

        Ok(Self {
            data: PokedexData { species, moves },
            index: PokedexIndex::Runtime {
                species: species_index,
                moves: move_index,
            },
        })
    }

    fn species_position(&self, key: &str) -> Option<usize> {
        match &self.index {
            PokedexIndex::Compiled => SPECIES_INDEX.get(key).copied(),
            PokedexIndex::Runtime { species, .. } => species.get(key).copied(),
        }
    }

    fn move_position(&self, key: &str) -> Option<usize> {
        match &self.index {
            PokedexIndex::Compiled => MOVE_INDEX.get(key).copied(),
            PokedexIndex::Runtime { moves, .. } => moves.get(key).copied(),
        }
    }

    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.data.species.iter().map(|s| s.name.as_str())
    }

    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.data.moves.iter().map(|m| m.name.as_str())
    }
}

impl DataRepository for Pokedex {
    fn species(&self, name: &str) -> SpeciesDataResult<PokemonSpecies> {
        self.species_position(&lookup_key(name))
            .and_then(|position| self.data.species.get(position))
            .cloned()
            .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
    }

    fn try_move_data(&self, name: &str) -> MoveDataResult<MoveData> {
        self.move_position(&lookup_key(name))
            .and_then(|position| self.data.moves.get(position))
            .cloned()
            .map(attach_bonus_effect)
            .ok_or_else(|| MoveDataError::MoveNotFound(name.to_string()))
    }
}

/// Species lookup against the compiled data.
pub fn get_species_data(name: &str) -> SpeciesDataResult<PokemonSpecies> {
    Pokedex::compiled().species(name)
}

/// Move lookup against the compiled data, falling back to a placeholder.
pub fn get_move_data(name: &str) -> MoveData {
    Pokedex::compiled().move_data(name)
}
