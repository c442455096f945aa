use schema::{lookup_key, MoveData, PokedexData, PokemonSpecies};
use std::collections::HashSet;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

const SPECIES_SOURCE: &str = "data/species.ron";
const MOVES_SOURCE: &str = "data/moves.ron";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={}", SPECIES_SOURCE);
    println!("cargo:rerun-if-changed={}", MOVES_SOURCE);
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR")?;

    let species: Vec<PokemonSpecies> = ron::from_str(&fs::read_to_string(SPECIES_SOURCE)?)
        .map_err(|e| format!("Failed to parse {}: {}", SPECIES_SOURCE, e))?;
    let moves: Vec<MoveData> = ron::from_str(&fs::read_to_string(MOVES_SOURCE)?)
        .map_err(|e| format!("Failed to parse {}: {}", MOVES_SOURCE, e))?;

    let species_keys = unique_keys(species.iter().map(|s| s.name.as_str()), SPECIES_SOURCE)?;
    let move_keys = unique_keys(moves.iter().map(|m| m.name.as_str()), MOVES_SOURCE)?;

    let compiled = PokedexData { species, moves };
    let bytes = postcard::to_allocvec(&compiled)
        .map_err(|e| format!("Failed to encode compiled data: {}", e))?;
    fs::write(Path::new(&out_dir).join("pokedex.bin"), bytes)?;

    let mut species_index = phf_codegen::Map::new();
    for (index, key) in species_keys.iter().enumerate() {
        species_index.entry(key.as_str(), &index.to_string());
    }
    let mut move_index = phf_codegen::Map::new();
    for (index, key) in move_keys.iter().enumerate() {
        move_index.entry(key.as_str(), &index.to_string());
    }

    let generated = format!(
        "/// Lowercase species name to its position in the compiled data.\n\
         static SPECIES_INDEX: phf::Map<&'static str, usize> = {};\n\n\
         /// Lowercase move name to its position in the compiled data.\n\
         static MOVE_INDEX: phf::Map<&'static str, usize> = {};\n",
        species_index.build(),
        move_index.build()
    );
    fs::write(Path::new(&out_dir).join("generated_data.rs"), generated)?;

    Ok(())
}

fn unique_keys<'a>(
    names: impl Iterator<Item = &'a str>,
    source: &str,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for name in names {
        let key = lookup_key(name);
        if !seen.insert(key.clone()) {
            return Err(format!("Duplicate entry '{}' in {}", name, source).into());
        }
        keys.push(key);
    }
    Ok(keys)
}
