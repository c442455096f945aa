use crate::battle::conditions::VolatileStatusSet;
use crate::battle::stats::{apply_stat_stage_multiplier, calculate_stats, stat_index};
use crate::errors::{BattleResult, TeamError};
use crate::pokedex::DataRepository;
use schema::{Ability, MoveData, Nature, PokemonSpecies, PokemonType, StatType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MAX_MOVES: usize = 4;
pub const MAX_LEVEL: u8 = 100;
pub const MAX_STAT_STAGE: i8 = 6;
/// Ceiling for the badly-poisoned damage counter.
pub const MAX_TOXIC_COUNTER: u8 = 15;

/// Persistent status. Mutually exclusive; only sleep and bad poison carry a counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    #[default]
    Healthy,
    Paralysed,
    Poisoned,
    BadlyPoisoned {
        counter: u8,
    },
    Burned,
    Frozen,
    Asleep {
        turns_remaining: u8,
    },
    Fainted,
}

impl StatusCondition {
    pub fn is_healthy(&self) -> bool {
        matches!(self, StatusCondition::Healthy)
    }

    pub fn is_fainted(&self) -> bool {
        matches!(self, StatusCondition::Fainted)
    }

    /// Same condition regardless of any counter it carries.
    pub fn same_kind(&self, other: &StatusCondition) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCondition::Healthy => "healthy",
            StatusCondition::Paralysed => "paralysis",
            StatusCondition::Poisoned => "poison",
            StatusCondition::BadlyPoisoned { .. } => "bad poison",
            StatusCondition::Burned => "burn",
            StatusCondition::Frozen => "freeze",
            StatusCondition::Asleep { .. } => "sleep",
            StatusCondition::Fainted => "faint",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with its base PP
    pub fn new(data: MoveData) -> Self {
        let pp = data.base_pp;
        Self { data, pp }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

}

/// A creature taking part in a battle.
///
/// Stats are derived on demand from the species, level, IVs, EVs and nature
/// and are never cached, so stage changes are always reflected. Current HP and
/// status are kept consistent: HP is zero exactly when the status is fainted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub species: PokemonSpecies,
    pub nickname: Option<String>,
    pub level: u8,
    pub nature: Nature,
    pub ability: Ability,
    pub ivs: [u8; 6], // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub evs: [u8; 6], // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    /// Current types; starts as the species' types.
    pub types: Vec<PokemonType>,
    pub moves: Vec<MoveInstance>,
    pub volatile_status: VolatileStatusSet,
    current_hp: u16,
    status: StatusCondition,
    stat_stages: BTreeMap<StatType, i8>,
}

impl PokemonInst {
    /// Create a new instance at full HP with the species' first ability.
    pub fn new(
        species: PokemonSpecies,
        level: u8,
        nature: Nature,
        moves: Vec<MoveData>,
    ) -> Result<Self, TeamError> {
        if level == 0 || level > MAX_LEVEL {
            return Err(TeamError::InvalidLevel(level));
        }
        if moves.len() > MAX_MOVES {
            return Err(TeamError::TooManyMoves {
                count: moves.len(),
                max: MAX_MOVES,
            });
        }
        let ability = species
            .abilities
            .first()
            .copied()
            .ok_or_else(|| TeamError::InvalidAbility {
                species: species.name.clone(),
                ability: "none".to_string(),
            })?;

        let mut pokemon = Self {
            types: species.types.clone(),
            species,
            nickname: None,
            level,
            nature,
            ability,
            ivs: [0; 6],
            evs: [0; 6],
            moves: moves.into_iter().map(MoveInstance::new).collect(),
            volatile_status: VolatileStatusSet::new(),
            current_hp: 0,
            status: StatusCondition::Healthy,
            stat_stages: BTreeMap::new(),
        };
        pokemon.current_hp = pokemon.max_hp();
        Ok(pokemon)
    }

    /// Builds a creature from named data, resolving unknown moves to placeholders.
    pub fn from_repository(
        repository: &dyn DataRepository,
        species_name: &str,
        level: u8,
        nature: Nature,
        move_names: &[&str],
    ) -> BattleResult<Self> {
        let species = repository.species(species_name)?;
        let moves = move_names
            .iter()
            .map(|name| repository.move_data(name))
            .collect();
        Ok(Self::new(species, level, nature, moves)?)
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    /// Sets IVs and refills HP to the new maximum.
    pub fn with_ivs(mut self, ivs: [u8; 6]) -> Self {
        self.ivs = ivs;
        self.current_hp = self.max_hp();
        self
    }

    /// Sets EVs and refills HP to the new maximum.
    pub fn with_evs(mut self, evs: [u8; 6]) -> Self {
        self.evs = evs;
        self.current_hp = self.max_hp();
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Result<Self, TeamError> {
        if !self.species.has_ability(ability) {
            return Err(TeamError::InvalidAbility {
                species: self.species.name.clone(),
                ability: ability.to_string(),
            });
        }
        self.ability = ability;
        Ok(self)
    }

    /// Nickname if one was given, otherwise the species name.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species.name)
    }

    fn stats(&self) -> [u16; 6] {
        calculate_stats(
            self.species.base_stats.as_array(),
            self.ivs,
            self.evs,
            self.level,
            self.nature,
        )
    }

    pub fn max_hp(&self) -> u16 {
        self.stats()[0]
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    /// Stat before stage modifiers. Accuracy has no stored value and reads as 0.
    pub fn stat(&self, stat: StatType) -> u16 {
        stat_index(stat).map_or(0, |i| self.stats()[i])
    }

    /// Stat after the current stage multiplier.
    pub fn modified_stat(&self, stat: StatType) -> u16 {
        apply_stat_stage_multiplier(self.stat(stat), self.stat_stage(stat))
    }

    pub fn status(&self) -> StatusCondition {
        self.status
    }

    pub fn is_fainted(&self) -> bool {
        self.status.is_fainted()
    }

    /// Sets HP, clamped to `0..=max_hp`. Reaching zero faints the creature;
    /// HP above zero lifts a fainted status.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
        if self.current_hp == 0 {
            self.status = StatusCondition::Fainted;
        } else if self.status.is_fainted() {
            self.status = StatusCondition::Healthy;
        }
    }

    /// Apply damage. Returns true if this hit made the creature faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        if self.is_fainted() {
            return false;
        }
        self.set_hp(self.current_hp.saturating_sub(damage));
        self.is_fainted()
    }

    /// Restores HP up to the maximum. Fainted creatures cannot be healed.
    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let before = self.current_hp;
        self.set_hp(self.current_hp.saturating_add(amount));
        self.current_hp - before
    }

    /// Replaces the persistent status. Setting `Fainted` drops HP to zero; a
    /// creature at zero HP stays fainted. Returns whether the status changed.
    pub fn set_status(&mut self, status: StatusCondition) -> bool {
        if status.is_fainted() {
            let changed = !self.is_fainted();
            self.current_hp = 0;
            self.status = StatusCondition::Fainted;
            return changed;
        }
        if self.current_hp == 0 || self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    pub fn stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    pub fn set_stat_stage(&mut self, stat: StatType, stage: i8) {
        let clamped = stage.clamp(-MAX_STAT_STAGE, MAX_STAT_STAGE);
        if clamped == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped);
        }
    }

    /// Adds `delta` to a stage, clamped to -6..=6. Returns (old, new).
    pub fn change_stat_stage(&mut self, stat: StatType, delta: i8) -> (i8, i8) {
        let old = self.stat_stage(stat);
        let new = old
            .saturating_add(delta)
            .clamp(-MAX_STAT_STAGE, MAX_STAT_STAGE);
        self.set_stat_stage(stat, new);
        (old, new)
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// Called when the creature is recalled. Volatile conditions do not
    /// survive leaving the field; stat stages stay with the creature.
    pub fn leave_field(&mut self) {
        self.volatile_status.clear();
    }
}

impl fmt::Display for PokemonInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Lv.{} ({}/{} HP)",
            self.display_name(),
            self.level,
            self.current_hp,
            self.max_hp()
        )
    }
}
