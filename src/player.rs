use crate::errors::{ActionError, TeamError};
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

pub const MAX_TEAM_SIZE: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattlePlayer {
    // A unique identifier for the side, e.g. a user id or "AI_YoungsterJoey".
    pub player_id: String,
    pub player_name: String,

    // The player's team of up to 6 Pokémon, in party order.
    pub team: Vec<PokemonInst>,

    // The index of the Pokémon in `team` that is currently active.
    pub active_pokemon_index: usize,
}

impl BattlePlayer {
    pub fn new(
        player_id: String,
        player_name: String,
        team: Vec<PokemonInst>,
    ) -> Result<Self, TeamError> {
        Self::with_team_limit(player_id, player_name, team, MAX_TEAM_SIZE)
    }

    /// Like [`BattlePlayer::new`] with a custom team size limit.
    pub fn with_team_limit(
        player_id: String,
        player_name: String,
        team: Vec<PokemonInst>,
        max_team_size: usize,
    ) -> Result<Self, TeamError> {
        if team.is_empty() {
            return Err(TeamError::EmptyTeam);
        }
        if team.len() > max_team_size {
            return Err(TeamError::TeamTooLarge {
                size: team.len(),
                max: max_team_size,
            });
        }
        Ok(Self {
            player_id,
            player_name,
            team,
            active_pokemon_index: 0,
        })
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.team.get(self.active_pokemon_index)
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.team.get_mut(self.active_pokemon_index)
    }

    /// Checks that `new_index` names a team member able to come in.
    pub fn validate_switch(&self, new_index: usize) -> Result<(), ActionError> {
        let Some(target) = self.team.get(new_index) else {
            return Err(ActionError::InvalidPokemonIndex(new_index));
        };
        if new_index == self.active_pokemon_index {
            return Err(ActionError::SwitchTargetAlreadyActive(new_index));
        }
        if target.is_fainted() {
            return Err(ActionError::SwitchTargetFainted(new_index));
        }
        Ok(())
    }

    /// Recalls the active Pokémon and sends in the one at `new_index`. The
    /// outgoing Pokémon loses its volatile conditions.
    pub fn switch_pokemon(&mut self, new_index: usize) -> Result<(), ActionError> {
        self.validate_switch(new_index)?;
        if let Some(outgoing) = self.active_pokemon_mut() {
            outgoing.leave_field();
        }
        self.active_pokemon_index = new_index;
        Ok(())
    }

    pub fn all_fainted(&self) -> bool {
        self.team.iter().all(PokemonInst::is_fainted)
    }

    /// True if a benched, non-fainted Pokémon could replace the active one.
    pub fn has_non_fainted_reserve(&self) -> bool {
        self.team
            .iter()
            .enumerate()
            .any(|(i, pokemon)| i != self.active_pokemon_index && !pokemon.is_fainted())
    }

    /// Team indexes that are valid switch targets right now.
    pub fn switch_options(&self) -> Vec<usize> {
        (0..self.team.len())
            .filter(|&i| self.validate_switch(i).is_ok())
            .collect()
    }
}
