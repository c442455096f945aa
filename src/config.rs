use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleType {
    #[default]
    Singles,
    Doubles,
}

impl BattleType {
    /// Turns that must be pending before a round resolves on its own.
    pub fn turns_per_round(self) -> usize {
        match self {
            BattleType::Singles => 2,
            BattleType::Doubles => 4,
        }
    }
}

/// Tunable rules for a battle. Missing fields in a RON document fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub battle_type: BattleType,
    /// Rounds a newly set weather lasts.
    pub weather_duration: u8,
    /// Rounds a newly set terrain lasts.
    pub terrain_duration: u8,
    pub max_team_size: usize,
    pub max_moves: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            battle_type: BattleType::Singles,
            weather_duration: 5,
            terrain_duration: 5,
            max_team_size: 6,
            max_moves: 4,
        }
    }
}

impl BattleConfig {
    pub fn turns_per_round(&self) -> usize {
        self.battle_type.turns_per_round()
    }

    /// Live attack/switch actions a single side may have pending at once.
    pub fn actions_per_side(&self) -> usize {
        (self.turns_per_round() / 2).max(1)
    }

    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}
