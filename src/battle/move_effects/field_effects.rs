use crate::battle::commands::BattleCommand;
use crate::config::BattleConfig;
use schema::{Terrain, Weather};

pub(super) fn apply_weather_effect(weather: Weather, config: &BattleConfig) -> Vec<BattleCommand> {
    vec![BattleCommand::SetWeather {
        weather,
        turns: config.weather_duration,
    }]
}

pub(super) fn apply_terrain_effect(terrain: Terrain, config: &BattleConfig) -> Vec<BattleCommand> {
    vec![BattleCommand::SetTerrain {
        terrain,
        turns: config.terrain_duration,
    }]
}
