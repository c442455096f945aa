pub mod calculators;
pub mod commands;
pub mod conditions;
pub mod engine;
pub mod move_effects;
pub mod observer;
pub mod rng;
pub mod state;
pub mod stats;
pub mod turn;

#[cfg(test)]
mod tests;
