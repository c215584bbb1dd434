//! Simulation engine for PERILUNE.
//!
//! Owns the hecs ECS world, runs the per-tick system pipeline (spawn,
//! level script, aim, gravity, collision, cleanup, win check), and
//! produces `GameSnapshot`s. Completely headless, enabling deterministic
//! testing.

pub mod collision;
pub mod engine;
pub mod level;
pub mod systems;
pub mod world_setup;

pub use engine::{Game, GameConfig};
pub use perilune_core as core;

#[cfg(test)]
mod tests;
