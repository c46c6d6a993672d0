//! Grid-locked dungeon crawler gameplay core.
//!
//! Actors live on a square grid of cells and act one discrete step at a
//! time: the player moves and turns in 90 degree increments and strikes
//! along its facing, enemies perceive, chase, back off and strike on their
//! own timers. Rendering, physics and input devices belong to the host,
//! which talks to the core through `WorldQuery`, `PathSolver` and the
//! `GameEngine` API.

pub mod components;
pub mod config;
pub mod constants;
pub mod direction;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod occupancy;
pub mod pathfinding;
pub mod queries;
pub mod spawning;
pub mod systems;
pub mod tile_map;
pub mod time_system;
pub mod traversal;
pub mod ui;
pub mod world_query;

#[cfg(test)]
mod test_support;

pub use config::GameConfig;
pub use engine::{GameEngine, GameState};
pub use events::GameEvent;
pub use systems::player_input::PlayerIntent;
pub use tile_map::TileMap;
