//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! These are the defaults behind the serde config structs; a loaded config
//! overrides them per field.

mod enemies;
mod gameplay;
mod grid;
mod harness;
mod time;
mod ui;

pub use enemies::*;
pub use gameplay::*;
pub use grid::*;
pub use harness::*;
pub use time::*;
pub use ui::*;
