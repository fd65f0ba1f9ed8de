#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const CAVERN_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod creature;
pub mod item;
pub mod parser;
pub mod player;
pub mod repl;
pub mod style;
pub mod world;
pub mod worldgen;

// Re-exports for convenience
pub use command::{Command, validate_command_table};
pub use creature::Creature;
pub use item::Item;
pub use parser::{ParseOutcome, Parser};
pub use player::Player;
pub use repl::run_repl;
pub use world::{CavernWorld, Direction, Room, RoomId};
pub use worldgen::generate_world;
