//! Command module
//!
//! Describes possible commands used during gameplay, and the closed mapping
//! from parser command markers onto them. Dispatch goes through this table
//! rather than any dynamic lookup; [`validate_command_table`] cross-checks it
//! against the grammar at startup so an unmapped marker is caught before the
//! first prompt.

use thiserror::Error;
use variantly;

use crate::parser::Parser;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, variantly::Variantly)]
pub enum Command {
    /// Candidate direction words captured by the grammar (the handler picks
    /// out the one that names a direction).
    #[variantly(rename = "move_cmd")]
    Move(Vec<String>),
    Fight {
        target: String,
        verb: String,
    },
    Consume(String),
    Pickup(String),
    Drop(String),
    DropAll,
    Hold(String),
    Holding,
    Inventory,
    Describe,
    Info,
    Help,
    Quit,
}

/// Every command marker name the table accepts.
pub const KNOWN_COMMANDS: &[&str] = &[
    "consume",
    "describe",
    "drop",
    "drop_all",
    "end_game",
    "fight",
    "help",
    "hold",
    "holding",
    "info",
    "list_inventory",
    "move",
    "pickup",
];

impl Command {
    /// Map a parsed (marker name, argument groups) pair onto a `Command`.
    ///
    /// Returns `None` for an unknown marker or for a known marker whose
    /// argument groups don't carry what its handler needs; the REPL treats
    /// both the same as an unparseable line.
    pub fn from_parse(name: &str, args: &[Vec<String>]) -> Option<Command> {
        let first_word = |group: usize| args.get(group)?.first().cloned();
        match name {
            "move" => Some(Command::Move(args.first().cloned()?)),
            "fight" => Some(Command::Fight {
                target: first_word(0)?,
                verb: first_word(1).unwrap_or_else(|| "attack".to_string()),
            }),
            "consume" => Some(Command::Consume(first_word(0)?)),
            "pickup" => Some(Command::Pickup(first_word(0)?)),
            "drop" => Some(Command::Drop(first_word(0)?)),
            "drop_all" => Some(Command::DropAll),
            "hold" => Some(Command::Hold(first_word(0)?)),
            "holding" => Some(Command::Holding),
            "list_inventory" => Some(Command::Inventory),
            "describe" => Some(Command::Describe),
            "info" => Some(Command::Info),
            "help" => Some(Command::Help),
            "end_game" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// The grammar emits a command marker this table cannot dispatch.
#[derive(Debug, Error)]
#[error("grammar emits command marker(s) with no handler: {0}")]
pub struct UnmappedMarkers(pub String);

/// Check every marker the grammar can emit against [`KNOWN_COMMANDS`].
///
/// # Errors
/// [`UnmappedMarkers`] naming each marker without a handler.
pub fn validate_command_table(parser: &Parser) -> Result<(), UnmappedMarkers> {
    let unmapped: Vec<String> = parser
        .command_markers()
        .into_iter()
        .filter(|marker| !KNOWN_COMMANDS.contains(&marker.as_str()))
        .collect();
    if unmapped.is_empty() {
        Ok(())
    } else {
        Err(UnmappedMarkers(unmapped.join(", ")))
    }
}
