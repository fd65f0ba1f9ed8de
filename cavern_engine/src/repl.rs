//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop: each line of player input goes
//! through the grammar [`Parser`], the resulting marker and argument groups
//! map onto a [`Command`], and the matching handler mutates the
//! [`CavernWorld`].

pub mod combat;
mod input;
pub mod items;
pub mod movement;
pub mod system;

use anyhow::Result;
use log::{info, warn};

use crate::command::Command;
use crate::parser::{ParseOutcome, Parser};
use crate::style::GameStyle;
use crate::world::CavernWorld;

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read-eval-print loop until the player quits or dies.
///
/// Handles prompting, parsing, dispatching to the handler modules, and
/// advancing the turn counter. The parser is borrowed mutably alongside the
/// world so future content hooks can keep injecting rules between turns.
///
/// # Errors
/// - Propagates failures from handlers, such as a stale current-room id.
pub fn run_repl(world: &mut CavernWorld, parser: &mut Parser) -> Result<()> {
    let mut input_manager = InputManager::new();

    loop {
        let prompt = format!(
            "\n[Turn: {}|HP: {}/{}]>> ",
            world.turn_count, world.player.hp, world.player.max_hp
        )
        .prompt_style()
        .to_string();

        let input = match input_manager.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => "quit".to_string(),
            Ok(InputEvent::Interrupted) => {
                println!("Command canceled.");
                continue;
            },
            Err(err) => {
                warn!("failed to read input: {err}");
                println!("{}", "Failed to read input. Try again.".error_style());
                continue;
            },
        };

        let command = match parser.parse(&input) {
            ParseOutcome::Command { name, args } => Command::from_parse(&name, &args),
            ParseOutcome::Invalid => None,
        };
        let Some(command) = command else {
            println!("{}", "User input not recognized.".error_style());
            continue;
        };

        world.turn_count += 1;
        info!("turn {}: executing {command:?}", world.turn_count);

        let control = match command {
            Command::Move(words) => {
                movement::move_handler(world, &words)?;
                ReplControl::Continue
            },
            Command::Fight { target, verb } => combat::fight_handler(world, &target, &verb)?,
            Command::Consume(name) => {
                items::consume_handler(world, &name)?;
                ReplControl::Continue
            },
            Command::Pickup(name) => {
                items::pickup_handler(world, &name)?;
                ReplControl::Continue
            },
            Command::Drop(name) => {
                items::drop_handler(world, &name)?;
                ReplControl::Continue
            },
            Command::DropAll => {
                items::drop_all_handler(world)?;
                ReplControl::Continue
            },
            Command::Hold(name) => {
                items::hold_handler(world, &name)?;
                ReplControl::Continue
            },
            Command::Holding => {
                items::holding_handler(world);
                ReplControl::Continue
            },
            Command::Inventory => {
                items::list_inventory_handler(world);
                ReplControl::Continue
            },
            Command::Describe => {
                system::describe_handler(world)?;
                ReplControl::Continue
            },
            Command::Info => {
                system::info_handler(world);
                ReplControl::Continue
            },
            Command::Help => {
                system::help_handler();
                ReplControl::Continue
            },
            Command::Quit => system::quit_handler(),
        };

        if let ReplControl::Quit = control {
            break;
        }
    }
    Ok(())
}
