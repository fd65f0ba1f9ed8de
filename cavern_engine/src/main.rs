//! ** Cavern **
//! A small cave-crawl adventure driven by a grammar-rewrite parser.

use cavern_engine::repl::system::describe_handler;
use cavern_engine::{Parser, generate_world, run_repl, validate_command_table};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: compiling command grammar...");
    let mut parser = Parser::with_default_rules().context("while compiling the default grammar")?;
    validate_command_table(&parser).context("while checking grammar markers against the command table")?;
    info!("grammar compiled; {} command markers", parser.command_markers().len());

    let mut world = generate_world(&mut parser).context("while generating the cavern")?;
    info!("world ready, starting the game");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush()?;

    println!("{:^84}", "CAVERN: A DIM AND DANK ADVENTURE".bright_yellow().underline());
    println!();
    describe_handler(&mut world)?;

    run_repl(&mut world, &mut parser)
}
