//! Handlers for system commands: describe, info, help and quitting.

use anyhow::Result;
use textwrap::{fill, termwidth};

use crate::repl::ReplControl;
use crate::repl::items::list_inventory_handler;
use crate::style::GameStyle;
use crate::world::CavernWorld;

/// Print the current room's name and full description.
///
/// # Errors
/// - if the current room id is stale
pub fn describe_handler(world: &mut CavernWorld) -> Result<()> {
    let name = world.current_room()?.name.clone();
    let text = world.describe_current()?;
    println!("{}", name.room_style());
    println!("{}", fill(&text, termwidth()).description_style());
    Ok(())
}

/// Print the player's stats, then the inventory listing.
pub fn info_handler(world: &CavernWorld) {
    println!("{}", "Adventurer".subheading_style());
    println!("Health:  {}/{}", world.player.hp, world.player.max_hp);
    println!("Magic:   {}", world.player.mp);
    println!("Attack:  {}", world.player.attack_points());
    println!("Defense: {}", world.player.defense_points());
    list_inventory_handler(world);
}

/// Print a summary of the commands the grammar understands.
pub fn help_handler() {
    println!("{}", "Things you can try:".subheading_style());
    println!("  move/go north|south|east|west, up, down");
    println!("  describe / look around / where am i");
    println!("  pick up <item>, drop <item>, drop all");
    println!("  hold <item> (held items boost attack and defense)");
    println!("  drink <potion>");
    println!("  attack/fight/hit <creature>");
    println!("  inventory, holding?, info, help, quit");
}

/// End the session.
pub fn quit_handler() -> ReplControl {
    println!("Game Over");
    ReplControl::Quit
}
