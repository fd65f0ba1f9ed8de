//! Handler for player movement between rooms.

use anyhow::Result;

use crate::repl::system::describe_handler;
use crate::style::GameStyle;
use crate::world::{CavernWorld, Direction};

/// Move the player toward a direction named somewhere in the captured words.
///
/// The grammar hands over every surface word the move phrase consumed (e.g.
/// `["climb", "up"]`); the first word that names a direction wins. Locked
/// portals bar the way unless the player carries the matching key, in which
/// case passing through unlocks them for good.
///
/// # Errors
/// - if the current room id is stale
pub fn move_handler(world: &mut CavernWorld, words: &[String]) -> Result<()> {
    let Some(direction) = words.iter().find_map(|word| Direction::from_token(word)) else {
        println!("{}", format!("Cannot move \"{}\"!", words.join(" ")).error_style());
        return Ok(());
    };

    let (destination, portal) = {
        let room = world.current_room()?;
        match room.exits.get(&direction) {
            Some(exit) => (exit.to, exit.portal.clone()),
            None => {
                println!("{}", format!("Cannot move {direction}!").error_style());
                return Ok(());
            },
        }
    };

    if let Some(portal) = portal {
        if portal.locked {
            if world.player.carries(&portal.key_name) {
                println!("You unlock the {} with the {}.", portal.name, portal.key_name);
                if let Some(exit) = world.current_room_mut()?.exits.get_mut(&direction) {
                    if let Some(p) = exit.portal.as_mut() {
                        p.locked = false;
                    }
                }
            } else {
                println!(
                    "{}",
                    format!(
                        "Cannot move {direction}, the {} is locked and requires a {} to unlock.",
                        portal.name, portal.key_name
                    )
                    .error_style()
                );
                return Ok(());
            }
        }
    }

    world.current = destination;
    describe_handler(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::world::{Portal, Room, RoomId};

    fn gated_world() -> CavernWorld {
        let mut world = CavernWorld::new();
        let a = world.add_room(Room::new("large cavern", "A cavern."));
        let b = world.add_room(Room::new("treasure room", "Treasure everywhere."));
        world.link(a, Direction::East, b).unwrap();
        world
            .set_portal(
                a,
                Direction::East,
                Portal {
                    name: "iron gate".to_string(),
                    key_name: "key".to_string(),
                    locked: true,
                },
            )
            .unwrap();
        world.current = a;
        world
    }

    #[test]
    fn moves_through_plain_exit() {
        let mut world = CavernWorld::new();
        let a = world.add_room(Room::new("a", "A."));
        let b = world.add_room(Room::new("b", "B."));
        world.link(a, Direction::North, b).unwrap();
        world.current = a;

        move_handler(&mut world, &["north".to_string()]).unwrap();
        assert_eq!(world.current, b);
    }

    #[test]
    fn scans_captured_words_for_the_direction() {
        let mut world = CavernWorld::new();
        let a = world.add_room(Room::new("a", "A."));
        let b = world.add_room(Room::new("b", "B."));
        world.link(a, Direction::Above, b).unwrap();
        world.current = a;

        move_handler(&mut world, &["climb".to_string(), "up".to_string()]).unwrap();
        assert_eq!(world.current, b);
    }

    #[test]
    fn locked_portal_blocks_without_key() {
        let mut world = gated_world();
        move_handler(&mut world, &["east".to_string()]).unwrap();
        assert_eq!(world.current, RoomId(0));
    }

    #[test]
    fn key_unlocks_portal_permanently() {
        let mut world = gated_world();
        world.player.inventory.add(Item::new("key"));

        move_handler(&mut world, &["east".to_string()]).unwrap();
        assert_eq!(world.current, RoomId(1));

        let gate = world.rooms[0].exits[&Direction::East].portal.as_ref().unwrap();
        assert!(!gate.locked);
    }

    #[test]
    fn unknown_direction_word_is_refused() {
        let mut world = gated_world();
        move_handler(&mut world, &["sideways".to_string()]).unwrap();
        assert_eq!(world.current, RoomId(0));
    }
}
