//! Builds the demo cavern and wires its content into the parser.
//!
//! Besides laying out rooms, items and creatures, world generation is the
//! content layer the grammar's runtime-injection interface exists for: any
//! item whose name the compiled grammar doesn't already cover gets a rule
//! binding it to `<PickUpAble>`, so every placed object is addressable the
//! moment the world loads.

use anyhow::{Context, Result};
use log::info;

use crate::creature::Creature;
use crate::item::Item;
use crate::parser::Parser;
use crate::world::{CavernWorld, Direction, Portal, Room};

/// Generate the four-room cavern, returning a world positioned at the
/// starting room.
///
/// # Errors
/// - if room linking references a bad id (a bug in this function)
/// - if binding an item name into the grammar conflicts with an existing rule
pub fn generate_world(parser: &mut Parser) -> Result<CavernWorld> {
    let mut world = CavernWorld::new();

    let mut cavern = Room::new("large cavern", "You are in a large, dank cavern.")
        .with_first_visit_desc("Dazed, you awaken to find yourself in a large, dank cavern.");
    cavern.items.add(Item::new("torch"));
    cavern.items.add(Item::weapon("sword", 10));
    cavern.items.add(Item::armor("shield", 5));
    cavern.items.add(Item::new("key"));

    let mut dragon_room = Room::new(
        "dragon room",
        "You enter a small cave with a low ceiling. Inside there is a dank smell, and a low, \
         rumbling noise coming from one corner of the room. Wary, you glance over and see a \
         snout poking out from the side of a pile of rocks.",
    );
    dragon_room.add_creature(Creature::new("dragon", 20, 35, 5).with_attack_verb("slash"));

    let mut treasure_room = Room::new(
        "treasure room",
        "You are in a room filled with treasure. Gold coins cover the floor, rubies and \
         precious gems fill several wooden crates scattered around the room.",
    );
    treasure_room.add_creature(Creature::new("troll", 20, 15, 2).with_attack_verb("hit"));
    treasure_room.items.add(Item::consumable("potion", 50));

    let mut water_room = Room::new("water room", "You are on a narrow ledge surrounded by water.")
        .with_first_visit_desc(
            "You climb through a low, narrow passageway and stumble onto a narrow ledge, \
             surrounded by water.",
        );
    water_room.add_creature(Creature::new("rat", 5, 12, 1).with_attack_verb("bite"));
    // The lantern's name is not in the compiled grammar; it relies on the
    // runtime rule injection below.
    water_room.items.add(Item::new("lantern"));

    let cavern_id = world.add_room(cavern);
    let dragon_id = world.add_room(dragon_room);
    let treasure_id = world.add_room(treasure_room);
    let water_id = world.add_room(water_room);

    world.link(cavern_id, Direction::North, water_id)?;
    world.link(cavern_id, Direction::West, dragon_id)?;
    world.link(cavern_id, Direction::East, treasure_id)?;
    world.set_portal(
        cavern_id,
        Direction::East,
        Portal {
            name: "iron gate".to_string(),
            key_name: "key".to_string(),
            locked: true,
        },
    )?;

    world.current = cavern_id;
    info!("world generated: {} rooms", world.rooms.len());

    bind_item_names(parser, &world)?;
    Ok(world)
}

/// Make sure every placed item is covered by the grammar, injecting a
/// `<PickUpAble>` rule for any name the parser doesn't know yet.
fn bind_item_names(parser: &mut Parser, world: &CavernWorld) -> Result<()> {
    for room in &world.rooms {
        for item in room.items.items() {
            if parser.has_rule(&item.name) {
                continue;
            }
            parser
                .add_new_rule(&item.name, "<PickUpAble>")
                .with_context(|| format!("while binding item name \"{}\" into the grammar", item.name))?;
            info!("bound new item name \"{}\" as <PickUpAble>", item.name);
        }
    }
    Ok(())
}
