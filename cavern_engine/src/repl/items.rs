//! Handlers for picking up, holding, dropping and consuming items.

use anyhow::Result;

use crate::player::HAND_CAPACITY;
use crate::style::GameStyle;
use crate::world::{CavernWorld, capitalize};

/// Move a named item from the current room into the player's inventory.
///
/// # Errors
/// - if the current room id is stale
pub fn pickup_handler(world: &mut CavernWorld, name: &str) -> Result<()> {
    if world.player.inventory.get(name).is_some() {
        println!("You already have {} {name} in your inventory.", crate::item::article_for(name));
        return Ok(());
    }

    let room_name = world.current_room()?.name.clone();
    let Some(item) = world.current_room_mut()?.items.remove(name) else {
        println!("{}", format!("No {name} found in the {room_name}.").error_style());
        return Ok(());
    };

    println!("{} was added to your inventory.", capitalize(&item.describe()).item_style());
    world.player.inventory.add(item);
    list_inventory_handler(world);
    Ok(())
}

/// Move a named item from the player's inventory (or the room floor) into
/// the player's hands, where its bonuses apply.
///
/// # Errors
/// - if the current room id is stale
pub fn hold_handler(world: &mut CavernWorld, name: &str) -> Result<()> {
    if world.player.hands.get(name).is_some() {
        println!("You are already holding the {name}.");
        return Ok(());
    }
    if world.player.hands.len() >= HAND_CAPACITY {
        println!("{}", "You cannot hold more than two items. Drop something first.".error_style());
        return Ok(());
    }

    let item = match world.player.inventory.remove(name) {
        Some(item) => item,
        None => match world.current_room_mut()?.items.remove(name) {
            Some(item) => item,
            None => {
                println!("{}", format!("No {name} found.").error_style());
                return Ok(());
            },
        },
    };

    println!("You are now holding {}.", item.describe().item_style());
    world.player.hands.add(item);
    holding_handler(world);
    Ok(())
}

/// Return a named item from inventory or hands to the current room's floor.
///
/// # Errors
/// - if the current room id is stale
pub fn drop_handler(world: &mut CavernWorld, name: &str) -> Result<()> {
    let item = world
        .player
        .inventory
        .remove(name)
        .or_else(|| world.player.hands.remove(name));

    let Some(item) = item else {
        println!("{}", format!("You have no {name} to drop.").error_style());
        return Ok(());
    };

    println!("You dropped the {}.", item.name.clone().item_style());
    world.current_room_mut()?.items.add(item);
    Ok(())
}

/// Dump everything the player carries and holds onto the floor.
///
/// # Errors
/// - if the current room id is stale
pub fn drop_all_handler(world: &mut CavernWorld) -> Result<()> {
    let mut dropped = world.player.inventory.drain();
    dropped.extend(world.player.hands.drain());

    if dropped.is_empty() {
        println!("You have nothing to drop.");
        return Ok(());
    }

    println!("You drop everything you were carrying.");
    let room = world.current_room_mut()?;
    for item in dropped {
        room.items.add(item);
    }
    Ok(())
}

/// Consume a healing item from the player's inventory.
///
/// # Errors
/// - never fails today; kept fallible to match the other item handlers
pub fn consume_handler(world: &mut CavernWorld, name: &str) -> Result<()> {
    let Some(item) = world.player.inventory.get(name) else {
        println!("{}", format!("You have no {name} to consume.").error_style());
        return Ok(());
    };

    let Some(heal) = item.heal else {
        println!("{}", format!("You can't consume the {name}.").error_style());
        return Ok(());
    };

    world.player.inventory.remove(name);
    let hp = world.player.heal(heal);
    println!("Consumed {name}. Health is now: {hp}.");
    Ok(())
}

/// List the items the player currently holds in hand.
pub fn holding_handler(world: &CavernWorld) {
    println!("{}", "Holding:".subheading_style());
    if world.player.hands.is_empty() {
        println!("  nothing");
        return;
    }
    for item in world.player.hands.items() {
        println!("  {}", item.describe().item_style());
    }
}

/// List the contents of the player's inventory.
pub fn list_inventory_handler(world: &CavernWorld) {
    println!("{}", "Inventory:".subheading_style());
    if world.player.inventory.is_empty() {
        println!("  nothing");
        return;
    }
    for item in world.player.inventory.items() {
        println!("  {}", item.describe().item_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::world::Room;

    fn world_with_floor_items() -> CavernWorld {
        let mut world = CavernWorld::new();
        let mut cavern = Room::new("large cavern", "A cavern.");
        cavern.items.add(Item::weapon("sword", 10));
        cavern.items.add(Item::armor("shield", 5));
        cavern.items.add(Item::consumable("potion", 50));
        cavern.items.add(Item::new("torch"));
        let id = world.add_room(cavern);
        world.current = id;
        world
    }

    #[test]
    fn pickup_moves_item_from_room_to_inventory() {
        let mut world = world_with_floor_items();
        pickup_handler(&mut world, "sword").unwrap();
        assert!(world.player.inventory.get("sword").is_some());
        assert!(world.current_room().unwrap().items.get("sword").is_none());
    }

    #[test]
    fn pickup_of_carried_item_leaves_room_alone() {
        let mut world = world_with_floor_items();
        world.player.inventory.add(Item::new("torch"));
        pickup_handler(&mut world, "torch").unwrap();
        // The floor copy must stay put; only one torch in the pack.
        assert!(world.current_room().unwrap().items.get("torch").is_some());
        assert_eq!(world.player.inventory.len(), 1);
    }

    #[test]
    fn pickup_of_absent_item_is_a_noop() {
        let mut world = world_with_floor_items();
        pickup_handler(&mut world, "lantern").unwrap();
        assert!(world.player.inventory.is_empty());
    }

    #[test]
    fn hold_prefers_inventory_then_floor() {
        let mut world = world_with_floor_items();
        world.player.inventory.add(Item::new("torch"));
        hold_handler(&mut world, "torch").unwrap();
        assert!(world.player.hands.get("torch").is_some());
        // The inventory copy was taken, not the floor copy.
        assert!(world.current_room().unwrap().items.get("torch").is_some());

        hold_handler(&mut world, "sword").unwrap();
        assert!(world.player.hands.get("sword").is_some());
        assert!(world.current_room().unwrap().items.get("sword").is_none());
    }

    #[test]
    fn hands_are_limited_to_two_items() {
        let mut world = world_with_floor_items();
        hold_handler(&mut world, "sword").unwrap();
        hold_handler(&mut world, "shield").unwrap();
        hold_handler(&mut world, "torch").unwrap();
        assert_eq!(world.player.hands.len(), 2);
        assert!(world.current_room().unwrap().items.get("torch").is_some());
    }

    #[test]
    fn drop_returns_item_to_the_room() {
        let mut world = world_with_floor_items();
        hold_handler(&mut world, "sword").unwrap();
        drop_handler(&mut world, "sword").unwrap();
        assert!(world.player.hands.is_empty());
        assert!(world.current_room().unwrap().items.get("sword").is_some());
    }

    #[test]
    fn drop_all_empties_pack_and_hands() {
        let mut world = world_with_floor_items();
        pickup_handler(&mut world, "torch").unwrap();
        hold_handler(&mut world, "sword").unwrap();
        drop_all_handler(&mut world).unwrap();
        assert!(world.player.inventory.is_empty());
        assert!(world.player.hands.is_empty());
        assert_eq!(world.current_room().unwrap().items.len(), 4);
    }

    #[test]
    fn consume_heals_and_removes_the_item() {
        let mut world = world_with_floor_items();
        world.player.hp = 40;
        pickup_handler(&mut world, "potion").unwrap();
        consume_handler(&mut world, "potion").unwrap();
        assert_eq!(world.player.hp, 90);
        assert!(world.player.inventory.get("potion").is_none());
    }

    #[test]
    fn consume_refuses_non_consumables() {
        let mut world = world_with_floor_items();
        pickup_handler(&mut world, "torch").unwrap();
        consume_handler(&mut world, "torch").unwrap();
        assert!(world.player.inventory.get("torch").is_some());
        assert_eq!(world.player.hp, 100);
    }
}
