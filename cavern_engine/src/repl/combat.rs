//! Turn-based combat between the player and a single creature.

use anyhow::Result;
use log::info;
use rand::Rng;

use crate::repl::ReplControl;
use crate::repl::system::quit_handler;
use crate::style::GameStyle;
use crate::world::CavernWorld;

/// Resolve one round of combat against a named creature in the current room.
///
/// The player swings first, using the verb the grammar captured; if the
/// creature survives it strikes back. Damage on both sides is a random roll
/// up to the attacker's attack points minus a roll up to the defender's
/// defense points, floored at zero.
///
/// Returns [`ReplControl::Quit`] if the round kills the player.
///
/// # Errors
/// - if the current room id is stale
pub fn fight_handler(world: &mut CavernWorld, target: &str, verb: &str) -> Result<ReplControl> {
    let player_attack = world.player.attack_points();
    let player_defense = world.player.defense_points();
    let player_hit_pct = world.player.hit_pct;

    let room = world.current_room_mut()?;
    let Some(creature) = room.creature_mut(target) else {
        println!("{}", format!("There is no {target} here to fight.").error_style());
        return Ok(ReplControl::Continue);
    };

    if !creature.alive {
        println!(
            "You {verb} the rotting carcass of the {target}. It does not respond.",
        );
        return Ok(ReplControl::Continue);
    }

    let mut rng = rand::rng();

    // Player's swing.
    if rng.random_bool(player_hit_pct) {
        let damage = (rng.random_range(0..=player_attack)
            - rng.random_range(0..=creature.defense))
        .max(0);
        creature.hp -= damage;
        info!("player hits {target} for {damage} ({} hp left)", creature.hp);

        if creature.hp <= 0 {
            creature.alive = false;
            println!("{}", format!("You {verb} the {target}, killing it!").combat_style());
            return Ok(ReplControl::Continue);
        }
        if damage == 0 {
            println!("Your {verb} glances off the {target}.");
        } else {
            println!("{}", format!("You {verb} the {target} for {damage} damage.").combat_style());
        }
    } else {
        println!("You miss the {target} spectacularly.");
    }

    // The creature's riposte. Pull its stats into locals before touching the
    // player so the room borrow can end.
    let creature_attack = creature.attack;
    let creature_hit_pct = creature.hit_pct;
    let creature_verb = creature.attack_verb.clone();

    if rng.random_bool(creature_hit_pct) {
        let damage = (rng.random_range(0..=creature_attack)
            - rng.random_range(0..=player_defense))
        .max(0);
        world.player.hp -= damage;
        info!("{target} hits player for {damage} ({} hp left)", world.player.hp);

        if world.player.hp <= 0 {
            world.player.alive = false;
            println!(
                "{}",
                format!("The {target} {creature_verb}s you for {damage} damage. You collapse and die.")
                    .combat_style()
            );
            return Ok(quit_handler());
        }
        if damage == 0 {
            println!("The {target}'s {creature_verb} glances off you.");
        } else {
            println!(
                "{}",
                format!("The {target} {creature_verb}s you for {damage} damage!").combat_style()
            );
        }
    } else {
        println!("The {target} misses you, preparing to strike again.");
    }

    Ok(ReplControl::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use crate::world::Room;

    fn arena_with(creature: Creature) -> CavernWorld {
        let mut world = CavernWorld::new();
        let mut room = Room::new("arena", "A bare arena.");
        room.add_creature(creature);
        let id = world.add_room(room);
        world.current = id;
        world
    }

    #[test]
    fn missing_creature_is_refused() {
        let mut world = arena_with(Creature::new("rat", 5, 12, 1));
        let control = fight_handler(&mut world, "dragon", "attack").unwrap();
        assert!(matches!(control, ReplControl::Continue));
        assert_eq!(world.player.hp, 100);
    }

    #[test]
    fn carcasses_do_not_fight_back() {
        let mut harmless = Creature::new("troll", 20, 50, 2);
        harmless.alive = false;
        let mut world = arena_with(harmless);
        let control = fight_handler(&mut world, "troll", "hit").unwrap();
        assert!(matches!(control, ReplControl::Continue));
        assert_eq!(world.player.hp, 100);
        assert_eq!(world.current_room().unwrap().creature("troll").unwrap().hp, 20);
    }

    #[test]
    fn repeated_attacks_eventually_kill_a_weak_creature() {
        let mut pacifist = Creature::new("rat", 3, 10, 0);
        pacifist.hit_pct = 0.0;
        let mut world = arena_with(pacifist);
        world.player.hit_pct = 1.0;

        for _ in 0..200 {
            fight_handler(&mut world, "rat", "attack").unwrap();
            if !world.current_room().unwrap().creature("rat").unwrap().alive {
                break;
            }
        }

        assert!(!world.current_room().unwrap().creature("rat").unwrap().alive);
        assert_eq!(world.player.hp, 100);
    }

    #[test]
    fn overwhelming_creature_eventually_kills_the_player() {
        let mut brute = Creature::new("dragon", 1_000_000, 500, 1_000_000);
        brute.hit_pct = 1.0;
        let mut world = arena_with(brute);
        world.player.hit_pct = 0.0;
        world.player.defense = 0;

        let mut died = false;
        for _ in 0..500 {
            let control = fight_handler(&mut world, "dragon", "attack").unwrap();
            if matches!(control, ReplControl::Quit) {
                died = true;
                break;
            }
        }

        assert!(died);
        assert!(!world.player.alive);
    }
}
