//! The player character.

use crate::item::ItemStore;

/// How many items the player's hands can hold at once.
pub const HAND_CAPACITY: usize = 2;

/// The adventurer. Carried items live in `inventory`; up to
/// [`HAND_CAPACITY`] held items in `hands` contribute their bonuses to
/// combat.
#[derive(Debug, Clone)]
pub struct Player {
    pub hp: i64,
    pub max_hp: i64,
    pub mp: i64,
    pub attack: i64,
    pub defense: i64,
    pub hit_pct: f64,
    pub alive: bool,
    pub inventory: ItemStore,
    pub hands: ItemStore,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            hp: 100,
            max_hp: 100,
            mp: 0,
            attack: 25,
            defense: 5,
            hit_pct: 0.8,
            alive: true,
            inventory: ItemStore::new(),
            hands: ItemStore::new(),
        }
    }
}

impl Player {
    /// Base attack plus bonuses from every held item.
    pub fn attack_points(&self) -> i64 {
        self.attack + self.hands.items().iter().map(|item| item.attack).sum::<i64>()
    }

    /// Base defense plus bonuses from every held item.
    pub fn defense_points(&self) -> i64 {
        self.defense + self.hands.items().iter().map(|item| item.defense).sum::<i64>()
    }

    /// Restore hit points, capped at `max_hp`. Returns the new total.
    pub fn heal(&mut self, amount: i64) -> i64 {
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp
    }

    /// True if the named item is anywhere on the player's person.
    pub fn carries(&self, name: &str) -> bool {
        self.inventory.get(name).is_some() || self.hands.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    #[test]
    fn held_items_boost_combat_points() {
        let mut player = Player::default();
        player.hands.add(Item::weapon("sword", 10));
        player.hands.add(Item::armor("shield", 5));
        assert_eq!(player.attack_points(), 35);
        assert_eq!(player.defense_points(), 10);
    }

    #[test]
    fn inventory_items_do_not_boost_combat() {
        let mut player = Player::default();
        player.inventory.add(Item::weapon("sword", 10));
        assert_eq!(player.attack_points(), 25);
    }

    #[test]
    fn healing_caps_at_max_hp() {
        let mut player = Player::default();
        player.hp = 70;
        assert_eq!(player.heal(50), 100);
    }
}
