//! Creatures the player can encounter and fight.

use crate::item::article_for;

/// A hostile (or at least fightable) inhabitant of the cavern.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub name: String,
    pub desc: String,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub hit_pct: f64,
    pub attack_verb: String,
    pub alive: bool,
}

impl Creature {
    pub fn new(name: &str, hp: i64, attack: i64, defense: i64) -> Self {
        Self {
            name: name.to_string(),
            desc: String::new(),
            hp,
            attack,
            defense,
            hit_pct: 0.8,
            attack_verb: "strike".to_string(),
            alive: true,
        }
    }

    pub fn with_attack_verb(mut self, verb: &str) -> Self {
        self.attack_verb = verb.to_string();
        self
    }

    /// Player-facing description; an explicit `desc` overrides the default
    /// article form, and a carcass reads as one.
    pub fn describe(&self) -> String {
        if !self.alive {
            return format!("the carcass of {} {}", article_for(&self.name), self.name);
        }
        if !self.desc.is_empty() {
            return self.desc.clone();
        }
        format!("{} {}", article_for(&self.name), self.name)
    }
}
