//! Data structures representing the game world.
//!
//! This module defines [`CavernWorld`] and related types used at runtime to
//! track the current state of the adventure. Rooms live in a flat arena
//! indexed by [`RoomId`]; exits link them by direction, optionally through a
//! lockable portal.

use std::collections::HashMap;
use std::fmt;

use anyhow::{Result, anyhow};

use crate::creature::Creature;
use crate::item::ItemStore;
use crate::player::Player;

/// Index of a room within [`CavernWorld::rooms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub usize);

/// The six directions the grammar can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Above,
    Below,
}

impl Direction {
    /// Recognize a direction in a surface word the parser carried through.
    /// Both the canonical names and the vertical synonyms are accepted.
    pub fn from_token(word: &str) -> Option<Direction> {
        match word {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            "above" | "up" => Some(Direction::Above),
            "below" | "down" => Some(Direction::Below),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Above => Direction::Below,
            Direction::Below => Direction::Above,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Direction::Above | Direction::Below)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A doorway or gate guarding an exit. A locked portal bars passage until
/// the player carries the named key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portal {
    pub name: String,
    pub key_name: String,
    pub locked: bool,
}

/// A one-way link from a room toward a neighbor.
#[derive(Debug, Clone)]
pub struct Exit {
    pub to: RoomId,
    pub portal: Option<Portal>,
}

/// One location in the cavern.
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub name: String,
    pub desc: String,
    /// Shown instead of `desc` the first time the player arrives.
    pub first_visit_desc: Option<String>,
    pub visited: bool,
    pub items: ItemStore,
    pub creatures: Vec<Creature>,
    pub exits: HashMap<Direction, Exit>,
}

impl Room {
    pub fn new(name: &str, desc: &str) -> Self {
        Self {
            name: name.to_string(),
            desc: desc.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_first_visit_desc(mut self, desc: &str) -> Self {
        self.first_visit_desc = Some(desc.trim().to_string());
        self
    }

    pub fn add_creature(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    pub fn creature(&self, name: &str) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.name == name)
    }

    pub fn creature_mut(&mut self, name: &str) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.name == name)
    }
}

/// Complete state of the running game: the room arena and the player.
/// Created by world generation and then mutated throughout gameplay.
#[derive(Debug, Default)]
pub struct CavernWorld {
    pub rooms: Vec<Room>,
    pub player: Player,
    pub current: RoomId,
    pub turn_count: usize,
}

impl Default for RoomId {
    fn default() -> Self {
        RoomId(0)
    }
}

impl CavernWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room to the arena and return its id.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        self.rooms.push(room);
        RoomId(self.rooms.len() - 1)
    }

    /// Obtain a reference to a room by id.
    /// # Errors
    /// - if the id does not name a room in this world
    pub fn room(&self, id: RoomId) -> Result<&Room> {
        self.rooms.get(id.0).ok_or_else(|| anyhow!("no room with id {}", id.0))
    }

    /// Obtain a mutable reference to a room by id.
    /// # Errors
    /// - if the id does not name a room in this world
    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room> {
        self.rooms
            .get_mut(id.0)
            .ok_or_else(|| anyhow!("no room with id {}", id.0))
    }

    /// The room the player currently occupies.
    /// # Errors
    /// - if the current room id is stale (a world-construction bug)
    pub fn current_room(&self) -> Result<&Room> {
        self.room(self.current)
    }

    /// Mutable access to the room the player currently occupies.
    /// # Errors
    /// - if the current room id is stale (a world-construction bug)
    pub fn current_room_mut(&mut self) -> Result<&mut Room> {
        self.room_mut(self.current)
    }

    /// Link two rooms with reciprocal plain exits.
    ///
    /// # Errors
    /// - if either id is invalid
    pub fn link(&mut self, from: RoomId, dir: Direction, to: RoomId) -> Result<()> {
        self.room_mut(from)?.exits.insert(dir, Exit { to, portal: None });
        self.room_mut(to)?.exits.insert(dir.opposite(), Exit { to: from, portal: None });
        Ok(())
    }

    /// Place a portal on an existing exit (one side only).
    ///
    /// # Errors
    /// - if the room id is invalid or the room has no exit that way
    pub fn set_portal(&mut self, room: RoomId, dir: Direction, portal: Portal) -> Result<()> {
        let exit = self
            .room_mut(room)?
            .exits
            .get_mut(&dir)
            .ok_or_else(|| anyhow!("room has no {dir} exit to guard"))?;
        exit.portal = Some(portal);
        Ok(())
    }

    /// Describe the current room: description text (first-visit variant when
    /// applicable), exits, creatures and items. Marks the room visited.
    ///
    /// # Errors
    /// - if the current room id is stale
    pub fn describe_current(&mut self) -> Result<String> {
        let first_visit = !self.current_room()?.visited;
        self.current_room_mut()?.visited = true;

        let room = self.room(self.current)?;
        let mut out = match (&room.first_visit_desc, first_visit) {
            (Some(intro), true) => intro.clone(),
            _ => room.desc.clone(),
        };

        let mut directions: Vec<Direction> = room.exits.keys().copied().collect();
        directions.sort_by_key(|d| d.as_str());
        for dir in directions {
            let exit = &room.exits[&dir];
            let neighbor = self.room(exit.to)?;
            if dir.is_vertical() {
                out.push_str(&format!("\n{} is a {}.", capitalize(dir.as_str()), neighbor.name));
            } else {
                out.push_str(&format!("\nTo the {dir} is a {}.", neighbor.name));
            }
        }

        let creatures: Vec<String> = room.creatures.iter().map(Creature::describe).collect();
        if !creatures.is_empty() {
            out.push_str(&format!("\nInside the {} you find {}.", room.name, join_list(&creatures)));
        }

        let items: Vec<String> = room.items.items().iter().map(crate::item::Item::describe).collect();
        if !items.is_empty() {
            out.push_str(&format!("\nIn the {} you find {}.", room.name, join_list(&items)));
        }

        Ok(out.trim().to_string())
    }
}

/// Uppercase the first character of a phrase.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Join descriptions as "x", "x and y", or "x, y and z".
fn join_list(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}
