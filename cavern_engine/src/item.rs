//! Items and item containers.
//!
//! An [`Item`] is a small bundle of stats; an [`ItemStore`] is the ordered
//! container used for room contents, the player's pack and the player's
//! hands, looked up by name the way the player refers to things.

/// A portable object. Attack and defense contribute to combat while the item
/// is held; `heal` marks a consumable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub attack: i64,
    pub defense: i64,
    pub heal: Option<i64>,
}

impl Item {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn weapon(name: &str, attack: i64) -> Self {
        Self {
            name: name.to_string(),
            attack,
            ..Self::default()
        }
    }

    pub fn armor(name: &str, defense: i64) -> Self {
        Self {
            name: name.to_string(),
            defense,
            ..Self::default()
        }
    }

    pub fn consumable(name: &str, heal: i64) -> Self {
        Self {
            name: name.to_string(),
            heal: Some(heal),
            ..Self::default()
        }
    }

    /// Player-facing description: article, name, and any stat bonuses.
    pub fn describe(&self) -> String {
        let mut desc = format!("{} {}", article_for(&self.name), self.name);
        if self.attack > 0 {
            desc.push_str(&format!(" [atk+{}]", self.attack));
        }
        if self.defense > 0 {
            desc.push_str(&format!(" [def+{}]", self.defense));
        }
        if let Some(heal) = self.heal {
            desc.push_str(&format!(" [heal+{heal}]"));
        }
        desc
    }
}

/// "a" or "an", by leading vowel.
pub fn article_for(name: &str) -> &'static str {
    if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    }
}

/// Ordered collection of items addressed by name.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove and return the first item with a matching name, if any.
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let ix = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(ix))
    }

    /// Empty the store, returning everything it held in order.
    pub fn drain(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}
