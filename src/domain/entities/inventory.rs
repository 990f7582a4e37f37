//! Inventory and Item entities

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CharacterId, InventoryId, ItemId};

/// A character's inventory. One per character, created with it.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub id: InventoryId,
    pub character_id: CharacterId,
    pub gold: i64,
    /// Declared cap on distinct item stacks; recorded but not enforced
    /// by the add-item operation.
    pub capacity: i64,
}

impl Inventory {
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            id: InventoryId::new(),
            character_id,
            gold: 0,
            capacity: 20,
        }
    }
}

/// An item stack held in an inventory
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub desc: String,
    pub quantity: i64,
    /// None while the item is detached from any inventory
    pub inventory_id: Option<InventoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
