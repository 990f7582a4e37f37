//! Inventory request/response shapes, accessed through the owning character

use serde::{Deserialize, Serialize};

use crate::application::dto::item::ItemResponse;
use crate::application::dto::parse_uuid;
use crate::application::error::ApiError;
use crate::domain::entities::{Inventory, Item};
use crate::domain::value_objects::ItemId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub gold: Option<i64>,
    pub capacity: Option<i64>,
    /// When present, replaces the full set of attached items
    pub item_ids: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone)]
pub struct InventoryPatch {
    pub gold: Option<i64>,
    pub capacity: Option<i64>,
    pub item_ids: Option<Vec<ItemId>>,
}

impl UpdateInventoryRequest {
    pub fn into_patch(self) -> Result<InventoryPatch, ApiError> {
        if let Some(gold) = self.gold {
            if gold < 0 {
                return Err(ApiError::validation("gold cannot be negative"));
            }
        }
        if let Some(capacity) = self.capacity {
            if capacity < 1 {
                return Err(ApiError::validation("capacity must be at least 1"));
            }
        }
        let item_ids = match self.item_ids {
            Some(ids) => Some(
                ids.iter()
                    .map(|id| parse_uuid(id, "item").map(ItemId::from_uuid))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(InventoryPatch {
            gold: self.gold,
            capacity: self.capacity,
            item_ids,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub item_id: Option<String>,
}

impl AddItemRequest {
    pub fn item_id(&self) -> Result<ItemId, ApiError> {
        let raw = self
            .item_id
            .as_deref()
            .ok_or_else(|| ApiError::validation("itemId is required"))?;
        Ok(ItemId::from_uuid(parse_uuid(raw, "item")?))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub id: String,
    pub character_id: String,
    pub gold: i64,
    pub capacity: i64,
}

impl From<Inventory> for InventoryResponse {
    fn from(inventory: Inventory) -> Self {
        Self {
            id: inventory.id.to_string(),
            character_id: inventory.character_id.to_string(),
            gold: inventory.gold,
            capacity: inventory.capacity,
        }
    }
}

/// Inventory with its item stacks attached
#[derive(Debug, Serialize)]
pub struct InventoryDetailResponse {
    #[serde(flatten)]
    pub inventory: InventoryResponse,
    pub items: Vec<ItemResponse>,
}

impl InventoryDetailResponse {
    pub fn new(inventory: Inventory, items: Vec<Item>) -> Self {
        Self {
            inventory: inventory.into(),
            items: items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_gold_rejected() {
        let req = UpdateInventoryRequest {
            gold: Some(-5),
            capacity: None,
            item_ids: None,
        };
        assert!(req.into_patch().is_err());
    }

    #[test]
    fn test_malformed_item_id_rejected() {
        let req = UpdateInventoryRequest {
            gold: None,
            capacity: None,
            item_ids: Some(vec!["nope".to_string()]),
        };
        assert!(req.into_patch().is_err());
    }

    #[test]
    fn test_add_item_requires_id() {
        let req = AddItemRequest { item_id: None };
        assert!(req.item_id().is_err());
    }
}
