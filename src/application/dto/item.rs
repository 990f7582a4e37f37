//! Item request/response shapes and validation

use serde::{Deserialize, Serialize};

use crate::application::dto::inventory::InventoryResponse;
use crate::application::dto::parse_uuid;
use crate::application::error::ApiError;
use crate::domain::entities::{Inventory, Item};
use crate::domain::value_objects::{InventoryId, ItemId};

fn check_quantity(quantity: i64) -> Result<(), ApiError> {
    if quantity < 1 {
        return Err(ApiError::validation("Quantity must be at least 1"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub quantity: Option<i64>,
    pub inventory_id: Option<String>,
}

impl CreateItemRequest {
    pub fn into_entity(self) -> Result<Item, ApiError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ApiError::validation("name is required")),
        };
        let inventory_id = self
            .inventory_id
            .as_deref()
            .ok_or_else(|| ApiError::validation("inventoryId is required"))?;
        if let Some(quantity) = self.quantity {
            check_quantity(quantity)?;
        }

        let now = chrono::Utc::now();
        Ok(Item {
            id: ItemId::new(),
            name,
            desc: self.desc.unwrap_or_default(),
            quantity: self.quantity.unwrap_or(1),
            inventory_id: Some(InventoryId::from_uuid(parse_uuid(inventory_id, "inventory")?)),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Default, Clone)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub quantity: Option<i64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.desc.is_none() && self.quantity.is_none()
    }
}

impl UpdateItemRequest {
    pub fn into_patch(self) -> Result<ItemPatch, ApiError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ApiError::validation("name cannot be empty"));
            }
        }
        if let Some(quantity) = self.quantity {
            check_quantity(quantity)?;
        }
        Ok(ItemPatch {
            name: self.name,
            desc: self.desc,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub quantity: i64,
    pub inventory_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            desc: item.desc,
            quantity: item.quantity,
            inventory_id: item.inventory_id.map(|id| id.to_string()),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Item with its owning inventory attached
#[derive(Debug, Serialize)]
pub struct ItemDetailResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub inventory: Option<InventoryResponse>,
}

impl ItemDetailResponse {
    pub fn new(item: Item, inventory: Option<Inventory>) -> Self {
        Self {
            item: item.into(),
            inventory: inventory.map(InventoryResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_zero_quantity_rejected() {
        let req = CreateItemRequest {
            name: Some("Healing Potion".to_string()),
            desc: None,
            quantity: Some(0),
            inventory_id: Some(Uuid::new_v4().to_string()),
        };
        match req.into_entity() {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "Quantity must be at least 1"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let req = CreateItemRequest {
            name: Some("Rope".to_string()),
            desc: Some("50 feet of hempen rope".to_string()),
            quantity: None,
            inventory_id: Some(Uuid::new_v4().to_string()),
        };
        assert_eq!(req.into_entity().unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_checked() {
        let req = UpdateItemRequest {
            name: None,
            desc: None,
            quantity: Some(-2),
        };
        assert!(req.into_patch().is_err());
    }
}
