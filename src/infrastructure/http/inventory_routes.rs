//! Nested inventory routes under a character

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::character_routes::require_character;
use crate::application::dto::inventory::{
    AddItemRequest, InventoryDetailResponse, UpdateInventoryRequest,
};
use crate::application::dto::item::ItemResponse;
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::entities::Inventory;
use crate::domain::value_objects::ItemId;
use crate::infrastructure::state::AppState;

async fn require_inventory(state: &AppState, id: &str) -> Result<Inventory, ApiError> {
    let character_id = require_character(state, id).await?;
    state
        .repository
        .inventories()
        .get_by_character(character_id)
        .await
        .map_err(|e| e.into_api("Inventory"))?
        .ok_or_else(|| ApiError::not_found("Inventory not found"))
}

/// Get a character's inventory with its items
pub async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InventoryDetailResponse>, ApiError> {
    let inventory = require_inventory(&state, &id).await?;
    let items = state
        .repository
        .items()
        .list_by_inventory(inventory.id)
        .await
        .map_err(|e| e.into_api("Inventory"))?;
    Ok(Json(InventoryDetailResponse::new(inventory, items)))
}

/// Update a character's inventory; `itemIds` replaces the attached set
pub async fn update_inventory(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateInventoryRequest>,
) -> Result<Json<InventoryDetailResponse>, ApiError> {
    let inventory = require_inventory(&state, &id).await?;
    let patch = req.into_patch()?;
    if let Some(item_ids) = &patch.item_ids {
        state
            .repository
            .items()
            .set_attached(inventory.id, item_ids)
            .await
            .map_err(|e| e.into_api("Item"))?;
    }
    let inventory = state
        .repository
        .inventories()
        .update(inventory.id, &patch)
        .await
        .map_err(|e| e.into_api("Inventory"))?;
    let items = state
        .repository
        .items()
        .list_by_inventory(inventory.id)
        .await
        .map_err(|e| e.into_api("Inventory"))?;
    Ok(Json(InventoryDetailResponse::new(inventory, items)))
}

/// Put an existing item into a character's inventory
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let inventory = require_inventory(&state, &id).await?;
    let item_id = req.item_id()?;
    state
        .repository
        .items()
        .attach(item_id, inventory.id)
        .await
        .map_err(|e| e.into_api("Item"))?;
    let item = state
        .repository
        .items()
        .get(item_id)
        .await
        .map_err(|e| e.into_api("Item"))?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Take an item out of a character's inventory
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let inventory = require_inventory(&state, &id).await?;
    let item_id = ItemId::from_uuid(parse_uuid(&item_id, "item")?);
    state
        .repository
        .items()
        .detach(item_id, inventory.id)
        .await
        .map_err(|e| e.into_api("Item"))?;
    Ok(Json(MessageResponse::new(
        "Item removed from inventory successfully",
    )))
}
