//! Item API routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::item::{
    CreateItemRequest, ItemDetailResponse, ItemResponse, UpdateItemRequest,
};
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::value_objects::ItemId;
use crate::infrastructure::state::AppState;

/// List all items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state
        .repository
        .items()
        .list()
        .await
        .map_err(|e| e.into_api("Item"))?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Create a new item in an inventory
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = req.into_entity()?;
    state
        .repository
        .items()
        .create(&item)
        .await
        .map_err(|e| e.into_api("Item"))?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Get an item by ID, with its owning inventory
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ItemDetailResponse>, ApiError> {
    let id = ItemId::from_uuid(parse_uuid(&id, "item")?);
    let item = state
        .repository
        .items()
        .get(id)
        .await
        .map_err(|e| e.into_api("Item"))?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;
    let inventory = match item.inventory_id {
        Some(inventory_id) => state
            .repository
            .inventories()
            .get(inventory_id)
            .await
            .map_err(|e| e.into_api("Item"))?,
        None => None,
    };
    Ok(Json(ItemDetailResponse::new(item, inventory)))
}

/// Update an item
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = ItemId::from_uuid(parse_uuid(&id, "item")?);
    let patch = req.into_patch()?;
    let item = state
        .repository
        .items()
        .update(id, &patch)
        .await
        .map_err(|e| e.into_api("Item"))?;
    Ok(Json(item.into()))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ItemId::from_uuid(parse_uuid(&id, "item")?);
    state
        .repository
        .items()
        .delete(id)
        .await
        .map_err(|e| e.into_api("Item"))?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}
