//! Nested equipment routes under a character

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use super::character_routes::require_character;
use crate::application::dto::equipment::{EquipmentDetailResponse, UpdateEquipmentRequest};
use crate::application::error::ApiError;
use crate::domain::entities::Equipment;
use crate::infrastructure::state::AppState;

async fn require_equipment(state: &AppState, id: &str) -> Result<Equipment, ApiError> {
    let character_id = require_character(state, id).await?;
    state
        .repository
        .equipment()
        .get_by_character(character_id)
        .await
        .map_err(|e| e.into_api("Equipment"))?
        .ok_or_else(|| ApiError::not_found("Equipment not found"))
}

async fn detail(state: &AppState, equipment: Equipment) -> Result<EquipmentDetailResponse, ApiError> {
    let slots = state
        .repository
        .equipment()
        .slots_with_items(equipment.id)
        .await
        .map_err(|e| e.into_api("Equipment"))?;
    let slots = slots
        .into_iter()
        .map(|(slot, item)| (slot, Some(item)))
        .collect();
    Ok(EquipmentDetailResponse::new(equipment, slots))
}

/// Get a character's equipment with its slot assignments
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EquipmentDetailResponse>, ApiError> {
    let equipment = require_equipment(&state, &id).await?;
    Ok(Json(detail(&state, equipment).await?))
}

/// Replace a character's slot assignments
pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEquipmentRequest>,
) -> Result<Json<EquipmentDetailResponse>, ApiError> {
    let equipment = require_equipment(&state, &id).await?;
    let assignments = req.into_assignments()?;
    state
        .repository
        .equipment()
        .replace_slots(equipment.id, &assignments)
        .await
        .map_err(|e| e.into_api("Equipment"))?;
    Ok(Json(detail(&state, equipment).await?))
}
