//! Weapon API routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::weapon::{CreateWeaponRequest, UpdateWeaponRequest, WeaponResponse};
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::value_objects::WeaponId;
use crate::infrastructure::state::AppState;

/// List all weapons
pub async fn list_weapons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WeaponResponse>>, ApiError> {
    let weapons = state
        .repository
        .weapons()
        .list()
        .await
        .map_err(|e| e.into_api("Weapon"))?;
    Ok(Json(weapons.into_iter().map(WeaponResponse::from).collect()))
}

/// Create a new weapon
pub async fn create_weapon(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateWeaponRequest>,
) -> Result<(StatusCode, Json<WeaponResponse>), ApiError> {
    let weapon = req.into_entity()?;
    state
        .repository
        .weapons()
        .create(&weapon)
        .await
        .map_err(|e| e.into_api("Weapon"))?;
    Ok((StatusCode::CREATED, Json(weapon.into())))
}

/// Get a weapon by ID
pub async fn get_weapon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WeaponResponse>, ApiError> {
    let id = WeaponId::from_uuid(parse_uuid(&id, "weapon")?);
    let weapon = state
        .repository
        .weapons()
        .get(id)
        .await
        .map_err(|e| e.into_api("Weapon"))?
        .ok_or_else(|| ApiError::not_found("Weapon not found"))?;
    Ok(Json(weapon.into()))
}

/// Update a weapon; the type/range pairing is re-checked against the
/// weapon's effective state after the patch
pub async fn update_weapon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWeaponRequest>,
) -> Result<Json<WeaponResponse>, ApiError> {
    let id = WeaponId::from_uuid(parse_uuid(&id, "weapon")?);
    let patch = req.into_patch()?;
    let current = state
        .repository
        .weapons()
        .get(id)
        .await
        .map_err(|e| e.into_api("Weapon"))?
        .ok_or_else(|| ApiError::not_found("Weapon not found"))?;
    patch.check_against(&current)?;
    let weapon = state
        .repository
        .weapons()
        .update(id, &patch)
        .await
        .map_err(|e| e.into_api("Weapon"))?;
    Ok(Json(weapon.into()))
}

/// Delete a weapon
pub async fn delete_weapon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = WeaponId::from_uuid(parse_uuid(&id, "weapon")?);
    state
        .repository
        .weapons()
        .delete(id)
        .await
        .map_err(|e| e.into_api("Weapon"))?;
    Ok(Json(MessageResponse::new("Weapon deleted successfully")))
}
