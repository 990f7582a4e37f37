//! Spell API routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::spell::{
    CreateSpellRequest, SpellDetailResponse, SpellResponse, UpdateSpellRequest,
};
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::value_objects::SpellId;
use crate::infrastructure::state::AppState;

/// List all spells
pub async fn list_spells(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SpellResponse>>, ApiError> {
    let spells = state
        .repository
        .spells()
        .list()
        .await
        .map_err(|e| e.into_api("Spell"))?;
    Ok(Json(spells.into_iter().map(SpellResponse::from).collect()))
}

/// Create a new spell
pub async fn create_spell(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSpellRequest>,
) -> Result<(StatusCode, Json<SpellResponse>), ApiError> {
    let spell = req.into_entity()?;
    state
        .repository
        .spells()
        .create(&spell)
        .await
        .map_err(|e| e.into_api("Spell"))?;
    Ok((StatusCode::CREATED, Json(spell.into())))
}

/// Get a spell by ID, with the characters that know it
pub async fn get_spell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SpellDetailResponse>, ApiError> {
    let id = SpellId::from_uuid(parse_uuid(&id, "spell")?);
    let spell = state
        .repository
        .spells()
        .get(id)
        .await
        .map_err(|e| e.into_api("Spell"))?
        .ok_or_else(|| ApiError::not_found("Spell not found"))?;
    let links = state
        .repository
        .spellbook()
        .characters_for_spell(id)
        .await
        .map_err(|e| e.into_api("Spell"))?;
    Ok(Json(SpellDetailResponse::new(spell, links)))
}

/// Update a spell
pub async fn update_spell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSpellRequest>,
) -> Result<Json<SpellResponse>, ApiError> {
    let id = SpellId::from_uuid(parse_uuid(&id, "spell")?);
    let patch = req.into_patch()?;
    let spell = state
        .repository
        .spells()
        .update(id, &patch)
        .await
        .map_err(|e| e.into_api("Spell"))?;
    Ok(Json(spell.into()))
}

/// Delete a spell
pub async fn delete_spell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = SpellId::from_uuid(parse_uuid(&id, "spell")?);
    state
        .repository
        .spells()
        .delete(id)
        .await
        .map_err(|e| e.into_api("Spell"))?;
    Ok(Json(MessageResponse::new("Spell deleted successfully")))
}
