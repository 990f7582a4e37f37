//! Character API routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::character::{
    character_not_found, CharacterDetailResponse, CharacterListResponse, CreateCharacterRequest,
    UpdateCharacterRequest,
};
use crate::application::dto::equipment::EquipmentDetailResponse;
use crate::application::dto::inventory::InventoryDetailResponse;
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::entities::Character;
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::state::AppState;

/// List all characters with their shallow relations
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CharacterListResponse>>, ApiError> {
    let characters = state
        .repository
        .characters()
        .list()
        .await
        .map_err(|e| e.into_api("Character"))?;
    let mut responses = Vec::with_capacity(characters.len());
    for character in characters {
        responses.push(shallow_response(&state, character).await?);
    }
    Ok(Json(responses))
}

/// Create a character; its empty inventory and equipment come with it
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterDetailResponse>), ApiError> {
    let character = req.into_entity()?;
    state
        .repository
        .characters()
        .create(&character)
        .await
        .map_err(|e| e.into_api("Character"))?;
    let response = detail_response(&state, character).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a character by ID with its deep relations
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterDetailResponse>, ApiError> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let character = state
        .repository
        .characters()
        .get(id)
        .await
        .map_err(|e| e.into_api("Character"))?
        .ok_or_else(|| ApiError::not_found("Character not found"))?;
    Ok(Json(detail_response(&state, character).await?))
}

/// Update a character; absent fields stay, `subclassId: null` clears
pub async fn update_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCharacterRequest>,
) -> Result<Json<CharacterDetailResponse>, ApiError> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let patch = req.into_patch()?;
    let character = state
        .repository
        .characters()
        .update(id, &patch)
        .await
        .map_err(|e| e.into_api("Character"))?;
    Ok(Json(detail_response(&state, character).await?))
}

/// Delete a character; inventory, equipment, and learned spells cascade
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    state
        .repository
        .characters()
        .delete(id)
        .await
        .map_err(|e| e.into_api("Character"))?;
    Ok(Json(MessageResponse::new("Character deleted successfully")))
}

async fn shallow_response(
    state: &AppState,
    character: Character,
) -> Result<CharacterListResponse, ApiError> {
    let race = state.repository.races().get(character.race_id).await?;
    let class = state.repository.classes().get(character.class_id).await?;
    let subclass = match character.subclass_id {
        Some(id) => state.repository.classes().get_subclass(id).await?,
        None => None,
    };
    let inventory = state
        .repository
        .inventories()
        .get_by_character(character.id)
        .await?;
    let equipment = state
        .repository
        .equipment()
        .get_by_character(character.id)
        .await?;
    Ok(CharacterListResponse {
        character: character.into(),
        race: race.map(Into::into),
        class: class.map(Into::into),
        subclass: subclass.map(Into::into),
        inventory: inventory.map(Into::into),
        equipment: equipment.map(Into::into),
    })
}

async fn detail_response(
    state: &AppState,
    character: Character,
) -> Result<CharacterDetailResponse, ApiError> {
    let race = state.repository.races().get(character.race_id).await?;
    let class = state.repository.classes().get(character.class_id).await?;
    let subclass = match character.subclass_id {
        Some(id) => state.repository.classes().get_subclass(id).await?,
        None => None,
    };
    let inventory = match state
        .repository
        .inventories()
        .get_by_character(character.id)
        .await?
    {
        Some(inventory) => {
            let items = state.repository.items().list_by_inventory(inventory.id).await?;
            Some(InventoryDetailResponse::new(inventory, items))
        }
        None => None,
    };
    let equipment = match state
        .repository
        .equipment()
        .get_by_character(character.id)
        .await?
    {
        Some(equipment) => {
            let slots = state.repository.equipment().slots_with_items(equipment.id).await?;
            let slots = slots.into_iter().map(|(slot, item)| (slot, Some(item))).collect();
            Some(EquipmentDetailResponse::new(equipment, slots))
        }
        None => None,
    };
    Ok(CharacterDetailResponse {
        character: character.into(),
        race: race.map(Into::into),
        class: class.map(Into::into),
        subclass: subclass.map(Into::into),
        inventory,
        equipment,
    })
}

/// Shared by the nested inventory and equipment routes
pub(super) async fn require_character(
    state: &AppState,
    id: &str,
) -> Result<CharacterId, ApiError> {
    let id = CharacterId::from_uuid(parse_uuid(id, "character")?);
    state
        .repository
        .characters()
        .get(id)
        .await
        .map_err(|e| e.into_api("Character"))?
        .ok_or_else(character_not_found)?;
    Ok(id)
}
