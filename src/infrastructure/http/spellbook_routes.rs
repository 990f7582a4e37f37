//! Learned spell API routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::spellbook::{LearnSpellRequest, LearnedSpellDetailResponse};
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::entities::LearnedSpell;
use crate::domain::value_objects::{CharacterId, SpellId};
use crate::infrastructure::state::AppState;

/// List every spell a character knows
pub async fn list_learned_spells(
    State(state): State<Arc<AppState>>,
    Path(character_id): Path<String>,
) -> Result<Json<Vec<LearnedSpellDetailResponse>>, ApiError> {
    let character_id = CharacterId::from_uuid(parse_uuid(&character_id, "character")?);
    state
        .repository
        .characters()
        .get(character_id)
        .await
        .map_err(|e| e.into_api("Character"))?
        .ok_or_else(|| ApiError::not_found("Character not found"))?;
    let learned = state
        .repository
        .spellbook()
        .list_by_character(character_id)
        .await
        .map_err(|e| e.into_api("Spell"))?;
    Ok(Json(
        learned
            .into_iter()
            .map(|(link, spell)| LearnedSpellDetailResponse::new(link, Some(spell)))
            .collect(),
    ))
}

/// Teach a character a spell
pub async fn learn_spell(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LearnSpellRequest>,
) -> Result<(StatusCode, Json<LearnedSpellDetailResponse>), ApiError> {
    let (character_id, spell_id) = req.ids()?;
    state
        .repository
        .characters()
        .get(character_id)
        .await
        .map_err(|e| e.into_api("Character"))?
        .ok_or_else(|| ApiError::not_found("Character not found"))?;
    let spell = state
        .repository
        .spells()
        .get(spell_id)
        .await
        .map_err(|e| e.into_api("Spell"))?
        .ok_or_else(|| ApiError::not_found("Spell not found"))?;
    if state
        .repository
        .spellbook()
        .exists(character_id, spell_id)
        .await
        .map_err(|e| e.into_api("Spell"))?
    {
        return Err(ApiError::conflict("Character already knows this spell"));
    }

    let learned = LearnedSpell::new(character_id, spell_id);
    state
        .repository
        .spellbook()
        .learn(&learned)
        .await
        .map_err(|e| match e {
            // racing inserts land on the unique (character, spell) pair
            crate::infrastructure::persistence::RepoError::UniqueViolation => {
                ApiError::conflict("Character already knows this spell")
            }
            other => other.into_api("Spell"),
        })?;
    Ok((
        StatusCode::CREATED,
        Json(LearnedSpellDetailResponse::new(learned, Some(spell))),
    ))
}

/// Make a character forget a spell
pub async fn forget_spell(
    State(state): State<Arc<AppState>>,
    Path((character_id, spell_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(parse_uuid(&character_id, "character")?);
    let spell_id = SpellId::from_uuid(parse_uuid(&spell_id, "spell")?);
    state
        .repository
        .spellbook()
        .forget(character_id, spell_id)
        .await
        .map_err(|e| e.into_api("Learned spell"))?;
    Ok(Json(MessageResponse::new(
        "Spell removed from character successfully",
    )))
}
