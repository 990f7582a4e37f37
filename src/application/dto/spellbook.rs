//! Learned-spell (character/spell join) request/response shapes

use serde::{Deserialize, Serialize};

use crate::application::dto::parse_uuid;
use crate::application::dto::spell::SpellResponse;
use crate::application::error::ApiError;
use crate::domain::entities::{LearnedSpell, Spell};
use crate::domain::value_objects::{CharacterId, SpellId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnSpellRequest {
    pub character_id: Option<String>,
    pub spell_id: Option<String>,
}

impl LearnSpellRequest {
    pub fn ids(&self) -> Result<(CharacterId, SpellId), ApiError> {
        let character_id = self
            .character_id
            .as_deref()
            .ok_or_else(|| ApiError::validation("characterId is required"))?;
        let spell_id = self
            .spell_id
            .as_deref()
            .ok_or_else(|| ApiError::validation("spellId is required"))?;
        Ok((
            CharacterId::from_uuid(parse_uuid(character_id, "character")?),
            SpellId::from_uuid(parse_uuid(spell_id, "spell")?),
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedSpellResponse {
    pub id: String,
    pub character_id: String,
    pub spell_id: String,
}

impl From<LearnedSpell> for LearnedSpellResponse {
    fn from(link: LearnedSpell) -> Self {
        Self {
            id: link.id.to_string(),
            character_id: link.character_id.to_string(),
            spell_id: link.spell_id.to_string(),
        }
    }
}

/// Learned spell with the spell itself attached
#[derive(Debug, Serialize)]
pub struct LearnedSpellDetailResponse {
    #[serde(flatten)]
    pub link: LearnedSpellResponse,
    pub spell: Option<SpellResponse>,
}

impl LearnedSpellDetailResponse {
    pub fn new(link: LearnedSpell, spell: Option<Spell>) -> Self {
        Self {
            link: link.into(),
            spell: spell.map(SpellResponse::from),
        }
    }
}
