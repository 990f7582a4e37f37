//! Character request/response shapes and validation

use serde::{Deserialize, Serialize};

use crate::application::dto::class::{ClassResponse, SubclassResponse};
use crate::application::dto::equipment::{EquipmentDetailResponse, EquipmentResponse};
use crate::application::dto::inventory::{InventoryDetailResponse, InventoryResponse};
use crate::application::dto::race::RaceResponse;
use crate::application::dto::{double_option, parse_uuid};
use crate::application::error::ApiError;
use crate::domain::entities::Character;
use crate::domain::value_objects::{ClassId, RaceId, SubclassId};

const ABILITY_FIELDS: [&str; 6] = [
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

fn check_score(field: &str, value: Option<i64>) -> Result<(), ApiError> {
    if let Some(v) = value {
        if !(1..=20).contains(&v) {
            return Err(ApiError::validation(format!(
                "{field} must be between 1 and 20"
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    pub name: Option<String>,
    pub race_id: Option<String>,
    pub class_id: Option<String>,
    pub subclass_id: Option<String>,
    pub strength: Option<i64>,
    pub dexterity: Option<i64>,
    pub constitution: Option<i64>,
    pub intelligence: Option<i64>,
    pub wisdom: Option<i64>,
    pub charisma: Option<i64>,
}

impl CreateCharacterRequest {
    /// Validate and build the character entity (id references checked by
    /// the storage layer's foreign keys at insert time)
    pub fn into_entity(self) -> Result<Character, ApiError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ApiError::validation("name is required")),
        };
        let race_id = self
            .race_id
            .as_deref()
            .ok_or_else(|| ApiError::validation("raceId is required"))?;
        let class_id = self
            .class_id
            .as_deref()
            .ok_or_else(|| ApiError::validation("classId is required"))?;

        let scores = [
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        ];
        for (field, value) in ABILITY_FIELDS.iter().zip(scores) {
            check_score(field, value)?;
        }

        let mut character = Character::new(
            name,
            RaceId::from_uuid(parse_uuid(race_id, "race")?),
            ClassId::from_uuid(parse_uuid(class_id, "class")?),
        );
        if let Some(id) = self.subclass_id.as_deref() {
            character.subclass_id = Some(SubclassId::from_uuid(parse_uuid(id, "subclass")?));
        }
        if let Some(v) = self.strength {
            character.scores.strength = v;
        }
        if let Some(v) = self.dexterity {
            character.scores.dexterity = v;
        }
        if let Some(v) = self.constitution {
            character.scores.constitution = v;
        }
        if let Some(v) = self.intelligence {
            character.scores.intelligence = v;
        }
        if let Some(v) = self.wisdom {
            character.scores.wisdom = v;
        }
        if let Some(v) = self.charisma {
            character.scores.charisma = v;
        }
        Ok(character)
    }
}

/// Partial update: absent fields stay unchanged; `subclassId: null`
/// explicitly clears the subclass.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub level: Option<i64>,
    pub experience: Option<i64>,
    pub race_id: Option<String>,
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub subclass_id: Option<Option<String>>,
    pub strength: Option<i64>,
    pub dexterity: Option<i64>,
    pub constitution: Option<i64>,
    pub intelligence: Option<i64>,
    pub wisdom: Option<i64>,
    pub charisma: Option<i64>,
}

#[derive(Debug, Default, Clone)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub level: Option<i64>,
    pub experience: Option<i64>,
    pub race_id: Option<RaceId>,
    pub class_id: Option<ClassId>,
    /// Outer None = leave unchanged, Some(None) = clear
    pub subclass_id: Option<Option<SubclassId>>,
    pub strength: Option<i64>,
    pub dexterity: Option<i64>,
    pub constitution: Option<i64>,
    pub intelligence: Option<i64>,
    pub wisdom: Option<i64>,
    pub charisma: Option<i64>,
}

impl CharacterPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.level.is_none()
            && self.experience.is_none()
            && self.race_id.is_none()
            && self.class_id.is_none()
            && self.subclass_id.is_none()
            && self.strength.is_none()
            && self.dexterity.is_none()
            && self.constitution.is_none()
            && self.intelligence.is_none()
            && self.wisdom.is_none()
            && self.charisma.is_none()
    }
}

impl UpdateCharacterRequest {
    pub fn into_patch(self) -> Result<CharacterPatch, ApiError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ApiError::validation("name cannot be empty"));
            }
        }
        if let Some(level) = self.level {
            if !(1..=20).contains(&level) {
                return Err(ApiError::validation("level must be between 1 and 20"));
            }
        }
        if let Some(experience) = self.experience {
            if experience < 0 {
                return Err(ApiError::validation("experience cannot be negative"));
            }
        }
        let scores = [
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        ];
        for (field, value) in ABILITY_FIELDS.iter().zip(scores) {
            check_score(field, value)?;
        }

        let race_id = match self.race_id.as_deref() {
            Some(id) => Some(RaceId::from_uuid(parse_uuid(id, "race")?)),
            None => None,
        };
        let class_id = match self.class_id.as_deref() {
            Some(id) => Some(ClassId::from_uuid(parse_uuid(id, "class")?)),
            None => None,
        };
        let subclass_id = match self.subclass_id {
            None => None,
            Some(None) => Some(None),
            Some(Some(id)) => Some(Some(SubclassId::from_uuid(parse_uuid(&id, "subclass")?))),
        };

        Ok(CharacterPatch {
            name: self.name,
            level: self.level,
            experience: self.experience,
            race_id,
            class_id,
            subclass_id,
            strength: self.strength,
            dexterity: self.dexterity,
            constitution: self.constitution,
            intelligence: self.intelligence,
            wisdom: self.wisdom,
            charisma: self.charisma,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub id: String,
    pub name: String,
    pub level: i64,
    pub experience: i64,
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
    pub race_id: String,
    pub class_id: String,
    pub subclass_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Character> for CharacterResponse {
    fn from(c: Character) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            level: c.level,
            experience: c.experience,
            strength: c.scores.strength,
            dexterity: c.scores.dexterity,
            constitution: c.scores.constitution,
            intelligence: c.scores.intelligence,
            wisdom: c.scores.wisdom,
            charisma: c.scores.charisma,
            race_id: c.race_id.to_string(),
            class_id: c.class_id.to_string(),
            subclass_id: c.subclass_id.map(|id| id.to_string()),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Character with shallow relations, as returned by the list operation
#[derive(Debug, Serialize)]
pub struct CharacterListResponse {
    #[serde(flatten)]
    pub character: CharacterResponse,
    pub race: Option<RaceResponse>,
    pub class: Option<ClassResponse>,
    pub subclass: Option<SubclassResponse>,
    pub inventory: Option<InventoryResponse>,
    pub equipment: Option<EquipmentResponse>,
}

/// Character with deep relations, as returned by get-by-id and create
#[derive(Debug, Serialize)]
pub struct CharacterDetailResponse {
    #[serde(flatten)]
    pub character: CharacterResponse,
    pub race: Option<RaceResponse>,
    pub class: Option<ClassResponse>,
    pub subclass: Option<SubclassResponse>,
    pub inventory: Option<InventoryDetailResponse>,
    pub equipment: Option<EquipmentDetailResponse>,
}

/// Shared wording for the nested character routes
pub fn character_not_found() -> ApiError {
    ApiError::not_found("Character not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn base_request() -> CreateCharacterRequest {
        CreateCharacterRequest {
            name: Some("Astarion".to_string()),
            race_id: Some(Uuid::new_v4().to_string()),
            class_id: Some(Uuid::new_v4().to_string()),
            subclass_id: None,
            strength: Some(8),
            dexterity: Some(17),
            constitution: Some(14),
            intelligence: Some(13),
            wisdom: Some(13),
            charisma: Some(10),
        }
    }

    #[test]
    fn test_valid_character_passes() {
        let character = base_request().into_entity().unwrap();
        assert_eq!(character.level, 1);
        assert_eq!(character.scores.dexterity, 17);
    }

    #[test]
    fn test_score_out_of_range_names_the_field() {
        let mut req = base_request();
        req.wisdom = Some(21);
        match req.into_entity() {
            Err(ApiError::Validation(msg)) => {
                assert_eq!(msg, "wisdom must be between 1 and 20")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_score_rejected() {
        let mut req = base_request();
        req.strength = Some(0);
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_absent_scores_default_to_ten() {
        let mut req = base_request();
        req.strength = None;
        let character = req.into_entity().unwrap();
        assert_eq!(character.scores.strength, 10);
    }

    #[test]
    fn test_missing_reference_ids_rejected() {
        let mut req = base_request();
        req.race_id = None;
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_update_patch_distinguishes_clear_from_absent() {
        let body = r#"{"subclassId": null}"#;
        let req: UpdateCharacterRequest = serde_json::from_str(body).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.subclass_id, Some(None));

        let req: UpdateCharacterRequest = serde_json::from_str("{}").unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.subclass_id, None);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_level_bounds() {
        let req: UpdateCharacterRequest = serde_json::from_str(r#"{"level": 21}"#).unwrap();
        assert!(req.into_patch().is_err());
        let req: UpdateCharacterRequest = serde_json::from_str(r#"{"level": 20}"#).unwrap();
        assert!(req.into_patch().is_ok());
    }
}
