//! Class and Subclass request/response shapes and validation

use serde::{Deserialize, Serialize};

use crate::application::dto::character::CharacterResponse;
use crate::application::error::ApiError;
use crate::domain::entities::{Character, Class, Subclass};
use crate::domain::value_objects::{expected_values, Ability, ClassId, HitDie};

fn parse_ability(field: &str, value: &str) -> Result<Ability, ApiError> {
    Ability::parse(value).ok_or_else(|| {
        ApiError::validation(format!(
            "{field} must be one of {}",
            expected_values(&Ability::ALL.map(|a| a.as_str()))
        ))
    })
}

fn parse_hit_die(value: i64) -> Result<HitDie, ApiError> {
    HitDie::from_sides(value).ok_or_else(|| ApiError::validation("Invalid hit die value"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub hit_die: Option<i64>,
    pub primary_ability: Option<String>,
    pub saving_throws: Option<Vec<String>>,
    pub spellcasting: Option<bool>,
}

impl CreateClassRequest {
    pub fn into_entity(self) -> Result<Class, ApiError> {
        let (Some(name), Some(desc), Some(hit_die), Some(primary_ability), Some(saving_throws)) = (
            self.name,
            self.desc,
            self.hit_die,
            self.primary_ability,
            self.saving_throws,
        ) else {
            return Err(ApiError::validation("Missing required fields"));
        };
        if name.trim().is_empty() || desc.trim().is_empty() {
            return Err(ApiError::validation("Missing required fields"));
        }

        let hit_die = parse_hit_die(hit_die)?;
        let primary_ability = parse_ability("primaryAbility", &primary_ability)?;
        let saving_throws = saving_throws
            .iter()
            .map(|s| parse_ability("savingThrows", s))
            .collect::<Result<Vec<_>, _>>()?;

        let now = chrono::Utc::now();
        Ok(Class {
            id: ClassId::new(),
            name,
            desc,
            hit_die,
            primary_ability,
            saving_throws,
            spellcasting: self.spellcasting.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub hit_die: Option<i64>,
    pub primary_ability: Option<String>,
    pub saving_throws: Option<Vec<String>>,
    pub spellcasting: Option<bool>,
}

#[derive(Debug, Default, Clone)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub hit_die: Option<HitDie>,
    pub primary_ability: Option<Ability>,
    pub saving_throws: Option<Vec<Ability>>,
    pub spellcasting: Option<bool>,
}

impl ClassPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.desc.is_none()
            && self.hit_die.is_none()
            && self.primary_ability.is_none()
            && self.saving_throws.is_none()
            && self.spellcasting.is_none()
    }
}

impl UpdateClassRequest {
    pub fn into_patch(self) -> Result<ClassPatch, ApiError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ApiError::validation("name cannot be empty"));
            }
        }
        let hit_die = match self.hit_die {
            Some(v) => Some(parse_hit_die(v)?),
            None => None,
        };
        let primary_ability = match self.primary_ability.as_deref() {
            Some(v) => Some(parse_ability("primaryAbility", v)?),
            None => None,
        };
        let saving_throws = match self.saving_throws {
            Some(values) => Some(
                values
                    .iter()
                    .map(|s| parse_ability("savingThrows", s))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(ClassPatch {
            name: self.name,
            desc: self.desc,
            hit_die,
            primary_ability,
            saving_throws,
            spellcasting: self.spellcasting,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSubclassRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
}

impl CreateSubclassRequest {
    pub fn into_entity(self, class_id: ClassId) -> Result<Subclass, ApiError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ApiError::validation("name is required")),
        };
        let desc = match self.desc {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ApiError::validation("desc is required")),
        };
        Ok(Subclass::new(class_id, name, desc))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub hit_die: i64,
    pub primary_ability: String,
    pub saving_throws: Vec<String>,
    pub spellcasting: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Class> for ClassResponse {
    fn from(class: Class) -> Self {
        Self {
            id: class.id.to_string(),
            name: class.name,
            desc: class.desc,
            hit_die: class.hit_die.sides(),
            primary_ability: class.primary_ability.as_str().to_string(),
            saving_throws: class
                .saving_throws
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
            spellcasting: class.spellcasting,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubclassResponse {
    pub id: String,
    pub class_id: String,
    pub name: String,
    pub desc: String,
}

impl From<Subclass> for SubclassResponse {
    fn from(subclass: Subclass) -> Self {
        Self {
            id: subclass.id.to_string(),
            class_id: subclass.class_id.to_string(),
            name: subclass.name,
            desc: subclass.desc,
        }
    }
}

/// Class with referencing characters and owned subclasses attached
#[derive(Debug, Serialize)]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    pub class: ClassResponse,
    pub characters: Vec<CharacterResponse>,
    pub subclasses: Vec<SubclassResponse>,
}

impl ClassDetailResponse {
    pub fn new(class: Class, characters: Vec<Character>, subclasses: Vec<Subclass>) -> Self {
        Self {
            class: class.into(),
            characters: characters.into_iter().map(CharacterResponse::from).collect(),
            subclasses: subclasses.into_iter().map(SubclassResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateClassRequest {
        CreateClassRequest {
            name: Some("Fighter".to_string()),
            desc: Some("A master of martial combat".to_string()),
            hit_die: Some(10),
            primary_ability: Some("STRENGTH".to_string()),
            saving_throws: Some(vec!["STRENGTH".to_string(), "CONSTITUTION".to_string()]),
            spellcasting: None,
        }
    }

    #[test]
    fn test_valid_class_passes() {
        let class = base_request().into_entity().unwrap();
        assert_eq!(class.hit_die, HitDie::D10);
        assert_eq!(class.primary_ability, Ability::Strength);
        assert!(!class.spellcasting);
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut req = base_request();
        req.saving_throws = None;
        match req.into_entity() {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "Missing required fields"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_hit_die_rejected() {
        let mut req = base_request();
        req.hit_die = Some(7);
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_bad_saving_throw_rejected() {
        let mut req = base_request();
        req.saving_throws = Some(vec!["LUCK".to_string()]);
        assert!(matches!(
            req.into_entity(),
            Err(ApiError::Validation(msg)) if msg.contains("savingThrows")
        ));
    }

    #[test]
    fn test_update_accepts_partial_body() {
        let req: UpdateClassRequest = serde_json::from_str(r#"{"hitDie": 12}"#).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.hit_die, Some(HitDie::D12));
        assert!(patch.name.is_none());
    }
}
