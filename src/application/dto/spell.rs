//! Spell request/response shapes and validation

use serde::{Deserialize, Serialize};

use crate::application::dto::spellbook::LearnedSpellResponse;
use crate::application::error::ApiError;
use crate::domain::entities::{LearnedSpell, Spell};
use crate::domain::value_objects::{expected_values, SpellComponent, SpellId, SpellSchool};

fn parse_school(value: &str) -> Result<SpellSchool, ApiError> {
    SpellSchool::parse(value).ok_or_else(|| {
        ApiError::validation(format!(
            "school must be one of {}",
            expected_values(&SpellSchool::ALL.map(|s| s.as_str()))
        ))
    })
}

fn parse_components(values: &[String]) -> Result<Vec<SpellComponent>, ApiError> {
    values
        .iter()
        .map(|v| {
            SpellComponent::parse(v)
                .ok_or_else(|| ApiError::validation("components may only contain V, S, M"))
        })
        .collect()
}

fn check_level(level: i64) -> Result<(), ApiError> {
    if !(0..=9).contains(&level) {
        return Err(ApiError::validation("Spell level must be between 0 and 9"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpellRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub level: Option<i64>,
    pub school: Option<String>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub components: Option<Vec<String>>,
    pub duration: Option<String>,
    pub concentration: Option<bool>,
}

impl CreateSpellRequest {
    pub fn into_entity(self) -> Result<Spell, ApiError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ApiError::validation("name is required")),
        };
        let desc = match self.desc {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ApiError::validation("desc is required")),
        };
        let level = self
            .level
            .ok_or_else(|| ApiError::validation("level is required"))?;
        check_level(level)?;
        let school = parse_school(
            self.school
                .as_deref()
                .ok_or_else(|| ApiError::validation("school is required"))?,
        )?;
        let components = parse_components(self.components.as_deref().unwrap_or_default())?;

        let now = chrono::Utc::now();
        Ok(Spell {
            id: SpellId::new(),
            name,
            desc,
            level,
            school,
            casting_time: self.casting_time.unwrap_or_default(),
            range: self.range.unwrap_or_default(),
            components,
            duration: self.duration.unwrap_or_default(),
            concentration: self.concentration.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpellRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub level: Option<i64>,
    pub school: Option<String>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub components: Option<Vec<String>>,
    pub duration: Option<String>,
    pub concentration: Option<bool>,
}

#[derive(Debug, Default, Clone)]
pub struct SpellPatch {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub level: Option<i64>,
    pub school: Option<SpellSchool>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub components: Option<Vec<SpellComponent>>,
    pub duration: Option<String>,
    pub concentration: Option<bool>,
}

impl SpellPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.desc.is_none()
            && self.level.is_none()
            && self.school.is_none()
            && self.casting_time.is_none()
            && self.range.is_none()
            && self.components.is_none()
            && self.duration.is_none()
            && self.concentration.is_none()
    }
}

impl UpdateSpellRequest {
    pub fn into_patch(self) -> Result<SpellPatch, ApiError> {
        if let Some(level) = self.level {
            check_level(level)?;
        }
        let school = match self.school.as_deref() {
            Some(s) => Some(parse_school(s)?),
            None => None,
        };
        let components = match self.components.as_deref() {
            Some(values) => Some(parse_components(values)?),
            None => None,
        };
        Ok(SpellPatch {
            name: self.name,
            desc: self.desc,
            level: self.level,
            school,
            casting_time: self.casting_time,
            range: self.range,
            components,
            duration: self.duration,
            concentration: self.concentration,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellResponse {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub level: i64,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub components: Vec<String>,
    pub duration: String,
    pub concentration: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Spell> for SpellResponse {
    fn from(spell: Spell) -> Self {
        Self {
            id: spell.id.to_string(),
            name: spell.name,
            desc: spell.desc,
            level: spell.level,
            school: spell.school.as_str().to_string(),
            casting_time: spell.casting_time,
            range: spell.range,
            components: spell
                .components
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            duration: spell.duration,
            concentration: spell.concentration,
            created_at: spell.created_at,
            updated_at: spell.updated_at,
        }
    }
}

/// Spell with its learned-spell links attached
#[derive(Debug, Serialize)]
pub struct SpellDetailResponse {
    #[serde(flatten)]
    pub spell: SpellResponse,
    #[serde(rename = "characterSpells")]
    pub character_spells: Vec<LearnedSpellResponse>,
}

impl SpellDetailResponse {
    pub fn new(spell: Spell, links: Vec<LearnedSpell>) -> Self {
        Self {
            spell: spell.into(),
            character_spells: links.into_iter().map(LearnedSpellResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateSpellRequest {
        CreateSpellRequest {
            name: Some("Fireball".to_string()),
            desc: Some("A bright streak flashes to a point you choose".to_string()),
            level: Some(3),
            school: Some("EVOCATION".to_string()),
            casting_time: Some("1 Action".to_string()),
            range: Some("150 feet".to_string()),
            components: Some(vec!["V".to_string(), "S".to_string(), "M".to_string()]),
            duration: Some("Instantaneous".to_string()),
            concentration: Some(false),
        }
    }

    #[test]
    fn test_valid_spell_passes() {
        let spell = base_request().into_entity().unwrap();
        assert_eq!(spell.level, 3);
        assert_eq!(spell.school, SpellSchool::Evocation);
        assert_eq!(spell.components.len(), 3);
    }

    #[test]
    fn test_level_ten_rejected() {
        let mut req = base_request();
        req.level = Some(10);
        match req.into_entity() {
            Err(ApiError::Validation(msg)) => {
                assert_eq!(msg, "Spell level must be between 0 and 9")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_cantrip_level_zero_accepted() {
        let mut req = base_request();
        req.level = Some(0);
        assert!(req.into_entity().is_ok());
    }

    #[test]
    fn test_unknown_school_rejected() {
        let mut req = base_request();
        req.school = Some("CHRONOMANCY".to_string());
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_bad_component_rejected() {
        let mut req = base_request();
        req.components = Some(vec!["V".to_string(), "X".to_string()]);
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_update_level_checked_when_present() {
        let req: UpdateSpellRequest = serde_json::from_str(r#"{"level": -1}"#).unwrap();
        assert!(req.into_patch().is_err());
        let req: UpdateSpellRequest = serde_json::from_str(r#"{"duration": "1 minute"}"#).unwrap();
        assert!(req.into_patch().unwrap().level.is_none());
    }
}
