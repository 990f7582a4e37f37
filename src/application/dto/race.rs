//! Race request/response shapes and validation

use serde::{Deserialize, Serialize};

use crate::application::dto::character::CharacterResponse;
use crate::application::error::ApiError;
use crate::domain::entities::{Character, Race};
use crate::domain::value_objects::{expected_values, Size};

fn parse_size(value: &str) -> Result<Size, ApiError> {
    Size::parse(value).ok_or_else(|| {
        ApiError::validation(format!(
            "size must be one of {}",
            expected_values(&Size::ALL.map(|s| s.as_str()))
        ))
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateRaceRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub playable: Option<bool>,
    pub speed: Option<i64>,
    pub darkvision: Option<bool>,
    pub size: Option<String>,
}

impl CreateRaceRequest {
    pub fn into_entity(self) -> Result<Race, ApiError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ApiError::validation("name is required")),
        };
        let desc = match self.desc {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ApiError::validation("desc is required")),
        };
        if let Some(speed) = self.speed {
            if !(0..=100).contains(&speed) {
                return Err(ApiError::validation("speed must be between 0 and 100"));
            }
        }

        let mut race = Race::new(name, desc);
        if let Some(playable) = self.playable {
            race.playable = playable;
        }
        if let Some(speed) = self.speed {
            race.speed = speed;
        }
        if let Some(darkvision) = self.darkvision {
            race.darkvision = darkvision;
        }
        if let Some(size) = self.size.as_deref() {
            race.size = parse_size(size)?;
        }
        Ok(race)
    }
}

/// Partial update: absent fields stay unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateRaceRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub playable: Option<bool>,
    pub speed: Option<i64>,
    pub darkvision: Option<bool>,
    pub size: Option<String>,
}

/// Validated patch consumed by the repository
#[derive(Debug, Default, Clone)]
pub struct RacePatch {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub playable: Option<bool>,
    pub speed: Option<i64>,
    pub darkvision: Option<bool>,
    pub size: Option<Size>,
}

impl RacePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.desc.is_none()
            && self.playable.is_none()
            && self.speed.is_none()
            && self.darkvision.is_none()
            && self.size.is_none()
    }
}

impl UpdateRaceRequest {
    pub fn into_patch(self) -> Result<RacePatch, ApiError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ApiError::validation("name cannot be empty"));
            }
        }
        if let Some(desc) = self.desc.as_deref() {
            if desc.trim().is_empty() {
                return Err(ApiError::validation("desc cannot be empty"));
            }
        }
        if let Some(speed) = self.speed {
            if !(0..=100).contains(&speed) {
                return Err(ApiError::validation("speed must be between 0 and 100"));
            }
        }
        let size = match self.size.as_deref() {
            Some(s) => Some(parse_size(s)?),
            None => None,
        };
        Ok(RacePatch {
            name: self.name,
            desc: self.desc,
            playable: self.playable,
            speed: self.speed,
            darkvision: self.darkvision,
            size,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResponse {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub playable: bool,
    pub speed: i64,
    pub darkvision: bool,
    pub size: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Race> for RaceResponse {
    fn from(race: Race) -> Self {
        Self {
            id: race.id.to_string(),
            name: race.name,
            desc: race.desc,
            playable: race.playable,
            speed: race.speed,
            darkvision: race.darkvision,
            size: race.size.as_str().to_string(),
            created_at: race.created_at,
            updated_at: race.updated_at,
        }
    }
}

/// Race with its referencing characters attached
#[derive(Debug, Serialize)]
pub struct RaceDetailResponse {
    #[serde(flatten)]
    pub race: RaceResponse,
    pub characters: Vec<CharacterResponse>,
}

impl RaceDetailResponse {
    pub fn new(race: Race, characters: Vec<Character>) -> Self {
        Self {
            race: race.into(),
            characters: characters.into_iter().map(CharacterResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateRaceRequest {
        CreateRaceRequest {
            name: Some("Elf".to_string()),
            desc: Some("Graceful and long-lived".to_string()),
            playable: Some(true),
            speed: Some(30),
            darkvision: Some(true),
            size: Some("MEDIUM".to_string()),
        }
    }

    #[test]
    fn test_valid_race_passes() {
        let race = base_request().into_entity().unwrap();
        assert_eq!(race.name, "Elf");
        assert_eq!(race.size, Size::Medium);
        assert!(race.darkvision);
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut req = base_request();
        req.name = None;
        assert!(matches!(
            req.into_entity(),
            Err(ApiError::Validation(msg)) if msg.contains("name")
        ));
    }

    #[test]
    fn test_speed_out_of_range_rejected() {
        let mut req = base_request();
        req.speed = Some(120);
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_unknown_size_rejected() {
        let mut req = base_request();
        req.size = Some("COLOSSAL".to_string());
        assert!(matches!(
            req.into_entity(),
            Err(ApiError::Validation(msg)) if msg.contains("size")
        ));
    }

    #[test]
    fn test_defaults_applied_when_optional_fields_absent() {
        let req = CreateRaceRequest {
            name: Some("Dwarf".to_string()),
            desc: Some("Stout".to_string()),
            playable: None,
            speed: None,
            darkvision: None,
            size: None,
        };
        let race = req.into_entity().unwrap();
        assert_eq!(race.speed, 30);
        assert_eq!(race.size, Size::Medium);
    }

    #[test]
    fn test_patch_keeps_absent_fields_unset() {
        let req = UpdateRaceRequest {
            name: None,
            desc: None,
            playable: Some(false),
            speed: None,
            darkvision: None,
            size: None,
        };
        let patch = req.into_patch().unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.playable, Some(false));
        assert!(!patch.is_empty());
    }
}
