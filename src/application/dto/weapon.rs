//! Weapon request/response shapes and validation

use serde::{Deserialize, Serialize};

use crate::application::dto::double_option;
use crate::application::error::ApiError;
use crate::domain::entities::Weapon;
use crate::domain::value_objects::{
    expected_values, is_dice_notation, Architype, WeaponId, WeaponType,
};

fn parse_weapon_type(value: &str) -> Result<WeaponType, ApiError> {
    WeaponType::parse(value).ok_or_else(|| {
        ApiError::validation(format!(
            "type must be one of {}",
            expected_values(&WeaponType::ALL.map(|t| t.as_str()))
        ))
    })
}

fn parse_architype(value: &str) -> Result<Architype, ApiError> {
    Architype::parse(value)
        .ok_or_else(|| ApiError::validation("architype must be one of SIMPLE, MARTIAL"))
}

fn check_damage(damage: &str) -> Result<(), ApiError> {
    if !is_dice_notation(damage) {
        return Err(ApiError::validation(
            "Invalid damage format. Use format like \"1d6\" or \"2d8\"",
        ));
    }
    Ok(())
}

fn check_range(range: Option<i64>, weapon_type: WeaponType) -> Result<(), ApiError> {
    if let Some(range) = range {
        if range <= 0 {
            return Err(ApiError::validation("Range must be a positive number"));
        }
    }
    if weapon_type.is_ranged() && range.is_none() {
        return Err(ApiError::validation(
            "Ranged weapons must have a range value",
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateWeaponRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    #[serde(rename = "type")]
    pub weapon_type: Option<String>,
    pub damage: Option<String>,
    pub twohanded: Option<bool>,
    pub versatile: Option<bool>,
    pub range: Option<i64>,
    pub architype: Option<String>,
}

impl CreateWeaponRequest {
    pub fn into_entity(self) -> Result<Weapon, ApiError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ApiError::validation("name is required")),
        };
        let desc = match self.desc {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ApiError::validation("desc is required")),
        };
        let weapon_type = parse_weapon_type(
            self.weapon_type
                .as_deref()
                .ok_or_else(|| ApiError::validation("type is required"))?,
        )?;
        let damage = self
            .damage
            .ok_or_else(|| ApiError::validation("damage is required"))?;
        check_damage(&damage)?;
        check_range(self.range, weapon_type)?;
        let architype = parse_architype(
            self.architype
                .as_deref()
                .ok_or_else(|| ApiError::validation("architype is required"))?,
        )?;

        let now = chrono::Utc::now();
        Ok(Weapon {
            id: WeaponId::new(),
            name,
            desc,
            weapon_type,
            damage,
            two_handed: self.twohanded.unwrap_or(false),
            versatile: self.versatile.unwrap_or(false),
            range: self.range,
            architype,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; `range: null` explicitly clears the range (rejected for
/// ranged types by `WeaponPatch::check_against` at update time).
#[derive(Debug, Deserialize)]
pub struct UpdateWeaponRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    #[serde(rename = "type")]
    pub weapon_type: Option<String>,
    pub damage: Option<String>,
    pub twohanded: Option<bool>,
    pub versatile: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub range: Option<Option<i64>>,
    pub architype: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct WeaponPatch {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub weapon_type: Option<WeaponType>,
    pub damage: Option<String>,
    pub two_handed: Option<bool>,
    pub versatile: Option<bool>,
    /// Outer None = leave unchanged, Some(None) = clear
    pub range: Option<Option<i64>>,
    pub architype: Option<Architype>,
}

impl WeaponPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.desc.is_none()
            && self.weapon_type.is_none()
            && self.damage.is_none()
            && self.two_handed.is_none()
            && self.versatile.is_none()
            && self.range.is_none()
            && self.architype.is_none()
    }

    /// The type/range rule needs the resulting state, so it is re-checked
    /// against the stored row at update time.
    pub fn check_against(&self, current: &Weapon) -> Result<(), ApiError> {
        let effective_type = self.weapon_type.unwrap_or(current.weapon_type);
        let effective_range = match self.range {
            Some(r) => r,
            None => current.range,
        };
        check_range(effective_range, effective_type)
    }
}

impl UpdateWeaponRequest {
    pub fn into_patch(self) -> Result<WeaponPatch, ApiError> {
        if let Some(damage) = self.damage.as_deref() {
            check_damage(damage)?;
        }
        if let Some(Some(range)) = self.range {
            if range <= 0 {
                return Err(ApiError::validation("Range must be a positive number"));
            }
        }
        let weapon_type = match self.weapon_type.as_deref() {
            Some(t) => Some(parse_weapon_type(t)?),
            None => None,
        };
        let architype = match self.architype.as_deref() {
            Some(a) => Some(parse_architype(a)?),
            None => None,
        };
        Ok(WeaponPatch {
            name: self.name,
            desc: self.desc,
            weapon_type,
            damage: self.damage,
            two_handed: self.twohanded,
            versatile: self.versatile,
            range: self.range,
            architype,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponResponse {
    pub id: String,
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    pub damage: String,
    pub twohanded: bool,
    pub versatile: bool,
    pub range: Option<i64>,
    pub architype: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Weapon> for WeaponResponse {
    fn from(weapon: Weapon) -> Self {
        Self {
            id: weapon.id.to_string(),
            name: weapon.name,
            desc: weapon.desc,
            weapon_type: weapon.weapon_type.as_str().to_string(),
            damage: weapon.damage,
            twohanded: weapon.two_handed,
            versatile: weapon.versatile,
            range: weapon.range,
            architype: weapon.architype.as_str().to_string(),
            created_at: weapon.created_at,
            updated_at: weapon.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateWeaponRequest {
        CreateWeaponRequest {
            name: Some("Longbow".to_string()),
            desc: Some("A tall bow of yew".to_string()),
            weapon_type: Some("LONGBOW".to_string()),
            damage: Some("1d8".to_string()),
            twohanded: Some(true),
            versatile: Some(false),
            range: Some(150),
            architype: Some("MARTIAL".to_string()),
        }
    }

    #[test]
    fn test_valid_weapon_passes() {
        let weapon = base_request().into_entity().unwrap();
        assert_eq!(weapon.weapon_type, WeaponType::Longbow);
        assert_eq!(weapon.range, Some(150));
    }

    #[test]
    fn test_bad_damage_rejected() {
        let mut req = base_request();
        req.damage = Some("invalid".to_string());
        match req.into_entity() {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("damage format")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_ranged_type_without_range_rejected() {
        let mut req = base_request();
        req.range = None;
        match req.into_entity() {
            Err(ApiError::Validation(msg)) => {
                assert_eq!(msg, "Ranged weapons must have a range value")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_melee_type_without_range_accepted() {
        let mut req = base_request();
        req.weapon_type = Some("DAGGER".to_string());
        req.range = None;
        assert!(req.into_entity().is_ok());
    }

    #[test]
    fn test_nonpositive_range_rejected() {
        let mut req = base_request();
        req.range = Some(0);
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_patch_cross_check_catches_cleared_range_on_ranged() {
        let weapon = base_request().into_entity().unwrap();
        let req: UpdateWeaponRequest = serde_json::from_str(r#"{"range": null}"#).unwrap();
        let patch = req.into_patch().unwrap();
        assert!(patch.check_against(&weapon).is_err());

        // Switching to a melee type at the same time is fine
        let req: UpdateWeaponRequest =
            serde_json::from_str(r#"{"range": null, "type": "MACE"}"#).unwrap();
        let patch = req.into_patch().unwrap();
        assert!(patch.check_against(&weapon).is_ok());
    }
}
