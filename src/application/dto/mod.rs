//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP infrastructure can
//! serialize/deserialize without pulling serde into the domain model.
//! Request types validate themselves into domain entities or patch structs;
//! enum-valued fields arrive as strings and are parsed here so a bad value
//! yields a field-naming 400 instead of a body-level rejection.

pub mod character;
pub mod class;
pub mod equipment;
pub mod inventory;
pub mod item;
pub mod race;
pub mod spell;
pub mod spellbook;
pub mod weapon;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::application::error::ApiError;

/// Paginated list envelope: `{data, meta}`
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: (total + limit - 1) / limit.max(1),
        }
    }
}

/// Uniform `{"message": ...}` body for deletes and similar acks
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse a path or body identifier, rejecting malformed values with a 400
pub fn parse_uuid(value: &str, label: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| ApiError::validation(format!("Invalid {label} ID")))
}

/// Deserializer distinguishing an absent field from an explicit `null`.
/// Absent stays `None`; `"field": null` becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        field: Option<Option<i64>>,
    }

    #[test]
    fn test_double_option_distinguishes_absent_from_null() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.field, None);

        let null: Probe = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(null.field, Some(None));

        let set: Probe = serde_json::from_str(r#"{"field": 3}"#).unwrap();
        assert_eq!(set.field, Some(Some(3)));
    }

    #[test]
    fn test_page_meta_rounds_up() {
        let meta = PageMeta::new(51, 1, 25);
        assert_eq!(meta.total_pages, 3);
        let meta = PageMeta::new(50, 2, 25);
        assert_eq!(meta.total_pages, 2);
        let meta = PageMeta::new(0, 1, 25);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_parse_uuid_rejects_garbage() {
        assert!(parse_uuid("not-a-uuid", "race").is_err());
        assert!(parse_uuid(&Uuid::new_v4().to_string(), "race").is_ok());
    }
}
