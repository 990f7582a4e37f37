//! Race entity - playable and non-playable ancestries

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{RaceId, Size};

/// A race available to characters
#[derive(Debug, Clone)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub desc: String,
    pub playable: bool,
    /// Base walking speed in feet, 0..=100
    pub speed: i64,
    pub darkvision: bool,
    pub size: Size,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Race {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RaceId::new(),
            name: name.into(),
            desc: desc.into(),
            playable: true,
            speed: 30,
            darkvision: false,
            size: Size::Medium,
            created_at: now,
            updated_at: now,
        }
    }
}
