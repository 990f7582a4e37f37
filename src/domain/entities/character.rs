//! Character entity - the sheet's central aggregate

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CharacterId, ClassId, RaceId, SubclassId};

/// The six ability scores, each 1..=20
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityScores {
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// A player character. References exactly one race and class, optionally a
/// subclass; its inventory and equipment rows are created alongside it.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// 1..=20
    pub level: i64,
    /// >= 0
    pub experience: i64,
    pub scores: AbilityScores,
    pub race_id: RaceId,
    pub class_id: ClassId,
    pub subclass_id: Option<SubclassId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(name: impl Into<String>, race_id: RaceId, class_id: ClassId) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            level: 1,
            experience: 0,
            scores: AbilityScores::default(),
            race_id,
            class_id,
            subclass_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}
