//! Class and Subclass entities

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Ability, ClassId, HitDie, SubclassId};

/// A character class (Fighter, Wizard, ...)
#[derive(Debug, Clone)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub desc: String,
    pub hit_die: HitDie,
    pub primary_ability: Ability,
    pub saving_throws: Vec<Ability>,
    pub spellcasting: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A specialization belonging to exactly one class
#[derive(Debug, Clone)]
pub struct Subclass {
    pub id: SubclassId,
    pub class_id: ClassId,
    pub name: String,
    pub desc: String,
}

impl Subclass {
    pub fn new(class_id: ClassId, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            id: SubclassId::new(),
            class_id,
            name: name.into(),
            desc: desc.into(),
        }
    }
}
