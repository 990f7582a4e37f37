//! Spell entity and the character/spell join

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    CharacterId, LearnedSpellId, SpellComponent, SpellId, SpellSchool,
};

/// A spell in the rulebook
#[derive(Debug, Clone)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub desc: String,
    /// 0 = cantrip, up to 9
    pub level: i64,
    pub school: SpellSchool,
    pub casting_time: String,
    pub range: String,
    pub components: Vec<SpellComponent>,
    pub duration: String,
    pub concentration: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row recording that a character has learned a spell.
/// The (character, spell) pair is unique.
#[derive(Debug, Clone)]
pub struct LearnedSpell {
    pub id: LearnedSpellId,
    pub character_id: CharacterId,
    pub spell_id: SpellId,
}

impl LearnedSpell {
    pub fn new(character_id: CharacterId, spell_id: SpellId) -> Self {
        Self {
            id: LearnedSpellId::new(),
            character_id,
            spell_id,
        }
    }
}
