//! Character spellbook repository - the character/spell join rows

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::spell_repository::row_to_spell;
use super::{decode_uuid, RepoError};
use crate::domain::entities::{LearnedSpell, Spell};
use crate::domain::value_objects::{CharacterId, LearnedSpellId, SpellId};

pub struct SpellbookRepository {
    pool: SqlitePool,
}

impl SpellbookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn learn(&self, learned: &LearnedSpell) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO character_spells (id, character_id, spell_id) VALUES (?, ?, ?)")
            .bind(learned.id.to_string())
            .bind(learned.character_id.to_string())
            .bind(learned.spell_id.to_string())
            .execute(&self.pool)
            .await?;
        tracing::debug!(
            "Character {} learned spell {}",
            learned.character_id,
            learned.spell_id
        );
        Ok(())
    }

    pub async fn exists(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<bool, RepoError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM character_spells \
             WHERE character_id = ? AND spell_id = ?",
        )
        .bind(character_id.to_string())
        .bind(spell_id.to_string())
        .fetch_one(&self.pool)
        .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    /// Every spell a character knows, spells joined in, ordered by level
    /// then name
    pub async fn list_by_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<(LearnedSpell, Spell)>, RepoError> {
        let rows = sqlx::query(
            "SELECT cs.id AS learned_id, cs.character_id, cs.spell_id, sp.* \
             FROM character_spells cs JOIN spells sp ON sp.id = cs.spell_id \
             WHERE cs.character_id = ? ORDER BY sp.level, sp.name",
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                let learned = row_to_learned_keyed(row, "learned_id")?;
                let spell = row_to_spell(row)?;
                Ok((learned, spell))
            })
            .collect()
    }

    /// Every character id that knows a given spell
    pub async fn characters_for_spell(
        &self,
        spell_id: SpellId,
    ) -> Result<Vec<LearnedSpell>, RepoError> {
        let rows = sqlx::query("SELECT * FROM character_spells WHERE spell_id = ?")
            .bind(spell_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| row_to_learned_keyed(row, "id")).collect()
    }

    pub async fn forget(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<(), RepoError> {
        let result =
            sqlx::query("DELETE FROM character_spells WHERE character_id = ? AND spell_id = ?")
                .bind(character_id.to_string())
                .bind(spell_id.to_string())
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Character {} forgot spell {}", character_id, spell_id);
        Ok(())
    }
}

fn row_to_learned_keyed(row: &SqliteRow, id_column: &str) -> Result<LearnedSpell, RepoError> {
    let id: String = row.try_get(id_column)?;
    let character_id: String = row.try_get("character_id")?;
    let spell_id: String = row.try_get("spell_id")?;
    Ok(LearnedSpell {
        id: LearnedSpellId::from_uuid(decode_uuid(&id)?),
        character_id: CharacterId::from_uuid(decode_uuid(&character_id)?),
        spell_id: SpellId::from_uuid(decode_uuid(&spell_id)?),
    })
}
