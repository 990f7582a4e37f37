//! Character repository
//!
//! Characters are created together with their empty inventory and equipment
//! rows in a single transaction, so every character always has both.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_datetime, decode_uuid, RepoError};
use crate::application::dto::character::CharacterPatch;
use crate::domain::entities::{AbilityScores, Character, Equipment, Inventory};
use crate::domain::value_objects::{CharacterId, ClassId, RaceId, SubclassId};

pub struct CharacterRepository {
    pool: SqlitePool,
}

impl CharacterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the character plus its empty inventory and equipment rows
    /// atomically.
    pub async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let inventory = Inventory::new(character.id);
        let equipment = Equipment::new(character.id);

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO characters \
             (id, name, level, experience, strength, dexterity, constitution, \
              intelligence, wisdom, charisma, race_id, class_id, subclass_id, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(character.level)
        .bind(character.experience)
        .bind(character.scores.strength)
        .bind(character.scores.dexterity)
        .bind(character.scores.constitution)
        .bind(character.scores.intelligence)
        .bind(character.scores.wisdom)
        .bind(character.scores.charisma)
        .bind(character.race_id.to_string())
        .bind(character.class_id.to_string())
        .bind(character.subclass_id.map(|id| id.to_string()))
        .bind(character.created_at.to_rfc3339())
        .bind(character.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO inventories (id, character_id, gold, capacity) VALUES (?, ?, ?, ?)",
        )
        .bind(inventory.id.to_string())
        .bind(inventory.character_id.to_string())
        .bind(inventory.gold)
        .bind(inventory.capacity)
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO equipment (id, character_id) VALUES (?, ?)")
            .bind(equipment.id.to_string())
            .bind(equipment.character_id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!("Created character: {}", character.name);
        Ok(())
    }

    pub async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT * FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_character).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT * FROM characters ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_character).collect()
    }

    pub async fn list_by_race(&self, race_id: RaceId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT * FROM characters WHERE race_id = ? ORDER BY name")
            .bind(race_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_character).collect()
    }

    pub async fn list_by_class(&self, class_id: ClassId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT * FROM characters WHERE class_id = ? ORDER BY name")
            .bind(class_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_character).collect()
    }

    pub async fn count_by_class(&self, class_id: ClassId) -> Result<i64, RepoError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM characters WHERE class_id = ?")
            .bind(class_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    pub async fn update(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<Character, RepoError> {
        if !patch.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE characters SET ");
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(level) = patch.level {
                set.push("level = ").push_bind_unseparated(level);
            }
            if let Some(experience) = patch.experience {
                set.push("experience = ").push_bind_unseparated(experience);
            }
            if let Some(strength) = patch.strength {
                set.push("strength = ").push_bind_unseparated(strength);
            }
            if let Some(dexterity) = patch.dexterity {
                set.push("dexterity = ").push_bind_unseparated(dexterity);
            }
            if let Some(constitution) = patch.constitution {
                set.push("constitution = ").push_bind_unseparated(constitution);
            }
            if let Some(intelligence) = patch.intelligence {
                set.push("intelligence = ").push_bind_unseparated(intelligence);
            }
            if let Some(wisdom) = patch.wisdom {
                set.push("wisdom = ").push_bind_unseparated(wisdom);
            }
            if let Some(charisma) = patch.charisma {
                set.push("charisma = ").push_bind_unseparated(charisma);
            }
            if let Some(race_id) = patch.race_id {
                set.push("race_id = ").push_bind_unseparated(race_id.to_string());
            }
            if let Some(class_id) = patch.class_id {
                set.push("class_id = ").push_bind_unseparated(class_id.to_string());
            }
            if let Some(subclass_id) = &patch.subclass_id {
                set.push("subclass_id = ")
                    .push_bind_unseparated(subclass_id.map(|id| id.to_string()));
            }
            set.push("updated_at = ")
                .push_bind_unseparated(chrono::Utc::now().to_rfc3339());
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated character: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }

    pub async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted character: {}", id);
        Ok(())
    }
}

pub(crate) fn row_to_character(row: &SqliteRow) -> Result<Character, RepoError> {
    let id: String = row.try_get("id")?;
    let race_id: String = row.try_get("race_id")?;
    let class_id: String = row.try_get("class_id")?;
    let subclass_id: Option<String> = row.try_get("subclass_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Character {
        id: CharacterId::from_uuid(decode_uuid(&id)?),
        name: row.try_get("name")?,
        level: row.try_get("level")?,
        experience: row.try_get("experience")?,
        scores: AbilityScores {
            strength: row.try_get("strength")?,
            dexterity: row.try_get("dexterity")?,
            constitution: row.try_get("constitution")?,
            intelligence: row.try_get("intelligence")?,
            wisdom: row.try_get("wisdom")?,
            charisma: row.try_get("charisma")?,
        },
        race_id: RaceId::from_uuid(decode_uuid(&race_id)?),
        class_id: ClassId::from_uuid(decode_uuid(&class_id)?),
        subclass_id: subclass_id
            .as_deref()
            .map(|v| decode_uuid(v).map(SubclassId::from_uuid))
            .transpose()?,
        created_at: decode_datetime(&created_at)?,
        updated_at: decode_datetime(&updated_at)?,
    })
}
