//! Class and Subclass repository

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_datetime, decode_uuid, RepoError};
use crate::application::dto::class::ClassPatch;
use crate::domain::entities::{Class, Subclass};
use crate::domain::value_objects::{Ability, ClassId, HitDie, SubclassId};

pub struct ClassRepository {
    pool: SqlitePool,
}

impl ClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, class: &Class) -> Result<(), RepoError> {
        let saving_throws = encode_abilities(&class.saving_throws);
        sqlx::query(
            "INSERT INTO classes \
             (id, name, description, hit_die, primary_ability, saving_throws, spellcasting, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(class.id.to_string())
        .bind(&class.name)
        .bind(&class.desc)
        .bind(class.hit_die.sides())
        .bind(class.primary_ability.as_str())
        .bind(saving_throws)
        .bind(class.spellcasting)
        .bind(class.created_at.to_rfc3339())
        .bind(class.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        tracing::debug!("Created class: {}", class.name);
        Ok(())
    }

    pub async fn get(&self, id: ClassId) -> Result<Option<Class>, RepoError> {
        let row = sqlx::query("SELECT * FROM classes WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_class).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Class>, RepoError> {
        let rows = sqlx::query("SELECT * FROM classes ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_class).collect()
    }

    pub async fn update(&self, id: ClassId, patch: &ClassPatch) -> Result<Class, RepoError> {
        if !patch.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE classes SET ");
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(desc) = &patch.desc {
                set.push("description = ").push_bind_unseparated(desc.clone());
            }
            if let Some(hit_die) = patch.hit_die {
                set.push("hit_die = ").push_bind_unseparated(hit_die.sides());
            }
            if let Some(primary_ability) = patch.primary_ability {
                set.push("primary_ability = ")
                    .push_bind_unseparated(primary_ability.as_str());
            }
            if let Some(saving_throws) = &patch.saving_throws {
                set.push("saving_throws = ")
                    .push_bind_unseparated(encode_abilities(saving_throws));
            }
            if let Some(spellcasting) = patch.spellcasting {
                set.push("spellcasting = ").push_bind_unseparated(spellcasting);
            }
            set.push("updated_at = ")
                .push_bind_unseparated(chrono::Utc::now().to_rfc3339());
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated class: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }

    pub async fn delete(&self, id: ClassId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted class: {}", id);
        Ok(())
    }

    // Subclasses (owned by their class, cascade-deleted with it)

    pub async fn create_subclass(&self, subclass: &Subclass) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO subclasses (id, class_id, name, description) VALUES (?, ?, ?, ?)",
        )
        .bind(subclass.id.to_string())
        .bind(subclass.class_id.to_string())
        .bind(&subclass.name)
        .bind(&subclass.desc)
        .execute(&self.pool)
        .await?;
        tracing::debug!("Created subclass: {}", subclass.name);
        Ok(())
    }

    pub async fn get_subclass(&self, id: SubclassId) -> Result<Option<Subclass>, RepoError> {
        let row = sqlx::query("SELECT * FROM subclasses WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_subclass).transpose()
    }

    pub async fn list_subclasses(&self, class_id: ClassId) -> Result<Vec<Subclass>, RepoError> {
        let rows = sqlx::query("SELECT * FROM subclasses WHERE class_id = ? ORDER BY name")
            .bind(class_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_subclass).collect()
    }

    pub async fn delete_subclass(
        &self,
        class_id: ClassId,
        id: SubclassId,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM subclasses WHERE id = ? AND class_id = ?")
            .bind(id.to_string())
            .bind(class_id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted subclass: {}", id);
        Ok(())
    }
}

fn encode_abilities(abilities: &[Ability]) -> String {
    serde_json::to_string(
        &abilities.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
    )
    .unwrap_or_else(|_| "[]".to_string())
}

fn decode_abilities(raw: &str) -> Result<Vec<Ability>, RepoError> {
    let names: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| RepoError::Decode(format!("bad saving throws: {raw}")))?;
    names
        .iter()
        .map(|n| {
            Ability::parse(n).ok_or_else(|| RepoError::Decode(format!("bad ability: {n}")))
        })
        .collect()
}

pub(crate) fn row_to_class(row: &SqliteRow) -> Result<Class, RepoError> {
    let id: String = row.try_get("id")?;
    let hit_die: i64 = row.try_get("hit_die")?;
    let primary_ability: String = row.try_get("primary_ability")?;
    let saving_throws: String = row.try_get("saving_throws")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Class {
        id: ClassId::from_uuid(decode_uuid(&id)?),
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
        hit_die: HitDie::from_sides(hit_die)
            .ok_or_else(|| RepoError::Decode(format!("bad hit die: {hit_die}")))?,
        primary_ability: Ability::parse(&primary_ability)
            .ok_or_else(|| RepoError::Decode(format!("bad ability: {primary_ability}")))?,
        saving_throws: decode_abilities(&saving_throws)?,
        spellcasting: row.try_get("spellcasting")?,
        created_at: decode_datetime(&created_at)?,
        updated_at: decode_datetime(&updated_at)?,
    })
}

pub(crate) fn row_to_subclass(row: &SqliteRow) -> Result<Subclass, RepoError> {
    let id: String = row.try_get("id")?;
    let class_id: String = row.try_get("class_id")?;
    Ok(Subclass {
        id: SubclassId::from_uuid(decode_uuid(&id)?),
        class_id: ClassId::from_uuid(decode_uuid(&class_id)?),
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
    })
}
