//! Spell repository

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_datetime, decode_uuid, RepoError};
use crate::application::dto::spell::SpellPatch;
use crate::domain::entities::Spell;
use crate::domain::value_objects::{SpellComponent, SpellId, SpellSchool};

pub struct SpellRepository {
    pool: SqlitePool,
}

impl SpellRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, spell: &Spell) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO spells \
             (id, name, description, level, school, casting_time, spell_range, components, \
              duration, concentration, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(spell.id.to_string())
        .bind(&spell.name)
        .bind(&spell.desc)
        .bind(spell.level)
        .bind(spell.school.as_str())
        .bind(&spell.casting_time)
        .bind(&spell.range)
        .bind(encode_components(&spell.components))
        .bind(&spell.duration)
        .bind(spell.concentration)
        .bind(spell.created_at.to_rfc3339())
        .bind(spell.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        tracing::debug!("Created spell: {}", spell.name);
        Ok(())
    }

    pub async fn get(&self, id: SpellId) -> Result<Option<Spell>, RepoError> {
        let row = sqlx::query("SELECT * FROM spells WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_spell).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Spell>, RepoError> {
        let rows = sqlx::query("SELECT * FROM spells ORDER BY level, name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_spell).collect()
    }

    pub async fn update(&self, id: SpellId, patch: &SpellPatch) -> Result<Spell, RepoError> {
        if !patch.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE spells SET ");
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(desc) = &patch.desc {
                set.push("description = ").push_bind_unseparated(desc.clone());
            }
            if let Some(level) = patch.level {
                set.push("level = ").push_bind_unseparated(level);
            }
            if let Some(school) = patch.school {
                set.push("school = ").push_bind_unseparated(school.as_str());
            }
            if let Some(casting_time) = &patch.casting_time {
                set.push("casting_time = ")
                    .push_bind_unseparated(casting_time.clone());
            }
            if let Some(range) = &patch.range {
                set.push("spell_range = ").push_bind_unseparated(range.clone());
            }
            if let Some(components) = &patch.components {
                set.push("components = ")
                    .push_bind_unseparated(encode_components(components));
            }
            if let Some(duration) = &patch.duration {
                set.push("duration = ").push_bind_unseparated(duration.clone());
            }
            if let Some(concentration) = patch.concentration {
                set.push("concentration = ").push_bind_unseparated(concentration);
            }
            set.push("updated_at = ")
                .push_bind_unseparated(chrono::Utc::now().to_rfc3339());
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated spell: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }

    pub async fn delete(&self, id: SpellId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM spells WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted spell: {}", id);
        Ok(())
    }
}

fn encode_components(components: &[SpellComponent]) -> String {
    serde_json::to_string(
        &components.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
    )
    .unwrap_or_else(|_| "[]".to_string())
}

fn decode_components(raw: &str) -> Result<Vec<SpellComponent>, RepoError> {
    let names: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| RepoError::Decode(format!("bad components: {raw}")))?;
    names
        .iter()
        .map(|n| {
            SpellComponent::parse(n)
                .ok_or_else(|| RepoError::Decode(format!("bad component: {n}")))
        })
        .collect()
}

pub(crate) fn row_to_spell(row: &SqliteRow) -> Result<Spell, RepoError> {
    let id: String = row.try_get("id")?;
    let school: String = row.try_get("school")?;
    let components: String = row.try_get("components")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Spell {
        id: SpellId::from_uuid(decode_uuid(&id)?),
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
        level: row.try_get("level")?,
        school: SpellSchool::parse(&school)
            .ok_or_else(|| RepoError::Decode(format!("bad school: {school}")))?,
        casting_time: row.try_get("casting_time")?,
        range: row.try_get("spell_range")?,
        components: decode_components(&components)?,
        duration: row.try_get("duration")?,
        concentration: row.try_get("concentration")?,
        created_at: decode_datetime(&created_at)?,
        updated_at: decode_datetime(&updated_at)?,
    })
}
