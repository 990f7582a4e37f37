//! Race repository

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_datetime, decode_uuid, RepoError};
use crate::application::dto::race::RacePatch;
use crate::domain::entities::Race;
use crate::domain::value_objects::{RaceId, Size};
use crate::infrastructure::query::{FilterValue, ListParams};

/// Wire fields exposed to the query filter builder
pub const LIST_FIELDS: &[&str] = &["name", "desc", "playable", "speed", "darkvision", "size"];

fn column_for(field: &str) -> &'static str {
    match field {
        "desc" => "description",
        "name" => "name",
        "playable" => "playable",
        "speed" => "speed",
        "darkvision" => "darkvision",
        _ => "size",
    }
}

pub struct RaceRepository {
    pool: SqlitePool,
}

impl RaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, race: &Race) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO races \
             (id, name, description, playable, speed, darkvision, size, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(race.id.to_string())
        .bind(&race.name)
        .bind(&race.desc)
        .bind(race.playable)
        .bind(race.speed)
        .bind(race.darkvision)
        .bind(race.size.as_str())
        .bind(race.created_at.to_rfc3339())
        .bind(race.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        tracing::debug!("Created race: {}", race.name);
        Ok(())
    }

    pub async fn get(&self, id: RaceId) -> Result<Option<Race>, RepoError> {
        let row = sqlx::query("SELECT * FROM races WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_race).transpose()
    }

    /// Filtered, sorted, paginated list plus the total row count for the
    /// same filters
    pub async fn list(&self, params: &ListParams) -> Result<(Vec<Race>, i64), RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM races");
        push_filters(&mut qb, &params.filters);
        if let Some((field, order)) = &params.sort {
            qb.push(" ORDER BY ")
                .push(column_for(field))
                .push(" ")
                .push(order.as_sql());
        } else {
            qb.push(" ORDER BY name ASC");
        }
        qb.push(" LIMIT ")
            .push_bind(params.limit)
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let races = rows.iter().map(row_to_race).collect::<Result<Vec<_>, _>>()?;

        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM races");
        push_filters(&mut count_qb, &params.filters);
        let total: i64 = count_qb.build().fetch_one(&self.pool).await?.try_get(0)?;

        Ok((races, total))
    }

    pub async fn update(&self, id: RaceId, patch: &RacePatch) -> Result<Race, RepoError> {
        if !patch.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE races SET ");
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(desc) = &patch.desc {
                set.push("description = ").push_bind_unseparated(desc.clone());
            }
            if let Some(playable) = patch.playable {
                set.push("playable = ").push_bind_unseparated(playable);
            }
            if let Some(speed) = patch.speed {
                set.push("speed = ").push_bind_unseparated(speed);
            }
            if let Some(darkvision) = patch.darkvision {
                set.push("darkvision = ").push_bind_unseparated(darkvision);
            }
            if let Some(size) = patch.size {
                set.push("size = ").push_bind_unseparated(size.as_str());
            }
            set.push("updated_at = ")
                .push_bind_unseparated(chrono::Utc::now().to_rfc3339());
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated race: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }

    pub async fn delete(&self, id: RaceId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM races WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted race: {}", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filters: &[(String, FilterValue)]) {
    for (i, (field, value)) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        let column = column_for(field);
        match value {
            FilterValue::Int(n) => {
                qb.push(column).push(" = ").push_bind(*n);
            }
            FilterValue::Bool(b) => {
                qb.push(column).push(" = ").push_bind(*b);
            }
            FilterValue::Text(s) => {
                qb.push("LOWER(")
                    .push(column)
                    .push(") LIKE ")
                    .push_bind(format!("%{}%", s.to_lowercase()));
            }
        }
    }
}

pub(crate) fn row_to_race(row: &SqliteRow) -> Result<Race, RepoError> {
    let id: String = row.try_get("id")?;
    let size: String = row.try_get("size")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Race {
        id: RaceId::from_uuid(decode_uuid(&id)?),
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
        playable: row.try_get("playable")?,
        speed: row.try_get("speed")?,
        darkvision: row.try_get("darkvision")?,
        size: Size::parse(&size).ok_or_else(|| RepoError::Decode(format!("bad size: {size}")))?,
        created_at: decode_datetime(&created_at)?,
        updated_at: decode_datetime(&updated_at)?,
    })
}
