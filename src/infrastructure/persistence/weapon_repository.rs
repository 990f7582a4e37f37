//! Weapon repository

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_datetime, decode_uuid, RepoError};
use crate::application::dto::weapon::WeaponPatch;
use crate::domain::entities::Weapon;
use crate::domain::value_objects::{Architype, WeaponId, WeaponType};

pub struct WeaponRepository {
    pool: SqlitePool,
}

impl WeaponRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, weapon: &Weapon) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO weapons \
             (id, name, description, weapon_type, damage, two_handed, versatile, weapon_range, \
              architype, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(weapon.id.to_string())
        .bind(&weapon.name)
        .bind(&weapon.desc)
        .bind(weapon.weapon_type.as_str())
        .bind(&weapon.damage)
        .bind(weapon.two_handed)
        .bind(weapon.versatile)
        .bind(weapon.range)
        .bind(weapon.architype.as_str())
        .bind(weapon.created_at.to_rfc3339())
        .bind(weapon.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        tracing::debug!("Created weapon: {}", weapon.name);
        Ok(())
    }

    pub async fn get(&self, id: WeaponId) -> Result<Option<Weapon>, RepoError> {
        let row = sqlx::query("SELECT * FROM weapons WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_weapon).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Weapon>, RepoError> {
        let rows = sqlx::query("SELECT * FROM weapons ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_weapon).collect()
    }

    pub async fn update(&self, id: WeaponId, patch: &WeaponPatch) -> Result<Weapon, RepoError> {
        if !patch.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE weapons SET ");
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(desc) = &patch.desc {
                set.push("description = ").push_bind_unseparated(desc.clone());
            }
            if let Some(weapon_type) = patch.weapon_type {
                set.push("weapon_type = ")
                    .push_bind_unseparated(weapon_type.as_str());
            }
            if let Some(damage) = &patch.damage {
                set.push("damage = ").push_bind_unseparated(damage.clone());
            }
            if let Some(two_handed) = patch.two_handed {
                set.push("two_handed = ").push_bind_unseparated(two_handed);
            }
            if let Some(versatile) = patch.versatile {
                set.push("versatile = ").push_bind_unseparated(versatile);
            }
            if let Some(range) = patch.range {
                set.push("weapon_range = ").push_bind_unseparated(range);
            }
            if let Some(architype) = patch.architype {
                set.push("architype = ")
                    .push_bind_unseparated(architype.as_str());
            }
            set.push("updated_at = ")
                .push_bind_unseparated(chrono::Utc::now().to_rfc3339());
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated weapon: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }

    pub async fn delete(&self, id: WeaponId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM weapons WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted weapon: {}", id);
        Ok(())
    }
}

pub(crate) fn row_to_weapon(row: &SqliteRow) -> Result<Weapon, RepoError> {
    let id: String = row.try_get("id")?;
    let weapon_type: String = row.try_get("weapon_type")?;
    let architype: String = row.try_get("architype")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Weapon {
        id: WeaponId::from_uuid(decode_uuid(&id)?),
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
        weapon_type: WeaponType::parse(&weapon_type)
            .ok_or_else(|| RepoError::Decode(format!("bad weapon type: {weapon_type}")))?,
        damage: row.try_get("damage")?,
        two_handed: row.try_get("two_handed")?,
        versatile: row.try_get("versatile")?,
        range: row.try_get("weapon_range")?,
        architype: Architype::parse(&architype)
            .ok_or_else(|| RepoError::Decode(format!("bad architype: {architype}")))?,
        created_at: decode_datetime(&created_at)?,
        updated_at: decode_datetime(&updated_at)?,
    })
}
