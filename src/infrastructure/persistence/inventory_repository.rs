//! Inventory repository
//!
//! Inventory rows are created by the character repository; this one only
//! reads and updates them.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_uuid, RepoError};
use crate::application::dto::inventory::InventoryPatch;
use crate::domain::entities::Inventory;
use crate::domain::value_objects::{CharacterId, InventoryId};

pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: InventoryId) -> Result<Option<Inventory>, RepoError> {
        let row = sqlx::query("SELECT * FROM inventories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_inventory).transpose()
    }

    pub async fn get_by_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<Inventory>, RepoError> {
        let row = sqlx::query("SELECT * FROM inventories WHERE character_id = ?")
            .bind(character_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_inventory).transpose()
    }

    pub async fn update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<Inventory, RepoError> {
        if patch.gold.is_some() || patch.capacity.is_some() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE inventories SET ");
            let mut set = qb.separated(", ");
            if let Some(gold) = patch.gold {
                set.push("gold = ").push_bind_unseparated(gold);
            }
            if let Some(capacity) = patch.capacity {
                set.push("capacity = ").push_bind_unseparated(capacity);
            }
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated inventory: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }
}

pub(crate) fn row_to_inventory(row: &SqliteRow) -> Result<Inventory, RepoError> {
    let id: String = row.try_get("id")?;
    let character_id: String = row.try_get("character_id")?;
    Ok(Inventory {
        id: InventoryId::from_uuid(decode_uuid(&id)?),
        character_id: CharacterId::from_uuid(decode_uuid(&character_id)?),
        gold: row.try_get("gold")?,
        capacity: row.try_get("capacity")?,
    })
}
