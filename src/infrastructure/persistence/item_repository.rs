//! Item repository

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{decode_datetime, decode_uuid, RepoError};
use crate::application::dto::item::ItemPatch;
use crate::domain::entities::Item;
use crate::domain::value_objects::{InventoryId, ItemId};

pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, item: &Item) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO items \
             (id, name, description, quantity, inventory_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(&item.name)
        .bind(&item.desc)
        .bind(item.quantity)
        .bind(item.inventory_id.map(|id| id.to_string()))
        .bind(item.created_at.to_rfc3339())
        .bind(item.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        tracing::debug!("Created item: {}", item.name);
        Ok(())
    }

    pub async fn get(&self, id: ItemId) -> Result<Option<Item>, RepoError> {
        let row = sqlx::query("SELECT * FROM items WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_item).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Item>, RepoError> {
        let rows = sqlx::query("SELECT * FROM items ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_item).collect()
    }

    pub async fn list_by_inventory(
        &self,
        inventory_id: InventoryId,
    ) -> Result<Vec<Item>, RepoError> {
        let rows = sqlx::query("SELECT * FROM items WHERE inventory_id = ? ORDER BY name")
            .bind(inventory_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_item).collect()
    }

    pub async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RepoError> {
        if !patch.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE items SET ");
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(desc) = &patch.desc {
                set.push("description = ").push_bind_unseparated(desc.clone());
            }
            if let Some(quantity) = patch.quantity {
                set.push("quantity = ").push_bind_unseparated(quantity);
            }
            set.push("updated_at = ")
                .push_bind_unseparated(chrono::Utc::now().to_rfc3339());
            qb.push(" WHERE id = ").push_bind(id.to_string());

            let result = qb.build().execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            tracing::debug!("Updated item: {}", id);
        }
        self.get(id).await?.ok_or(RepoError::NotFound)
    }

    pub async fn delete(&self, id: ItemId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!("Deleted item: {}", id);
        Ok(())
    }

    /// Attach an existing item to an inventory
    pub async fn attach(&self, id: ItemId, inventory_id: InventoryId) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE items SET inventory_id = ? WHERE id = ?")
            .bind(inventory_id.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    /// Detach an item from an inventory; not-found when the item is not in
    /// that inventory
    pub async fn detach(&self, id: ItemId, inventory_id: InventoryId) -> Result<(), RepoError> {
        let result =
            sqlx::query("UPDATE items SET inventory_id = NULL WHERE id = ? AND inventory_id = ?")
                .bind(id.to_string())
                .bind(inventory_id.to_string())
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    /// Replace the full set of items attached to an inventory
    pub async fn set_attached(
        &self,
        inventory_id: InventoryId,
        item_ids: &[ItemId],
    ) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE items SET inventory_id = NULL WHERE inventory_id = ?")
            .bind(inventory_id.to_string())
            .execute(&mut *tx)
            .await?;
        for item_id in item_ids {
            let result = sqlx::query("UPDATE items SET inventory_id = ? WHERE id = ?")
                .bind(inventory_id.to_string())
                .bind(item_id.to_string())
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
        }
        tx.commit().await?;
        Ok(())
    }
}

pub(crate) fn row_to_item(row: &SqliteRow) -> Result<Item, RepoError> {
    let id: String = row.try_get("id")?;
    let inventory_id: Option<String> = row.try_get("inventory_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Item {
        id: ItemId::from_uuid(decode_uuid(&id)?),
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
        quantity: row.try_get("quantity")?,
        inventory_id: inventory_id
            .as_deref()
            .map(|v| decode_uuid(v).map(InventoryId::from_uuid))
            .transpose()?,
        created_at: decode_datetime(&created_at)?,
        updated_at: decode_datetime(&updated_at)?,
    })
}
