//! Equipment repository
//!
//! Equipment rows are created by the character repository. Slot assignments
//! are replaced as a set: an update clears the existing slots and inserts
//! the new ones in one transaction.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::item_repository::row_to_item;
use super::{decode_uuid, RepoError};
use crate::application::dto::equipment::SlotAssignment;
use crate::domain::entities::{Equipment, EquipmentSlot, Item};
use crate::domain::value_objects::{
    CharacterId, EquipmentId, EquipmentSlotId, ItemId, SlotType,
};

pub struct EquipmentRepository {
    pool: SqlitePool,
}

impl EquipmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<Equipment>, RepoError> {
        let row = sqlx::query("SELECT * FROM equipment WHERE character_id = ?")
            .bind(character_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_equipment).transpose()
    }

    /// Filled slots with their items, ordered by slot name
    pub async fn slots_with_items(
        &self,
        equipment_id: EquipmentId,
    ) -> Result<Vec<(EquipmentSlot, Item)>, RepoError> {
        let rows = sqlx::query(
            "SELECT s.id AS slot_row_id, s.equipment_id, s.slot, s.item_id, i.* \
             FROM equipment_slots s JOIN items i ON i.id = s.item_id \
             WHERE s.equipment_id = ? ORDER BY s.slot",
        )
        .bind(equipment_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                let slot = row_to_slot_keyed(row, "slot_row_id")?;
                let item = row_to_item(row)?;
                Ok((slot, item))
            })
            .collect()
    }

    pub async fn replace_slots(
        &self,
        equipment_id: EquipmentId,
        assignments: &[SlotAssignment],
    ) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM equipment_slots WHERE equipment_id = ?")
            .bind(equipment_id.to_string())
            .execute(&mut *tx)
            .await?;
        for assignment in assignments {
            let slot = EquipmentSlot::new(equipment_id, assignment.slot, assignment.item_id);
            sqlx::query(
                "INSERT INTO equipment_slots (id, equipment_id, slot, item_id) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(slot.id.to_string())
            .bind(slot.equipment_id.to_string())
            .bind(slot.slot.as_str())
            .bind(slot.item_id.to_string())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::debug!("Replaced equipment slots: {}", equipment_id);
        Ok(())
    }
}

pub(crate) fn row_to_equipment(row: &SqliteRow) -> Result<Equipment, RepoError> {
    let id: String = row.try_get("id")?;
    let character_id: String = row.try_get("character_id")?;
    Ok(Equipment {
        id: EquipmentId::from_uuid(decode_uuid(&id)?),
        character_id: CharacterId::from_uuid(decode_uuid(&character_id)?),
    })
}

fn row_to_slot_keyed(row: &SqliteRow, id_column: &str) -> Result<EquipmentSlot, RepoError> {
    let id: String = row.try_get(id_column)?;
    let equipment_id: String = row.try_get("equipment_id")?;
    let slot: String = row.try_get("slot")?;
    let item_id: String = row.try_get("item_id")?;
    Ok(EquipmentSlot {
        id: EquipmentSlotId::from_uuid(decode_uuid(&id)?),
        equipment_id: EquipmentId::from_uuid(decode_uuid(&equipment_id)?),
        slot: SlotType::parse(&slot).ok_or_else(|| RepoError::Decode(format!("bad slot: {slot}")))?,
        item_id: ItemId::from_uuid(decode_uuid(&item_id)?),
    })
}
