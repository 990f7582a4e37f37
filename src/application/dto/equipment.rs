//! Equipment request/response shapes, accessed through the owning character

use serde::{Deserialize, Serialize};

use crate::application::dto::item::ItemResponse;
use crate::application::dto::parse_uuid;
use crate::application::error::ApiError;
use crate::domain::entities::{Equipment, EquipmentSlot, Item};
use crate::domain::value_objects::{expected_values, ItemId, SlotType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignmentRequest {
    pub slot: Option<String>,
    pub item_id: Option<String>,
}

/// Replaces the full set of slot assignments
#[derive(Debug, Deserialize)]
pub struct UpdateEquipmentRequest {
    pub slots: Option<Vec<SlotAssignmentRequest>>,
}

#[derive(Debug, Clone)]
pub struct SlotAssignment {
    pub slot: SlotType,
    pub item_id: ItemId,
}

impl UpdateEquipmentRequest {
    pub fn into_assignments(self) -> Result<Vec<SlotAssignment>, ApiError> {
        let slots = self
            .slots
            .ok_or_else(|| ApiError::validation("slots is required"))?;

        let mut assignments = Vec::with_capacity(slots.len());
        for entry in slots {
            let slot_name = entry
                .slot
                .as_deref()
                .ok_or_else(|| ApiError::validation("slot is required"))?;
            let slot = SlotType::parse(slot_name).ok_or_else(|| {
                ApiError::validation(format!(
                    "slot must be one of {}",
                    expected_values(&SlotType::ALL.map(|s| s.as_str()))
                ))
            })?;
            let item_id = entry
                .item_id
                .as_deref()
                .ok_or_else(|| ApiError::validation("itemId is required"))?;
            if assignments.iter().any(|a: &SlotAssignment| a.slot == slot) {
                return Err(ApiError::validation(format!(
                    "slot {} assigned more than once",
                    slot.as_str()
                )));
            }
            assignments.push(SlotAssignment {
                slot,
                item_id: ItemId::from_uuid(parse_uuid(item_id, "item")?),
            });
        }
        Ok(assignments)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    pub id: String,
    pub character_id: String,
}

impl From<Equipment> for EquipmentResponse {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id.to_string(),
            character_id: equipment.character_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub slot: String,
    pub item: Option<ItemResponse>,
}

/// Equipment with its slot assignments and equipped items attached
#[derive(Debug, Serialize)]
pub struct EquipmentDetailResponse {
    #[serde(flatten)]
    pub equipment: EquipmentResponse,
    pub slots: Vec<SlotResponse>,
}

impl EquipmentDetailResponse {
    pub fn new(equipment: Equipment, slots: Vec<(EquipmentSlot, Option<Item>)>) -> Self {
        Self {
            equipment: equipment.into(),
            slots: slots
                .into_iter()
                .map(|(slot, item)| SlotResponse {
                    id: slot.id.to_string(),
                    slot: slot.slot.as_str().to_string(),
                    item: item.map(ItemResponse::from),
                })
                .collect(),
        }
    }
}
