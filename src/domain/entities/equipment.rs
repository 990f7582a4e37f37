//! Equipment entity - slot-based gear assignments

use crate::domain::value_objects::{CharacterId, EquipmentId, EquipmentSlotId, ItemId, SlotType};

/// A character's equipment record. One per character, created with it.
/// Gear is modeled as slot assignments rather than flat weapon/armor
/// references, one item per slot.
#[derive(Debug, Clone)]
pub struct Equipment {
    pub id: EquipmentId,
    pub character_id: CharacterId,
}

impl Equipment {
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            id: EquipmentId::new(),
            character_id,
        }
    }
}

/// One filled equipment slot
#[derive(Debug, Clone)]
pub struct EquipmentSlot {
    pub id: EquipmentSlotId,
    pub equipment_id: EquipmentId,
    pub slot: SlotType,
    pub item_id: ItemId,
}

impl EquipmentSlot {
    pub fn new(equipment_id: EquipmentId, slot: SlotType, item_id: ItemId) -> Self {
        Self {
            id: EquipmentSlotId::new(),
            equipment_id,
            slot,
            item_id,
        }
    }
}
