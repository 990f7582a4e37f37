//! Value objects shared across the domain

mod dice;
mod enums;
mod ids;

pub use dice::is_dice_notation;
pub use enums::{
    expected_values, Ability, Architype, HitDie, Size, SlotType, SpellComponent, SpellSchool,
    WeaponType,
};
pub use ids::{
    CharacterId, ClassId, EquipmentId, EquipmentSlotId, InventoryId, ItemId, LearnedSpellId,
    RaceId, SpellId, SubclassId, WeaponId,
};
