//! Domain entities

mod character;
mod class;
mod equipment;
mod inventory;
mod race;
mod spell;
mod weapon;

pub use character::{AbilityScores, Character};
pub use class::{Class, Subclass};
pub use equipment::{Equipment, EquipmentSlot};
pub use inventory::{Inventory, Item};
pub use race::Race;
pub use spell::{LearnedSpell, Spell};
pub use weapon::Weapon;
