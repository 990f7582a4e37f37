//! Weapon entity

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Architype, WeaponId, WeaponType};

/// A weapon in the rulebook
#[derive(Debug, Clone)]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,
    pub desc: String,
    pub weapon_type: WeaponType,
    /// Dice notation, e.g. "1d6"
    pub damage: String,
    pub two_handed: bool,
    pub versatile: bool,
    /// Reach in feet; required for ranged weapon types
    pub range: Option<i64>,
    pub architype: Architype,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
