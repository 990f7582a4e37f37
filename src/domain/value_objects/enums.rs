//! Enumerated rulebook values shared across entities
//!
//! Wire and storage formats both use the SCREAMING_SNAKE_CASE names, so every
//! enum carries an `as_str`/`parse` pair instead of relying on serde derives.

/// Creature size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl Size {
    pub const ALL: [Size; 6] = [
        Size::Tiny,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::Huge,
        Size::Gargantuan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Tiny => "TINY",
            Size::Small => "SMALL",
            Size::Medium => "MEDIUM",
            Size::Large => "LARGE",
            Size::Huge => "HUGE",
            Size::Gargantuan => "GARGANTUAN",
        }
    }

    pub fn parse(s: &str) -> Option<Size> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Strength => "STRENGTH",
            Ability::Dexterity => "DEXTERITY",
            Ability::Constitution => "CONSTITUTION",
            Ability::Intelligence => "INTELLIGENCE",
            Ability::Wisdom => "WISDOM",
            Ability::Charisma => "CHARISMA",
        }
    }

    pub fn parse(s: &str) -> Option<Ability> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Class hit dice (d6 through d12)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitDie {
    D6,
    D8,
    D10,
    D12,
}

impl HitDie {
    pub fn sides(&self) -> i64 {
        match self {
            HitDie::D6 => 6,
            HitDie::D8 => 8,
            HitDie::D10 => 10,
            HitDie::D12 => 12,
        }
    }

    pub fn from_sides(sides: i64) -> Option<HitDie> {
        match sides {
            6 => Some(HitDie::D6),
            8 => Some(HitDie::D8),
            10 => Some(HitDie::D10),
            12 => Some(HitDie::D12),
            _ => None,
        }
    }
}

/// The eight schools of magic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

impl SpellSchool {
    pub const ALL: [SpellSchool; 8] = [
        SpellSchool::Abjuration,
        SpellSchool::Conjuration,
        SpellSchool::Divination,
        SpellSchool::Enchantment,
        SpellSchool::Evocation,
        SpellSchool::Illusion,
        SpellSchool::Necromancy,
        SpellSchool::Transmutation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpellSchool::Abjuration => "ABJURATION",
            SpellSchool::Conjuration => "CONJURATION",
            SpellSchool::Divination => "DIVINATION",
            SpellSchool::Enchantment => "ENCHANTMENT",
            SpellSchool::Evocation => "EVOCATION",
            SpellSchool::Illusion => "ILLUSION",
            SpellSchool::Necromancy => "NECROMANCY",
            SpellSchool::Transmutation => "TRANSMUTATION",
        }
    }

    pub fn parse(s: &str) -> Option<SpellSchool> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Spell components (verbal, somatic, material)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellComponent {
    Verbal,
    Somatic,
    Material,
}

impl SpellComponent {
    pub const ALL: [SpellComponent; 3] = [
        SpellComponent::Verbal,
        SpellComponent::Somatic,
        SpellComponent::Material,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpellComponent::Verbal => "V",
            SpellComponent::Somatic => "S",
            SpellComponent::Material => "M",
        }
    }

    pub fn parse(s: &str) -> Option<SpellComponent> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Weapon types, by weapon name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponType {
    Dagger,
    Shortsword,
    Longsword,
    Greatsword,
    Handaxe,
    Battleaxe,
    Mace,
    Warhammer,
    Spear,
    Quarterstaff,
    Shortbow,
    Longbow,
    LightCrossbow,
    HeavyCrossbow,
    Sling,
    Dart,
}

impl WeaponType {
    pub const ALL: [WeaponType; 16] = [
        WeaponType::Dagger,
        WeaponType::Shortsword,
        WeaponType::Longsword,
        WeaponType::Greatsword,
        WeaponType::Handaxe,
        WeaponType::Battleaxe,
        WeaponType::Mace,
        WeaponType::Warhammer,
        WeaponType::Spear,
        WeaponType::Quarterstaff,
        WeaponType::Shortbow,
        WeaponType::Longbow,
        WeaponType::LightCrossbow,
        WeaponType::HeavyCrossbow,
        WeaponType::Sling,
        WeaponType::Dart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Dagger => "DAGGER",
            WeaponType::Shortsword => "SHORTSWORD",
            WeaponType::Longsword => "LONGSWORD",
            WeaponType::Greatsword => "GREATSWORD",
            WeaponType::Handaxe => "HANDAXE",
            WeaponType::Battleaxe => "BATTLEAXE",
            WeaponType::Mace => "MACE",
            WeaponType::Warhammer => "WARHAMMER",
            WeaponType::Spear => "SPEAR",
            WeaponType::Quarterstaff => "QUARTERSTAFF",
            WeaponType::Shortbow => "SHORTBOW",
            WeaponType::Longbow => "LONGBOW",
            WeaponType::LightCrossbow => "LIGHT_CROSSBOW",
            WeaponType::HeavyCrossbow => "HEAVY_CROSSBOW",
            WeaponType::Sling => "SLING",
            WeaponType::Dart => "DART",
        }
    }

    pub fn parse(s: &str) -> Option<WeaponType> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Whether weapons of this type attack at range and therefore
    /// must carry a range value
    pub fn is_ranged(&self) -> bool {
        matches!(
            self,
            WeaponType::Shortbow
                | WeaponType::Longbow
                | WeaponType::LightCrossbow
                | WeaponType::HeavyCrossbow
                | WeaponType::Sling
                | WeaponType::Dart
        )
    }
}

/// Simple vs martial weapon proficiency groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architype {
    Simple,
    Martial,
}

impl Architype {
    pub const ALL: [Architype; 2] = [Architype::Simple, Architype::Martial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architype::Simple => "SIMPLE",
            Architype::Martial => "MARTIAL",
        }
    }

    pub fn parse(s: &str) -> Option<Architype> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Equipment slots a character can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    Head,
    Chest,
    Hands,
    Feet,
    MainHand,
    OffHand,
    Ring,
    Neck,
}

impl SlotType {
    pub const ALL: [SlotType; 8] = [
        SlotType::Head,
        SlotType::Chest,
        SlotType::Hands,
        SlotType::Feet,
        SlotType::MainHand,
        SlotType::OffHand,
        SlotType::Ring,
        SlotType::Neck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotType::Head => "HEAD",
            SlotType::Chest => "CHEST",
            SlotType::Hands => "HANDS",
            SlotType::Feet => "FEET",
            SlotType::MainHand => "MAIN_HAND",
            SlotType::OffHand => "OFF_HAND",
            SlotType::Ring => "RING",
            SlotType::Neck => "NECK",
        }
    }

    pub fn parse(s: &str) -> Option<SlotType> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Joins the wire names of an enum's variants, for validation messages
pub fn expected_values(names: &[&str]) -> String {
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_round_trips() {
        for size in Size::ALL {
            assert_eq!(Size::parse(size.as_str()), Some(size));
        }
        assert_eq!(Size::parse("COLOSSAL"), None);
        assert_eq!(Size::parse("medium"), None);
    }

    #[test]
    fn test_hit_die_membership() {
        assert_eq!(HitDie::from_sides(8), Some(HitDie::D8));
        assert_eq!(HitDie::from_sides(20), None);
        assert_eq!(HitDie::D12.sides(), 12);
    }

    #[test]
    fn test_ranged_weapon_types() {
        assert!(WeaponType::Longbow.is_ranged());
        assert!(WeaponType::Sling.is_ranged());
        assert!(!WeaponType::Dagger.is_ranged());
        assert!(!WeaponType::Greatsword.is_ranged());
    }

    #[test]
    fn test_slot_type_wire_names() {
        assert_eq!(SlotType::parse("MAIN_HAND"), Some(SlotType::MainHand));
        assert_eq!(SlotType::MainHand.as_str(), "MAIN_HAND");
        assert_eq!(SlotType::parse("TAIL"), None);
    }
}
