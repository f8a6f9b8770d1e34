//! Class kits and baseline stats.

use raid_core::{AbilityKind, ClassBaseline, ClassKind};

/// Kit per class in unlock order.
pub(super) fn class_kit(class: ClassKind) -> Vec<AbilityKind> {
    use AbilityKind::*;
    match class {
        ClassKind::Warrior => vec![Strike, ShieldWall, Cleave, Bulwark, BattleCry],
        ClassKind::Mage => vec![FrostLance, Hex, Fireball, Curse],
        ClassKind::Cleric => vec![Mend, Blessing, Renewal, Purify],
        ClassKind::Rogue => vec![Backstab, PoisonBlade, Vanish],
    }
}

/// Starting stats per class.
pub(super) fn class_baseline(class: ClassKind) -> ClassBaseline {
    match class {
        ClassKind::Warrior => ClassBaseline {
            max_hp: 120,
            armor: 8,
            luck: 2,
        },
        ClassKind::Mage => ClassBaseline {
            max_hp: 80,
            armor: 2,
            luck: 4,
        },
        ClassKind::Cleric => ClassBaseline {
            max_hp: 95,
            armor: 4,
            luck: 3,
        },
        ClassKind::Rogue => ClassBaseline {
            max_hp: 90,
            armor: 3,
            luck: 8,
        },
    }
}
