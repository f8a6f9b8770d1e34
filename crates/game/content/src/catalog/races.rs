//! Racial gifts.

use raid_core::status::{StatusKind, StatusParams};
use raid_core::{AbilityParams, PassiveGrant, RaceKind, RacialActionSpec, RacialSpec, TargetShape};

/// Every racial gift the shipped catalog knows.
///
/// All actions are one use per game; the Revenant's gift is purely passive
/// and can never be submitted.
pub(super) fn racial_specs() -> Vec<RacialSpec> {
    vec![
        RacialSpec {
            race: RaceKind::Human,
            name: "Rally",
            passive: None,
            action: Some(RacialActionSpec {
                shape: TargetShape::AllAllies,
                params: AbilityParams::status(8, 0.0, 0),
                uses: 1,
            }),
        },
        RacialSpec {
            race: RaceKind::Dwarf,
            name: "Stoneskin",
            passive: None,
            action: Some(RacialActionSpec {
                shape: TargetShape::SelfOnly,
                params: AbilityParams::status(0, 0.30, 3),
                uses: 1,
            }),
        },
        RacialSpec {
            race: RaceKind::Elf,
            name: "Insight",
            passive: None,
            action: Some(RacialActionSpec {
                shape: TargetShape::Single,
                params: AbilityParams::status(0, 0.6, 0),
                uses: 1,
            }),
        },
        RacialSpec {
            race: RaceKind::Orc,
            name: "Bloodrage",
            passive: None,
            action: Some(RacialActionSpec {
                shape: TargetShape::SelfOnly,
                params: AbilityParams::status(5, 0.25, 2),
                uses: 1,
            }),
        },
        RacialSpec {
            race: RaceKind::Revenant,
            name: "Undying",
            passive: Some(PassiveGrant {
                effect: StatusKind::Undying,
                params: StatusParams::marker(StatusParams::PERMANENT),
            }),
            action: None,
        },
    ]
}
