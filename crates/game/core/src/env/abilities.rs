//! Ability catalog oracle.
//!
//! The engine never hard-codes what a class can do; it asks this oracle for
//! the spec behind an ability identifier, the kit a class unlocks over the
//! levels, and the racial gift each race carries.

use crate::ability::{AbilityKind, AbilitySpec, ClassKind, RaceKind, RacialSpec};

/// Baseline combat stats a class starts the game with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassBaseline {
    pub max_hp: u32,
    pub armor: u32,
    /// Feeds crit chance scaling.
    pub luck: u32,
}

/// Oracle exposing static ability/class/race content to the engine.
pub trait AbilityOracle: Send + Sync {
    /// Returns the spec for an ability identifier, if the catalog knows it.
    fn ability_spec(&self, kind: AbilityKind) -> Option<&AbilitySpec>;

    /// Returns a class's full kit in unlock order (including abilities the
    /// party has not reached yet).
    fn class_abilities(&self, class: ClassKind) -> &[AbilityKind];

    /// Returns the racial gift for a race.
    fn racial_spec(&self, race: RaceKind) -> Option<&RacialSpec>;

    /// Returns a class's starting stats.
    fn class_baseline(&self, class: ClassKind) -> ClassBaseline;
}
