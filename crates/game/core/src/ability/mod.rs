//! Ability definitions and dispatch.
//!
//! Every ability is described by data (category, target shape, numeric
//! parameters, priority, cooldown) and executed by a registered handler.
//! Target shape and category are declared on the spec, never inferred from
//! naming conventions, so validation and coordination analysis can work
//! without knowing individual abilities.

mod registry;

pub mod handlers;

pub use registry::{DispatchRegistry, EffectContext, Handler, HandlerError, RacialRegistry};

use crate::status::{StatusKind, StatusParams};

/// Player classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Warrior,
    Mage,
    Cleric,
    Rogue,
}

/// Player races. Each carries one racial gift: an action, a passive, or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceKind {
    Human,
    Dwarf,
    Elf,
    Orc,
    Revenant,
}

/// Class ability identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    // Warrior
    Strike,
    ShieldWall,
    Cleave,
    Bulwark,
    BattleCry,
    // Mage
    FrostLance,
    Hex,
    Fireball,
    Curse,
    // Cleric
    Mend,
    Blessing,
    Renewal,
    Purify,
    // Rogue
    Backstab,
    PoisonBlade,
    Vanish,
}

/// Coarse classification used by validation and the coordination analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCategory {
    Attack,
    Heal,
    Defense,
    Special,
}

/// Legal target shapes, declared as data on each spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetShape {
    /// One player or the monster.
    Single,
    /// The acting player only.
    SelfOnly,
    /// Every living party member.
    AllAllies,
    /// The monster only.
    Monster,
    /// Centered on the monster; used by sweep-style attacks.
    Area,
}

/// Numeric knobs shared by class and racial abilities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityParams {
    /// Damage or healing amount; status magnitude for buff/debuff abilities.
    pub power: u32,
    /// Fractional knob: status percentages, proc chances.
    pub percent: f64,
    /// Rounds an applied status lasts.
    pub duration: i32,
    /// Attack bypasses the armor reduction step.
    pub ignore_armor: bool,
}

impl AbilityParams {
    pub const fn damage(power: u32) -> Self {
        Self {
            power,
            percent: 0.0,
            duration: 0,
            ignore_armor: false,
        }
    }

    pub const fn status(power: u32, percent: f64, duration: i32) -> Self {
        Self {
            power,
            percent,
            duration,
            ignore_armor: false,
        }
    }
}

/// Status effect granted automatically (class passives on unlock, racial
/// passives at setup) rather than submitted as an action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveGrant {
    pub effect: StatusKind,
    pub params: StatusParams,
}

/// Full description of a class ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub kind: AbilityKind,
    pub category: AbilityCategory,
    pub shape: TargetShape,
    pub params: AbilityParams,
    /// Higher resolves earlier within a round.
    pub priority: i8,
    /// Rounds the ability is unavailable after use.
    pub cooldown: u8,
    /// Party level at which the ability joins the kit.
    pub unlock_level: u32,
    /// Present for passives: applied on unlock instead of occupying a slot.
    pub passive: Option<PassiveGrant>,
}

/// The once-per-round racial action attached to a race, if it has one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RacialActionSpec {
    pub shape: TargetShape,
    pub params: AbilityParams,
    /// Activations allowed over the whole game.
    pub uses: u8,
}

/// Racial gift description. Static catalog data, never serialized into
/// state.
#[derive(Clone, Debug, PartialEq)]
pub struct RacialSpec {
    pub race: RaceKind,
    /// Display name of the gift (e.g. "Stoneskin").
    pub name: &'static str,
    /// Applied once at room setup.
    pub passive: Option<PassiveGrant>,
    /// Submittable racial action, if any.
    pub action: Option<RacialActionSpec>,
}
