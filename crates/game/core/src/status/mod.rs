//! Status effect system.
//!
//! Status effects are temporary conditions on an actor or the monster that
//! feed the damage/healing pipeline, restrict actions, or fire on the
//! end-of-round tick. Each kind statically declares its stacking policy and
//! how it contributes to calculations, so the store and the calculator never
//! branch on individual kinds.

mod store;
mod tick;

pub use store::{ChannelFold, StatusEffects};
pub use tick::tick;

use crate::state::ActorId;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Over-time effects (fire on the end-of-round tick)
    // ========================================================================
    /// HP loss per round; lethal ticks mark the victim for death resolution.
    Poisoned,

    /// HP recovery per round, capped at max. May expose a hidden-role healer.
    Regenerating,

    // ========================================================================
    // Crowd control
    // ========================================================================
    /// Cannot act. Expiry clears any stale submitted-action flags.
    Stunned,

    /// Cannot be chosen as a single target; attacks aimed here are redirected.
    Invisible,

    // ========================================================================
    // Combat modifiers
    // ========================================================================
    /// Crit chance doubled; outgoing healing amplified.
    Blessed,

    /// Incoming healing reduced.
    Cursed,

    /// Incoming damage increased by a percentage.
    Vulnerable,

    /// Incoming damage reduced by a percentage.
    Resistant,

    /// Outgoing damage scaled down.
    Weakened,

    /// Outgoing damage scaled up.
    Empowered,

    /// Flat armor bonus.
    Fortified,

    // ========================================================================
    // Special states
    // ========================================================================
    /// One-use: the first lethal blow leaves the bearer at 1 HP instead.
    Undying,
}

/// Stacking policy for re-applying an effect kind that is already active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stacking {
    /// Magnitudes sum, duration takes the max, stack count bounded.
    Stackable,
    /// Parameters are replaced, duration restarts at the new value.
    Refreshable,
    /// A second application is a no-op.
    Unique,
}

/// Which calculation an effect's contribution feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierChannel {
    OutgoingDamage,
    IncomingDamage,
    OutgoingHealing,
    IncomingHealing,
    Armor,
}

/// How an effect's value enters the fold for its channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Contribution {
    /// Flat amount added to the base (uses `magnitude`).
    Additive,
    /// Percentage added to the percent sum (uses `percent`, signed).
    Percentage,
    /// Factor multiplied into the product (uses `percent` as `1 ± percent`).
    Multiplicative,
}

impl StatusKind {
    /// Stacking policy for this kind.
    pub const fn stacking(self) -> Stacking {
        match self {
            Self::Poisoned | Self::Regenerating | Self::Fortified => Stacking::Stackable,
            Self::Stunned
            | Self::Invisible
            | Self::Blessed
            | Self::Cursed
            | Self::Vulnerable
            | Self::Resistant
            | Self::Weakened
            | Self::Empowered => Stacking::Refreshable,
            Self::Undying => Stacking::Unique,
        }
    }

    /// The calculation channel this kind contributes to, if any.
    ///
    /// Over-time and control effects act on the tick or on validation instead
    /// and return `None`. Blessed is special-cased inside the calculator
    /// (crit chance, heal multiplier) rather than folded.
    pub const fn contribution(self) -> Option<(ModifierChannel, Contribution)> {
        match self {
            Self::Vulnerable => Some((ModifierChannel::IncomingDamage, Contribution::Percentage)),
            Self::Resistant => Some((ModifierChannel::IncomingDamage, Contribution::Percentage)),
            Self::Cursed => Some((ModifierChannel::IncomingHealing, Contribution::Percentage)),
            Self::Weakened | Self::Empowered => {
                Some((ModifierChannel::OutgoingDamage, Contribution::Multiplicative))
            }
            Self::Fortified => Some((ModifierChannel::Armor, Contribution::Additive)),
            _ => None,
        }
    }

    /// True if the bearer cannot act while this effect is active.
    pub const fn prevents_action(self) -> bool {
        matches!(self, Self::Stunned)
    }

    /// Sign of the percentage contribution: buffs that reduce a hostile
    /// channel fold in negatively.
    const fn percent_sign(self) -> f64 {
        match self {
            Self::Resistant | Self::Cursed => -1.0,
            _ => 1.0,
        }
    }

    /// Multiplicative factor direction.
    const fn factor_sign(self) -> f64 {
        match self {
            Self::Weakened => -1.0,
            _ => 1.0,
        }
    }
}

/// Parameters supplied when applying a status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusParams {
    /// Flat amount: per-tick damage/healing, or armor bonus.
    pub magnitude: i32,
    /// Fractional amount: vulnerability/resistance/weakening percentages.
    pub percent: f64,
    /// Remaining rounds; `-1` means permanent.
    pub turns: i32,
}

impl StatusParams {
    pub const PERMANENT: i32 = -1;

    /// Flat per-tick or armor params.
    pub const fn flat(magnitude: i32, turns: i32) -> Self {
        Self {
            magnitude,
            percent: 0.0,
            turns,
        }
    }

    /// Percentage params.
    pub const fn fraction(percent: f64, turns: i32) -> Self {
        Self {
            magnitude: 0,
            percent,
            turns,
        }
    }

    /// Marker params for flag-like effects (stun, invisibility, undying).
    pub const fn marker(turns: i32) -> Self {
        Self {
            magnitude: 0,
            percent: 0.0,
            turns,
        }
    }
}

/// A single active status effect instance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    /// Store-local identifier, stable for the effect's lifetime.
    pub id: u32,
    pub kind: StatusKind,
    pub magnitude: i32,
    pub percent: f64,
    /// Remaining rounds; `-1` means permanent.
    pub turns: i32,
    /// Bounded stack count (stackable kinds only; others stay at 1).
    pub stacks: u8,
    /// Who applied the effect. Drives poison attribution and healer detection.
    pub source: ActorId,
}

impl StatusEffect {
    /// True once the effect has run out of rounds.
    pub fn expired(&self) -> bool {
        self.turns == 0
    }

    /// True for effects that never expire on their own.
    pub fn permanent(&self) -> bool {
        self.turns < 0
    }
}
