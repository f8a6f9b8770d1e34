//! Balance tables oracle.
//!
//! All numeric balance knobs the engine consumes live in [`BalanceParams`].
//! The defaults below are the shipped tuning; hosts may override them from
//! data files without touching engine code.

/// Oracle exposing the balance tables to the engine.
pub trait TablesOracle: Send + Sync {
    /// Returns the active balance parameters.
    fn balance(&self) -> &BalanceParams;
}

/// Coordination bonus tuning.
///
/// When `n >= 2` actors land the same classification of action on one target
/// in a round, each contributor's amount is scaled by
/// `1 + min(cap, base + (n - 1) * per_extra)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoordinationParams {
    pub base: f64,
    pub per_extra: f64,
    pub cap: f64,
}

impl Default for CoordinationParams {
    fn default() -> Self {
        Self {
            base: 0.10,
            per_extra: 0.05,
            cap: 0.50,
        }
    }
}

/// Comeback mechanic tuning.
///
/// While the non-saboteur team's aggregate health fraction is below
/// `threshold`, their outgoing damage is scaled by `1 + bonus`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComebackParams {
    pub threshold: f64,
    pub bonus: f64,
}

impl Default for ComebackParams {
    fn default() -> Self {
        Self {
            threshold: 0.35,
            bonus: 0.25,
        }
    }
}

/// Critical hit tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CritParams {
    /// Base crit chance before luck scaling.
    pub base_chance: f64,
    /// Added chance per point of luck.
    pub luck_scale: f64,
    /// Final-amount multiplier on a critical hit.
    pub multiplier: f64,
}

impl Default for CritParams {
    fn default() -> Self {
        Self {
            base_chance: 0.05,
            luck_scale: 0.01,
            multiplier: 2.0,
        }
    }
}

/// Healing pipeline tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealParams {
    /// Outgoing-healing multiplier while the healer is blessed.
    pub blessed_multiplier: f64,
}

impl Default for HealParams {
    fn default() -> Self {
        Self {
            blessed_multiplier: 1.25,
        }
    }
}

/// Monster stats, scaling, and behavior tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonsterParams {
    /// Starting maximum health of the level-1 encounter.
    pub base_hp: u32,
    /// Starting attack damage before scaling.
    pub base_damage: u32,
    /// Starting armor.
    pub base_armor: u32,
    /// Outgoing damage grows by this fraction per party level above 1.
    pub level_factor: f64,
    /// Outgoing damage grows by this fraction per player above the baseline.
    pub count_factor: f64,
    /// Party size the base damage is tuned for.
    pub count_baseline: u32,
    /// Max-hp and damage multiplier applied to the next encounter on respawn.
    pub growth: f64,
    /// Every this-many rounds of age, the monster sweeps the whole party
    /// instead of striking one target.
    pub sweep_interval: u32,
    /// Per-target damage fraction of the sweep attack.
    pub sweep_factor: f64,
    /// Outgoing-damage reduction the sweep leaves on everyone it hits.
    pub sweep_weaken_percent: f64,
    /// Rounds the weakening lasts.
    pub sweep_weaken_turns: i32,
}

impl Default for MonsterParams {
    fn default() -> Self {
        Self {
            base_hp: 120,
            base_damage: 14,
            base_armor: 2,
            level_factor: 0.25,
            count_factor: 0.15,
            count_baseline: 4,
            growth: 1.3,
            sweep_interval: 4,
            sweep_factor: 0.6,
            sweep_weaken_percent: 0.15,
            sweep_weaken_turns: 2,
        }
    }
}

/// Full balance table handed to the engine by the [`TablesOracle`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceParams {
    pub coordination: CoordinationParams,
    pub comeback: ComebackParams,
    pub crit: CritParams,
    pub heal: HealParams,
    pub monster: MonsterParams,
    /// Chance per regeneration tick that a hidden-role healer is revealed.
    pub detection_probability: f64,
    /// Fraction of a saboteur's damage that actually lands on the monster.
    pub corruption_factor: f64,
    /// Combo multiplier for precision attacks against a stunned target.
    pub stun_combo_multiplier: f64,
    /// Outgoing-damage bonus each surviving non-saboteur gains per level-up.
    pub level_damage_bonus: f64,
}

impl Default for BalanceParams {
    fn default() -> Self {
        Self {
            coordination: CoordinationParams::default(),
            comeback: ComebackParams::default(),
            crit: CritParams::default(),
            heal: HealParams::default(),
            monster: MonsterParams::default(),
            detection_probability: 0.25,
            corruption_factor: 0.5,
            stun_combo_multiplier: 1.5,
            level_damage_bonus: 0.10,
        }
    }
}
