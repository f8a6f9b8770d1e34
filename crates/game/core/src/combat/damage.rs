//! Damage and healing calculation.
//!
//! The pipeline is pure: callers assemble the folds and flags, the functions
//! here produce a final amount plus the ordered list of modifiers that were
//! applied, so every number in the round log can be audited.

use crate::env::{CritParams, HealParams, MonsterParams, RngOracle};
use crate::status::ChannelFold;

// ============================================================================
// Modifier audit trail
// ============================================================================

/// One step of the pipeline that changed the running amount.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierStep {
    /// Attacker's innate damage multiplier (level-up growth).
    AttackerPower,
    /// Attacker-side status fold (Empowered, Weakened, flat bonuses).
    AttackerStatus,
    /// Multi-actor coordination bonus.
    Coordination,
    /// Explicit combo multiplier supplied by the handler.
    Combo,
    /// Comeback buff for the disadvantaged side.
    Comeback,
    /// Saboteur pulling the blow against the monster.
    Corruption,
    /// Armor reduction; `value` is the amount blocked.
    ArmorBlock,
    /// Target-side vulnerability/resistance percentages.
    TargetStatus,
    /// Healer-side status fold.
    HealerStatus,
    /// Blessed healer multiplier.
    BlessedHealer,
    /// Critical hit doubling.
    Critical,
}

/// A pipeline step together with the factor it applied (or, for
/// [`ModifierStep::ArmorBlock`], the amount it removed).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedModifier {
    pub step: ModifierStep,
    pub value: f64,
}

impl core::fmt::Display for AppliedModifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.step {
            ModifierStep::ArmorBlock => write!(f, "armor -{}", self.value as u32),
            step => write!(f, "{step} x{:.2}", self.value),
        }
    }
}

/// Renders a modifier list for a log message; empty when nothing applied.
pub fn describe_modifiers(modifiers: &[AppliedModifier]) -> String {
    if modifiers.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = modifiers.iter().map(|m| m.to_string()).collect();
    format!(" [{}]", parts.join(", "))
}

// ============================================================================
// Damage
// ============================================================================

/// Inputs to one damage calculation, pre-folded by the caller.
#[derive(Clone, Debug)]
pub struct DamageInput {
    /// Base amount before any modifier.
    pub base: u32,
    /// Attacker's innate multiplier; 1.0 for the monster.
    pub attacker_power: f64,
    /// Attacker-side outgoing-damage fold; `None` to ignore attacker status.
    pub attacker_fold: Option<ChannelFold>,
    /// Doubles the crit chance.
    pub attacker_blessed: bool,
    /// Scales the crit chance.
    pub attacker_luck: u32,
    /// Coordination bonus fraction, if the attack is part of a group.
    pub coordination: Option<f64>,
    /// Explicit combo multiplier from the handler, if any.
    pub combo: Option<f64>,
    /// Comeback bonus fraction, if active for the attacker's side.
    pub comeback: Option<f64>,
    /// Saboteur corruption factor, if the attacker is faking the fight.
    pub corruption: Option<f64>,
    /// Target's effective armor; `None` when the attack ignores armor.
    pub armor: Option<u32>,
    /// Target-side incoming-damage fold (vulnerability/resistance).
    pub target_fold: ChannelFold,
    /// Seed for the critical roll.
    pub crit_seed: u64,
}

/// Result of one damage calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageOutcome {
    pub amount: u32,
    pub critical: bool,
    /// Damage absorbed by armor.
    pub blocked: u32,
    /// Ordered audit trail of every modifier that changed the amount.
    pub modifiers: Vec<AppliedModifier>,
}

/// Runs the damage pipeline.
///
/// Order: base -> attacker power -> attacker status -> coordination -> combo
/// -> comeback -> corruption -> armor -> target status -> critical. The
/// armor step blocks `min(amount * 0.5, armor)` and never drops the running
/// amount below 1; the final amount is floored and clamped at zero.
pub fn calculate_damage(
    input: &DamageInput,
    crit: &CritParams,
    rng: &dyn RngOracle,
) -> DamageOutcome {
    let mut modifiers = Vec::new();
    let mut amount = input.base as f64;

    if input.attacker_power != 1.0 {
        amount *= input.attacker_power;
        modifiers.push(AppliedModifier {
            step: ModifierStep::AttackerPower,
            value: input.attacker_power,
        });
    }

    if let Some(fold) = &input.attacker_fold
        && !fold.is_identity()
    {
        let before = amount;
        amount = fold.apply(amount);
        let factor = if before > 0.0 { amount / before } else { 1.0 };
        modifiers.push(AppliedModifier {
            step: ModifierStep::AttackerStatus,
            value: factor,
        });
    }

    if let Some(bonus) = input.coordination {
        amount *= 1.0 + bonus;
        modifiers.push(AppliedModifier {
            step: ModifierStep::Coordination,
            value: 1.0 + bonus,
        });
    }

    if let Some(combo) = input.combo {
        amount *= combo;
        modifiers.push(AppliedModifier {
            step: ModifierStep::Combo,
            value: combo,
        });
    }

    if let Some(bonus) = input.comeback {
        amount *= 1.0 + bonus;
        modifiers.push(AppliedModifier {
            step: ModifierStep::Comeback,
            value: 1.0 + bonus,
        });
    }

    if let Some(factor) = input.corruption {
        amount *= factor;
        modifiers.push(AppliedModifier {
            step: ModifierStep::Corruption,
            value: factor,
        });
    }

    let mut blocked = 0u32;
    if let Some(armor) = input.armor
        && armor > 0
        && amount > 0.0
    {
        let block = (amount * 0.5).min(armor as f64).floor();
        if block > 0.0 {
            blocked = block as u32;
            amount = (amount - block).max(1.0);
            modifiers.push(AppliedModifier {
                step: ModifierStep::ArmorBlock,
                value: block,
            });
        }
    }

    if !input.target_fold.is_identity() {
        let before = amount;
        amount = input.target_fold.apply(amount);
        let factor = if before > 0.0 { amount / before } else { 1.0 };
        modifiers.push(AppliedModifier {
            step: ModifierStep::TargetStatus,
            value: factor,
        });
    }

    let mut chance = crit.base_chance + input.attacker_luck as f64 * crit.luck_scale;
    if input.attacker_blessed {
        chance *= 2.0;
    }
    let critical = rng.percent_check(input.crit_seed, chance.min(1.0));
    if critical {
        amount *= crit.multiplier;
        modifiers.push(AppliedModifier {
            step: ModifierStep::Critical,
            value: crit.multiplier,
        });
    }

    DamageOutcome {
        amount: amount.max(0.0).floor() as u32,
        critical,
        blocked,
        modifiers,
    }
}

// ============================================================================
// Healing
// ============================================================================

/// Inputs to one healing calculation.
#[derive(Clone, Debug)]
pub struct HealInput {
    pub base: u32,
    /// Healer-side outgoing-healing fold.
    pub healer_fold: ChannelFold,
    /// Amplifies outgoing healing.
    pub healer_blessed: bool,
    /// Coordination bonus fraction, if the heal is part of a group.
    pub coordination: Option<f64>,
    /// Target-side incoming-healing fold (Cursed).
    pub target_fold: ChannelFold,
}

/// Result of one healing calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct HealOutcome {
    pub amount: u32,
    pub modifiers: Vec<AppliedModifier>,
}

/// Runs the healing pipeline, mirroring the damage order: base -> healer
/// status -> coordination -> blessed healer -> target status.
pub fn calculate_healing(input: &HealInput, heal: &HealParams) -> HealOutcome {
    let mut modifiers = Vec::new();
    let mut amount = input.base as f64;

    if !input.healer_fold.is_identity() {
        let before = amount;
        amount = input.healer_fold.apply(amount);
        let factor = if before > 0.0 { amount / before } else { 1.0 };
        modifiers.push(AppliedModifier {
            step: ModifierStep::HealerStatus,
            value: factor,
        });
    }

    if let Some(bonus) = input.coordination {
        amount *= 1.0 + bonus;
        modifiers.push(AppliedModifier {
            step: ModifierStep::Coordination,
            value: 1.0 + bonus,
        });
    }

    if input.healer_blessed {
        amount *= heal.blessed_multiplier;
        modifiers.push(AppliedModifier {
            step: ModifierStep::BlessedHealer,
            value: heal.blessed_multiplier,
        });
    }

    if !input.target_fold.is_identity() {
        let before = amount;
        amount = input.target_fold.apply(amount);
        let factor = if before > 0.0 { amount / before } else { 1.0 };
        modifiers.push(AppliedModifier {
            step: ModifierStep::TargetStatus,
            value: factor,
        });
    }

    HealOutcome {
        amount: amount.max(0.0).floor() as u32,
        modifiers,
    }
}

// ============================================================================
// Monster scaling
// ============================================================================

/// Monster outgoing damage before the per-hit pipeline.
///
/// `base * (1 + (level - 1) * level_factor) *
///  (1 + (player_count - baseline) * count_factor)`, floored.
pub fn monster_attack_damage(
    base: u32,
    level: u32,
    player_count: u32,
    params: &MonsterParams,
) -> u32 {
    let level_scale = 1.0 + (level.saturating_sub(1)) as f64 * params.level_factor;
    let count_delta = player_count as f64 - params.count_baseline as f64;
    let count_scale = (1.0 + count_delta * params.count_factor).max(0.0);
    ((base as f64) * level_scale * count_scale).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    /// RNG that never rolls a success, keeping crit out of the assertions.
    struct NeverRng;
    impl RngOracle for NeverRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
        fn percent_check(&self, _seed: u64, _chance: f64) -> bool {
            false
        }
    }

    /// RNG that always succeeds a percent check.
    struct AlwaysRng;
    impl RngOracle for AlwaysRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
        fn percent_check(&self, _seed: u64, _chance: f64) -> bool {
            true
        }
    }

    fn plain_input(base: u32, armor: Option<u32>) -> DamageInput {
        DamageInput {
            base,
            attacker_power: 1.0,
            attacker_fold: None,
            attacker_blessed: false,
            attacker_luck: 0,
            coordination: None,
            combo: None,
            comeback: None,
            corruption: None,
            armor,
            target_fold: ChannelFold::IDENTITY,
            crit_seed: 0,
        }
    }

    #[test]
    fn armor_blocks_up_to_half() {
        let outcome = calculate_damage(&plain_input(30, Some(15)), &CritParams::default(), &NeverRng);
        assert_eq!(outcome.blocked, 15);
        assert_eq!(outcome.amount, 15);
    }

    #[test]
    fn armor_block_capped_at_half_the_damage() {
        let outcome = calculate_damage(&plain_input(10, Some(50)), &CritParams::default(), &NeverRng);
        assert_eq!(outcome.blocked, 5);
        assert_eq!(outcome.amount, 5);
    }

    #[test]
    fn armored_hit_never_drops_below_one() {
        let outcome = calculate_damage(&plain_input(1, Some(40)), &CritParams::default(), &NeverRng);
        assert!(outcome.amount >= 1);
    }

    #[test]
    fn ignore_armor_skips_the_block_step() {
        let outcome = calculate_damage(&plain_input(30, None), &CritParams::default(), &NeverRng);
        assert_eq!(outcome.blocked, 0);
        assert_eq!(outcome.amount, 30);
        assert!(outcome.modifiers.is_empty());
    }

    #[test]
    fn critical_doubles_and_is_recorded() {
        let outcome = calculate_damage(&plain_input(20, None), &CritParams::default(), &AlwaysRng);
        assert!(outcome.critical);
        assert_eq!(outcome.amount, 40);
        assert_eq!(
            outcome.modifiers.last().map(|m| m.step),
            Some(ModifierStep::Critical)
        );
    }

    #[test]
    fn modifier_order_matches_pipeline_order() {
        let mut input = plain_input(40, Some(10));
        input.coordination = Some(0.15);
        input.comeback = Some(0.25);
        let outcome = calculate_damage(&input, &CritParams::default(), &NeverRng);
        let steps: Vec<ModifierStep> = outcome.modifiers.iter().map(|m| m.step).collect();
        assert_eq!(
            steps,
            vec![
                ModifierStep::Coordination,
                ModifierStep::Comeback,
                ModifierStep::ArmorBlock,
            ]
        );
    }

    #[test]
    fn corruption_halves_saboteur_damage() {
        let mut input = plain_input(40, None);
        input.corruption = Some(0.5);
        let outcome = calculate_damage(&input, &CritParams::default(), &NeverRng);
        assert_eq!(outcome.amount, 20);
    }

    #[test]
    fn healing_applies_blessed_and_cursed() {
        let mut cursed_fold = ChannelFold::IDENTITY;
        cursed_fold.percent = -0.5;

        let outcome = calculate_healing(
            &HealInput {
                base: 20,
                healer_fold: ChannelFold::IDENTITY,
                healer_blessed: true,
                coordination: None,
                target_fold: cursed_fold,
            },
            &HealParams::default(),
        );
        // 20 * 1.25 blessed = 25, halved by the curse.
        assert_eq!(outcome.amount, 12);
        assert_eq!(outcome.modifiers.len(), 2);
    }

    #[test]
    fn monster_damage_scales_with_level_and_count() {
        let params = MonsterParams::default();
        // Level 1, baseline party: unscaled.
        assert_eq!(monster_attack_damage(14, 1, 4, &params), 14);
        // Level 3: 14 * 1.5 = 21.
        assert_eq!(monster_attack_damage(14, 3, 4, &params), 21);
        // Level 3, 6 players: 14 * 1.5 * 1.3 = 27.3 -> 27.
        assert_eq!(monster_attack_damage(14, 3, 6, &params), 27);
    }

    #[test]
    fn crit_roll_is_deterministic_for_a_seed() {
        let input = {
            let mut i = plain_input(20, None);
            i.attacker_luck = 10;
            i.crit_seed = 1234;
            i
        };
        let crit = CritParams::default();
        let a = calculate_damage(&input, &crit, &PcgRng);
        let b = calculate_damage(&input, &crit, &PcgRng);
        assert_eq!(a, b);
    }
}
