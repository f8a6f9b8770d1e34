//! Combat calculations: the damage/healing pipeline and coordination
//! analysis. Everything here is pure; state mutation stays in handlers and
//! the resolver.

mod coordination;
mod damage;

pub use coordination::{CoordinationEntry, CoordinationMap, analyze};
pub use damage::{
    AppliedModifier, DamageInput, DamageOutcome, HealInput, HealOutcome, ModifierStep,
    calculate_damage, calculate_healing, describe_modifiers, monster_attack_damage,
};
