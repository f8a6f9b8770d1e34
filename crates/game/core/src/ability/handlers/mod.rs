//! Ability handler implementations.
//!
//! Handlers are grouped by category. Each receives the [`EffectContext`] and
//! is the only code allowed to mutate health, apply status effects, or write
//! log entries for its action.
//!
//! [`EffectContext`]: super::EffectContext

pub mod attack;
pub mod defense;
pub mod heal;
pub mod racial;
pub mod special;
