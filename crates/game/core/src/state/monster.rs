//! Monster state.

use crate::env::MonsterParams;
use crate::status::StatusEffects;

/// The encounter monster. One per room; respawns stronger after each defeat
/// until the party hits the level cap.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub hp: u32,
    pub max_hp: u32,
    /// Attack damage before level/party-size scaling.
    pub base_damage: u32,
    pub armor: u32,
    /// Rounds survived this encounter; drives the behavior tier.
    pub age: u32,
    pub effects: StatusEffects,
}

impl MonsterState {
    /// First encounter, sized for the party.
    pub fn spawn(params: &MonsterParams, player_count: u32) -> Self {
        let count_delta = player_count as f64 - params.count_baseline as f64;
        let hp_scale = (1.0 + count_delta * params.count_factor).max(0.5);
        let max_hp = ((params.base_hp as f64) * hp_scale).floor().max(1.0) as u32;
        Self {
            hp: max_hp,
            max_hp,
            base_damage: params.base_damage,
            armor: params.base_armor,
            age: 0,
            effects: StatusEffects::empty(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies damage, clamping at zero. Returns the amount applied.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        applied
    }

    /// Heals up to max hp. Returns the amount actually restored.
    ///
    /// Reachable only through saboteur play; loyal kits never aim healing at
    /// the monster, but nothing in the rules forbids it.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let applied = amount.min(self.max_hp - self.hp);
        self.hp += applied;
        applied
    }

    /// Scales the next encounter after a defeat and brings it back at full
    /// health with a clean slate.
    pub fn respawn_scaled(&mut self, growth: f64) {
        self.max_hp = ((self.max_hp as f64) * growth).floor().max(1.0) as u32;
        self.base_damage = ((self.base_damage as f64) * growth).floor().max(1.0) as u32;
        self.hp = self.max_hp;
        self.age = 0;
        self.effects.clear();
    }
}
