//! Player actor state.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::{ActorId, DeathCause, PartyMemberSpec};
use crate::ability::{AbilityKind, AbilitySpec, ClassKind, RaceKind};
use crate::config::GameConfig;
use crate::env::ClassBaseline;
use crate::status::StatusEffects;

bitflags! {
    /// Per-round submission bookkeeping, cleared at round cleanup.
    ///
    /// Stun expiry also clears these so a stale submission from the stunned
    /// round cannot leak into the next window.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RoundFlags: u8 {
        const SUBMITTED_ACTION = 1 << 0;
        const SUBMITTED_RACIAL = 1 << 1;
    }
}

/// An unlocked class ability with its independent cooldown counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub kind: AbilityKind,
    /// Rounds until usable again; `0` means ready.
    pub cooldown_remaining: u8,
}

impl AbilitySlot {
    pub fn ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}

/// Complete state of one party member.
///
/// # Invariants
///
/// - `0 <= hp <= max_hp`
/// - `alive ⇔ hp > 0`, except between a lethal hit and death resolution,
///   where `pending_death` is set while `hp == 0` and `alive` is still true.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub class: ClassKind,
    pub race: RaceKind,

    pub hp: u32,
    pub max_hp: u32,
    /// Base armor before Fortified-style bonuses.
    pub armor: u32,
    /// Feeds crit chance scaling.
    pub luck: u32,
    /// Outgoing damage scale; grows with level-ups.
    pub damage_multiplier: f64,

    pub alive: bool,
    /// Set when a hit or tick drops hp to zero; resolved in the death phase
    /// where resurrection effects may intervene.
    pub pending_death: Option<DeathCause>,

    /// Hidden role. `revealed` governs whether other players may know it.
    pub saboteur: bool,
    pub revealed: bool,

    pub effects: StatusEffects,
    pub abilities: ArrayVec<AbilitySlot, { GameConfig::MAX_ABILITY_SLOTS }>,
    /// Racial action activations spent so far.
    pub racial_uses: u8,

    pub flags: RoundFlags,
}

impl ActorState {
    pub fn new(member: &PartyMemberSpec, baseline: ClassBaseline) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            class: member.class,
            race: member.race,
            hp: baseline.max_hp,
            max_hp: baseline.max_hp,
            armor: baseline.armor,
            luck: baseline.luck,
            damage_multiplier: 1.0,
            alive: true,
            pending_death: None,
            saboteur: member.saboteur,
            revealed: false,
            effects: StatusEffects::empty(),
            abilities: ArrayVec::new(),
            racial_uses: 0,
            flags: RoundFlags::empty(),
        }
    }

    /// Quick liveness check.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// True if the actor may act this round: alive and not action-locked by
    /// a status effect.
    pub fn can_act(&self) -> bool {
        self.alive && !self.effects.prevents_action()
    }

    // ========================================================================
    // Ability slots
    // ========================================================================

    /// Adds an ability to the unlocked set. Passive specs never occupy a
    /// slot; their grant is applied by the caller instead.
    pub fn learn(&mut self, spec: &AbilitySpec) {
        if spec.passive.is_some() || self.has_unlocked(spec.kind) || self.abilities.is_full() {
            return;
        }
        self.abilities.push(AbilitySlot {
            kind: spec.kind,
            cooldown_remaining: 0,
        });
    }

    pub fn has_unlocked(&self, kind: AbilityKind) -> bool {
        self.abilities.iter().any(|slot| slot.kind == kind)
    }

    pub fn slot(&self, kind: AbilityKind) -> Option<&AbilitySlot> {
        self.abilities.iter().find(|slot| slot.kind == kind)
    }

    /// Starts an ability's cooldown after a successful dispatch.
    ///
    /// The extra round compensates for the decrement that runs in the same
    /// round's cleanup, so `rounds` counts full future submission windows.
    pub fn start_cooldown(&mut self, kind: AbilityKind, rounds: u8) {
        if rounds == 0 {
            return;
        }
        if let Some(slot) = self.abilities.iter_mut().find(|slot| slot.kind == kind) {
            slot.cooldown_remaining = rounds + 1;
        }
    }

    /// Round-cleanup cooldown decrement.
    pub fn tick_cooldowns(&mut self) {
        for slot in &mut self.abilities {
            slot.cooldown_remaining = slot.cooldown_remaining.saturating_sub(1);
        }
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Applies damage, clamping at zero. A lethal hit marks the actor for
    /// death resolution instead of flipping `alive` immediately.
    ///
    /// Returns the damage actually applied.
    pub fn apply_damage(&mut self, amount: u32, cause: DeathCause) -> u32 {
        if !self.alive {
            return 0;
        }
        let applied = amount.min(self.hp);
        self.hp -= applied;
        if self.hp == 0 && self.pending_death.is_none() {
            self.pending_death = Some(cause);
        }
        applied
    }

    /// Heals up to max hp. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let applied = amount.min(self.max_hp - self.hp);
        self.hp += applied;
        // A heal that outruns pending poison death cancels the pending state.
        if self.hp > 0 {
            self.pending_death = None;
        }
        applied
    }

    /// Final death: run by death resolution after resurrection effects had
    /// their chance.
    pub fn die(&mut self) {
        self.alive = false;
        self.hp = 0;
        self.pending_death = None;
        self.effects.clear();
        self.flags = RoundFlags::empty();
        self.revealed = true;
    }
}
