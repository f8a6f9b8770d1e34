//! Coordination bonus analysis.
//!
//! Runs once per round, strictly before any action executes: the
//! contributing set is fixed by what was queued, not by what survives
//! resolution. Dispatch reads the result, never writes it.

use std::collections::HashMap;

use crate::ability::AbilityCategory;
use crate::action::PendingAction;
use crate::env::CoordinationParams;
use crate::state::{ActorId, Target};

/// Contributors and derived bonuses for one target.
///
/// Damage and healing are analyzed separately: a mixed group on one target
/// gets each bonus computed from its own contributor set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinationEntry {
    pub damage_contributors: Vec<ActorId>,
    pub healing_contributors: Vec<ActorId>,
    /// Bonus fraction for damage contributors; 0.0 below two contributors.
    pub damage_bonus: f64,
    /// Bonus fraction for healing contributors; 0.0 below two contributors.
    pub healing_bonus: f64,
}

/// Read-only per-target coordination data for one round.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinationMap {
    entries: HashMap<Target, CoordinationEntry>,
}

impl CoordinationMap {
    pub fn get(&self, target: &Target) -> Option<&CoordinationEntry> {
        self.entries.get(target)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bonus for `n` same-classification contributors.
fn bonus(n: usize, params: &CoordinationParams) -> f64 {
    if n < 2 {
        return 0.0;
    }
    (params.base + (n - 1) as f64 * params.per_extra).min(params.cap)
}

/// Groups the round's pending actions by resolved target and derives the
/// per-target bonuses.
///
/// Classification comes from the ability category declared on the spec:
/// `Attack` contributes to the damage group, `Heal` to the healing group,
/// everything else to neither.
pub fn analyze(pending: &[PendingAction], params: &CoordinationParams) -> CoordinationMap {
    let mut entries: HashMap<Target, CoordinationEntry> = HashMap::new();

    for action in pending {
        let entry = entries.entry(action.target).or_default();
        match action.spec.category {
            AbilityCategory::Attack => entry.damage_contributors.push(action.actor),
            AbilityCategory::Heal => entry.healing_contributors.push(action.actor),
            AbilityCategory::Defense | AbilityCategory::Special => {}
        }
    }

    for entry in entries.values_mut() {
        entry.damage_bonus = bonus(entry.damage_contributors.len(), params);
        entry.healing_bonus = bonus(entry.healing_contributors.len(), params);
    }

    CoordinationMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityKind, AbilityParams, AbilitySpec, TargetShape};

    fn action(actor: u32, category: AbilityCategory, target: Target, index: u32) -> PendingAction {
        PendingAction {
            actor: ActorId(actor),
            kind: AbilityKind::Strike,
            target,
            spec: AbilitySpec {
                kind: AbilityKind::Strike,
                category,
                shape: TargetShape::Single,
                params: AbilityParams::damage(10),
                priority: 0,
                cooldown: 0,
                unlock_level: 1,
                passive: None,
            },
            priority: 0,
            submission_index: index,
        }
    }

    #[test]
    fn bonus_scales_with_contributors_up_to_cap() {
        let params = CoordinationParams::default();
        assert_eq!(bonus(1, &params), 0.0);
        assert_eq!(bonus(2, &params), 0.15);
        assert_eq!(bonus(3, &params), 0.20);
        assert_eq!(bonus(5, &params), 0.30);
        // Far past the cap.
        assert_eq!(bonus(20, &params), 0.50);
    }

    #[test]
    fn groups_by_target_and_classification() {
        let params = CoordinationParams::default();
        let pending = vec![
            action(1, AbilityCategory::Attack, Target::Monster, 0),
            action(2, AbilityCategory::Attack, Target::Monster, 1),
            action(3, AbilityCategory::Heal, Target::Player(ActorId(1)), 2),
            action(4, AbilityCategory::Special, Target::Monster, 3),
        ];
        let map = analyze(&pending, &params);

        let monster = map.get(&Target::Monster).unwrap();
        assert_eq!(monster.damage_contributors.len(), 2);
        assert_eq!(monster.damage_bonus, 0.15);
        // The Special action neither contributes nor earns a bonus.
        assert!(monster.healing_contributors.is_empty());

        let heal = map.get(&Target::Player(ActorId(1))).unwrap();
        assert_eq!(heal.healing_contributors.len(), 1);
        assert_eq!(heal.healing_bonus, 0.0);
    }

    #[test]
    fn lone_contributor_gets_no_bonus() {
        let params = CoordinationParams::default();
        let pending = vec![action(1, AbilityCategory::Attack, Target::Monster, 0)];
        let map = analyze(&pending, &params);
        assert_eq!(map.get(&Target::Monster).unwrap().damage_bonus, 0.0);
    }
}
