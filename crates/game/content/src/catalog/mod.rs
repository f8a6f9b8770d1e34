//! The shipped ability catalog.
//!
//! [`Catalog`] implements `raid-core`'s [`AbilityOracle`] over the static
//! tables in this module: per-ability specs, class kits, racial gifts, and
//! class baselines.

mod abilities;
mod classes;
mod races;

use std::collections::HashMap;

use raid_core::{
    AbilityKind, AbilityOracle, AbilitySpec, ClassBaseline, ClassKind, RaceKind, RacialSpec,
};
use strum::IntoEnumIterator;

/// Static catalog backing the ability oracle.
pub struct Catalog {
    specs: HashMap<AbilityKind, AbilitySpec>,
    kits: HashMap<ClassKind, Vec<AbilityKind>>,
    racials: HashMap<RaceKind, RacialSpec>,
}

impl Catalog {
    /// Builds the shipped catalog.
    pub fn standard() -> Self {
        let specs = abilities::ability_specs()
            .into_iter()
            .map(|spec| (spec.kind, spec))
            .collect();
        let kits = ClassKind::iter()
            .map(|class| (class, classes::class_kit(class)))
            .collect();
        let racials = races::racial_specs()
            .into_iter()
            .map(|spec| (spec.race, spec))
            .collect();
        Self {
            specs,
            kits,
            racials,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl AbilityOracle for Catalog {
    fn ability_spec(&self, kind: AbilityKind) -> Option<&AbilitySpec> {
        self.specs.get(&kind)
    }

    fn class_abilities(&self, class: ClassKind) -> &[AbilityKind] {
        self.kits.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    fn racial_spec(&self, race: RaceKind) -> Option<&RacialSpec> {
        self.racials.get(&race)
    }

    fn class_baseline(&self, class: ClassKind) -> ClassBaseline {
        classes::class_baseline(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kit_ability_has_a_spec() {
        let catalog = Catalog::standard();
        for class in ClassKind::iter() {
            for &kind in catalog.class_abilities(class) {
                assert!(
                    catalog.ability_spec(kind).is_some(),
                    "missing spec for {kind}"
                );
            }
        }
    }

    #[test]
    fn every_race_has_a_gift() {
        let catalog = Catalog::standard();
        for race in RaceKind::iter() {
            let spec = catalog.racial_spec(race).expect("racial spec");
            assert!(spec.passive.is_some() || spec.action.is_some());
        }
    }

    #[test]
    fn level_one_kits_are_nonempty() {
        let catalog = Catalog::standard();
        for class in ClassKind::iter() {
            let starters = catalog
                .class_abilities(class)
                .iter()
                .filter_map(|&k| catalog.ability_spec(k))
                .filter(|s| s.unlock_level <= 1 && s.passive.is_none())
                .count();
            assert!(starters >= 2, "{class} starts with too few abilities");
        }
    }
}
