//! Ability dispatch registries and the handler execution context.
//!
//! The registries are the sole execution point for ability effects: the
//! resolver looks up a handler and calls it with an [`EffectContext`].
//! Handlers are the only code that mutates health, applies status effects,
//! or appends log entries. An identifier with no handler is rejected at
//! submission time, so dispatch never meets an unknown ability.

use std::collections::HashMap;

use super::{AbilityKind, AbilityParams, RaceKind, handlers};
use crate::combat::CoordinationEntry;
use crate::engine::RoundLog;
use crate::env::{BalanceParams, RngOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, GameState, Target};

/// Errors surfaced by ability handlers.
///
/// Caught per action by the resolver: a failing handler becomes a logged
/// failed action, never an aborted round.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("target not found")]
    TargetNotFound,

    #[error("target is no longer alive")]
    TargetNotAlive,

    #[error("target shape not supported by this handler")]
    UnsupportedTarget,

    #[error("effect could not be applied: {0}")]
    EffectRejected(&'static str),
}

impl GameError for HandlerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TargetNotFound | Self::TargetNotAlive => ErrorSeverity::Recoverable,
            Self::UnsupportedTarget => ErrorSeverity::Internal,
            Self::EffectRejected(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TargetNotFound => "HANDLER_TARGET_NOT_FOUND",
            Self::TargetNotAlive => "HANDLER_TARGET_NOT_ALIVE",
            Self::UnsupportedTarget => "HANDLER_UNSUPPORTED_TARGET",
            Self::EffectRejected(_) => "HANDLER_EFFECT_REJECTED",
        }
    }
}

/// Execution context handed to every handler invocation.
///
/// Bundles the acting entity, the resolved target, the parameter snapshot
/// taken at submission, the coordination entry for the target (if any), and
/// mutable access to state and log. This is the only channel through which
/// handlers touch the room.
pub struct EffectContext<'a> {
    pub actor: ActorId,
    pub target: Target,
    /// Display name of the ability or racial gift, for log messages.
    pub name: &'a str,
    /// Parameter snapshot taken when the action was queued.
    pub params: AbilityParams,
    pub coordination: Option<&'a CoordinationEntry>,
    pub state: &'a mut GameState,
    pub balance: &'a BalanceParams,
    pub rng: &'a dyn RngOracle,
    pub log: &'a mut RoundLog,
}

impl EffectContext<'_> {
    /// Display name of the acting player.
    pub fn actor_name(&self) -> String {
        self.state
            .actor(self.actor)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| self.actor.to_string())
    }

    /// Living party members, used to expand [`Target::AllAllies`].
    ///
    /// Hidden roles stay hidden: saboteurs receive party-wide effects like
    /// everyone else.
    pub fn all_allies(&self) -> Vec<ActorId> {
        self.state.alive_actors().map(|a| a.id).collect()
    }

    /// Coordination damage bonus for this action's target, if the analyzer
    /// found a multi-actor group.
    pub fn coordination_damage_bonus(&self) -> Option<f64> {
        self.coordination
            .filter(|entry| entry.damage_bonus > 0.0)
            .filter(|entry| entry.damage_contributors.contains(&self.actor))
            .map(|entry| entry.damage_bonus)
    }

    /// Coordination healing bonus for this action's target, if any.
    pub fn coordination_healing_bonus(&self) -> Option<f64> {
        self.coordination
            .filter(|entry| entry.healing_bonus > 0.0)
            .filter(|entry| entry.healing_contributors.contains(&self.actor))
            .map(|entry| entry.healing_bonus)
    }

    /// Status store of the resolved target, player or monster.
    pub fn target_effects_mut(&mut self) -> Option<&mut crate::status::StatusEffects> {
        match self.target {
            Target::Player(id) => self.state.actor_mut(id).map(|a| &mut a.effects),
            Target::Monster => Some(&mut self.state.monster.effects),
            Target::AllAllies => None,
        }
    }

    /// Display name of the resolved target.
    pub fn target_name(&self) -> String {
        match self.target {
            Target::Player(id) => self
                .state
                .actor(id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| id.to_string()),
            Target::Monster => "the monster".to_string(),
            Target::AllAllies => "the party".to_string(),
        }
    }
}

/// Handler function executed for a dispatched action.
pub type Handler = fn(&mut EffectContext<'_>) -> Result<(), HandlerError>;

/// Class ability dispatch table.
pub struct DispatchRegistry {
    table: HashMap<AbilityKind, Handler>,
}

impl DispatchRegistry {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// The shipped handler set covering every active ability in the catalog.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(AbilityKind::Strike, handlers::attack::strike);
        registry.register(AbilityKind::Cleave, handlers::attack::cleave);
        registry.register(AbilityKind::FrostLance, handlers::attack::frost_lance);
        registry.register(AbilityKind::Fireball, handlers::attack::fireball);
        registry.register(AbilityKind::Backstab, handlers::attack::backstab);
        registry.register(AbilityKind::Mend, handlers::heal::mend);
        registry.register(AbilityKind::Renewal, handlers::heal::renewal);
        registry.register(AbilityKind::ShieldWall, handlers::defense::shield_wall);
        registry.register(AbilityKind::Vanish, handlers::defense::vanish);
        registry.register(AbilityKind::BattleCry, handlers::special::battle_cry);
        registry.register(AbilityKind::Hex, handlers::special::hex);
        registry.register(AbilityKind::Curse, handlers::special::curse);
        registry.register(AbilityKind::Blessing, handlers::special::blessing);
        registry.register(AbilityKind::PoisonBlade, handlers::special::poison_blade);
        registry.register(AbilityKind::Purify, handlers::special::purify);
        registry
    }

    pub fn register(&mut self, kind: AbilityKind, handler: Handler) {
        self.table.insert(kind, handler);
    }

    pub fn handler(&self, kind: AbilityKind) -> Option<Handler> {
        self.table.get(&kind).copied()
    }

    pub fn contains(&self, kind: AbilityKind) -> bool {
        self.table.contains_key(&kind)
    }
}

impl Default for DispatchRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Racial action dispatch table, analogous to [`DispatchRegistry`] but keyed
/// by race.
pub struct RacialRegistry {
    table: HashMap<RaceKind, Handler>,
}

impl RacialRegistry {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Handlers for every race with a submittable racial action. Races whose
    /// gift is purely passive (Revenant) have no entry.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(RaceKind::Human, handlers::racial::rally);
        registry.register(RaceKind::Dwarf, handlers::racial::stoneskin);
        registry.register(RaceKind::Elf, handlers::racial::insight);
        registry.register(RaceKind::Orc, handlers::racial::bloodrage);
        registry
    }

    pub fn register(&mut self, race: RaceKind, handler: Handler) {
        self.table.insert(race, handler);
    }

    pub fn handler(&self, race: RaceKind) -> Option<Handler> {
        self.table.get(&race).copied()
    }

    pub fn contains(&self, race: RaceKind) -> bool {
        self.table.contains_key(&race)
    }
}

impl Default for RacialRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
