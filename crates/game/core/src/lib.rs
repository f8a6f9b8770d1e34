//! Deterministic round-resolution rules for the raid game.
//!
//! `raid-core` defines the canonical rules (actions, status effects, combat,
//! the round resolver) and exposes pure APIs reusable by hosts and offline
//! tools. All state mutation flows through [`engine::RoundResolver`] and the
//! ability handlers it dispatches; everything the engine consumes from the
//! outside world arrives through the oracle traits in [`env`].

pub mod ability;
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod monster;
pub mod state;
pub mod status;

pub use ability::{
    AbilityCategory, AbilityKind, AbilityParams, AbilitySpec, ClassKind, DispatchRegistry,
    EffectContext, Handler, HandlerError, PassiveGrant, RaceKind, RacialActionSpec,
    RacialRegistry, RacialSpec, TargetShape,
};
pub use action::{PendingAction, RacialAction, SubmitError, submit_action, submit_racial_action};
pub use combat::{
    AppliedModifier, CoordinationEntry, CoordinationMap, DamageInput, DamageOutcome, HealInput,
    HealOutcome, ModifierStep,
};
pub use config::GameConfig;
pub use engine::{LogKind, RoundLog, RoundLogEntry, RoundOutcome, RoundResolver, Winner};
pub use env::{
    AbilityOracle, BalanceParams, ClassBaseline, Env, OracleError, PcgRng, RngOracle, SystemsEnv,
    TablesOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorId, ActorState, DeathCause, GameState, MonsterState, PartyMemberSpec, RoundFlags,
    RoundState, SetupError, StateError, Target,
};
pub use status::{StatusEffect, StatusEffects, StatusKind, StatusParams};
