//! Submission validation errors.
//!
//! Every variant is reported synchronously to the submitter; nothing here is
//! queued or retried.

use crate::ability::AbilityKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::ActorId;

/// Reasons a class or racial submission is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmitError {
    /// The round is resolving or the game has ended.
    #[error("round is not accepting submissions")]
    RoundClosed,

    #[error("unknown actor {0}")]
    UnknownActor(ActorId),

    #[error("{0} is dead")]
    ActorDead(ActorId),

    /// Stunned or otherwise action-locked.
    #[error("{0} cannot act this round")]
    Incapacitated(ActorId),

    #[error("{0} already submitted an action this round")]
    AlreadySubmitted(ActorId),

    #[error("ability {0} is not in the catalog")]
    UnknownAbility(AbilityKind),

    #[error("ability {0} is not unlocked")]
    NotUnlocked(AbilityKind),

    #[error("ability {0} is on cooldown")]
    OnCooldown(AbilityKind),

    /// Catalog and dispatch registry disagree; a wiring bug.
    #[error("no handler registered for {0}")]
    NoHandler(AbilityKind),

    #[error("target player {0} does not exist")]
    UnknownTarget(ActorId),

    #[error("target is dead")]
    TargetDead,

    #[error("the monster is already dead")]
    MonsterDead,

    #[error("target does not match the ability's target shape")]
    ShapeMismatch,

    /// Single-target submission against an invisible player with no visible
    /// candidate to redirect to.
    #[error("no visible target to redirect to")]
    NoVisibleTarget,

    /// The actor's race has no submittable action (purely passive gift).
    #[error("race has no active racial ability")]
    RacialPassiveOnly,

    /// Racial actions may not target the monster.
    #[error("racial abilities cannot target the monster")]
    RacialTargetNotAllowed,

    #[error("racial ability has no uses left")]
    RacialExhausted,

    #[error(transparent)]
    Oracle(#[from] crate::env::OracleError),
}

impl GameError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        use SubmitError::*;
        match self {
            RoundClosed | OnCooldown(_) | NoVisibleTarget | RacialExhausted => {
                ErrorSeverity::Recoverable
            }
            UnknownActor(_) | ActorDead(_) | Incapacitated(_) | AlreadySubmitted(_)
            | UnknownAbility(_) | NotUnlocked(_) | UnknownTarget(_) | TargetDead | MonsterDead
            | ShapeMismatch | RacialPassiveOnly | RacialTargetNotAllowed => {
                ErrorSeverity::Validation
            }
            NoHandler(_) => ErrorSeverity::Internal,
            Oracle(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use SubmitError::*;
        match self {
            RoundClosed => "SUBMIT_ROUND_CLOSED",
            UnknownActor(_) => "SUBMIT_UNKNOWN_ACTOR",
            ActorDead(_) => "SUBMIT_ACTOR_DEAD",
            Incapacitated(_) => "SUBMIT_INCAPACITATED",
            AlreadySubmitted(_) => "SUBMIT_ALREADY_SUBMITTED",
            UnknownAbility(_) => "SUBMIT_UNKNOWN_ABILITY",
            NotUnlocked(_) => "SUBMIT_NOT_UNLOCKED",
            OnCooldown(_) => "SUBMIT_ON_COOLDOWN",
            NoHandler(_) => "SUBMIT_NO_HANDLER",
            UnknownTarget(_) => "SUBMIT_UNKNOWN_TARGET",
            TargetDead => "SUBMIT_TARGET_DEAD",
            MonsterDead => "SUBMIT_MONSTER_DEAD",
            ShapeMismatch => "SUBMIT_SHAPE_MISMATCH",
            NoVisibleTarget => "SUBMIT_NO_VISIBLE_TARGET",
            RacialPassiveOnly => "SUBMIT_RACIAL_PASSIVE_ONLY",
            RacialTargetNotAllowed => "SUBMIT_RACIAL_TARGET_NOT_ALLOWED",
            RacialExhausted => "SUBMIT_RACIAL_EXHAUSTED",
            Oracle(_) => "SUBMIT_ORACLE",
        }
    }
}
