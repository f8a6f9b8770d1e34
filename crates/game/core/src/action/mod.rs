//! Action submission and queuing.
//!
//! A pending action is the round-scoped record of one validated submission:
//! it carries a snapshot of the ability spec so later catalog changes (or a
//! mid-round unlock) cannot alter an already-queued action.

mod error;
mod queue;

pub use error::SubmitError;
pub use queue::{submit_action, submit_racial_action};

use crate::ability::{AbilityKind, AbilitySpec, RaceKind};
use crate::state::{ActorId, Target};

/// A validated class action waiting for the round to resolve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAction {
    pub actor: ActorId,
    pub kind: AbilityKind,
    /// Resolved target, after any invisibility redirect.
    pub target: Target,
    /// Spec snapshot taken at submission time.
    pub spec: AbilitySpec,
    /// Copied from the spec for sorting without another catalog lookup.
    pub priority: i8,
    /// Tiebreaker: earlier submissions resolve first at equal priority.
    pub submission_index: u32,
}

/// A validated racial action waiting for the racial phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RacialAction {
    pub actor: ActorId,
    pub race: RaceKind,
    pub target: Target,
}
