//! Round-scoped submission state.

use crate::action::{PendingAction, RacialAction};

/// Queues and bookkeeping for the round currently accepting submissions.
///
/// Created at room start, drained by the resolver, and reset at cleanup.
/// `PendingAction`s live exactly one round.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    /// One-based round counter.
    pub number: u32,
    /// False while a round is resolving or after the game has ended.
    pub accepting: bool,
    /// Class actions in submission order.
    pub pending: Vec<PendingAction>,
    /// Racial actions in submission order, validated independently.
    pub racial: Vec<RacialAction>,
    next_submission_index: u32,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            number: 1,
            accepting: true,
            pending: Vec::new(),
            racial: Vec::new(),
            next_submission_index: 0,
        }
    }

    /// Hands out the tiebreaker used when priorities are equal.
    pub fn next_submission_index(&mut self) -> u32 {
        let index = self.next_submission_index;
        self.next_submission_index += 1;
        index
    }

    /// Round-cleanup reset; reopens the submission window unless the caller
    /// has closed the room.
    pub fn advance(&mut self, accepting: bool) {
        self.number += 1;
        self.accepting = accepting;
        self.pending.clear();
        self.racial.clear();
        self.next_submission_index = 0;
    }
}
