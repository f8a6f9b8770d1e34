//! Structured round log.
//!
//! The log is the round's sole externally visible artifact besides the state
//! snapshots. Entries carry visibility: public entries go to every player,
//! private entries only to the ids they list (plus source and target).

use crate::state::ActorId;

/// Classification of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogKind {
    /// Round framing (start, victory, defeat).
    Round,
    /// A resolved or skipped action.
    Action,
    Damage,
    Healing,
    /// Status applied, removed, or expired.
    Status,
    Death,
    Resurrection,
    /// Monster behavior.
    Monster,
    /// Hidden-role information becoming known. Partitioned to the round tail.
    Reveal,
    /// Saboteur interference. Partitioned to the round tail.
    Corruption,
    /// Level-ups, unlocks, passive activations.
    Progression,
    /// Comeback and other engine-driven state changes.
    System,
    /// A failed action or an aborted round.
    Error,
}

impl LogKind {
    /// Entries of these kinds are stably moved after all others when the
    /// round's log is finalized.
    pub const fn partitions_to_tail(self) -> bool {
        matches!(self, Self::Reveal | Self::Corruption)
    }
}

/// One structured log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundLogEntry {
    pub kind: LogKind,
    pub message: String,
    pub is_public: bool,
    pub source: Option<ActorId>,
    pub target: Option<ActorId>,
    /// Extra viewers for private entries.
    pub visible_to: Vec<ActorId>,
}

impl RoundLogEntry {
    /// True if `viewer` may see this entry.
    pub fn visible_to(&self, viewer: ActorId) -> bool {
        self.is_public
            || self.source == Some(viewer)
            || self.target == Some(viewer)
            || self.visible_to.contains(&viewer)
    }
}

/// Ordered log for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundLog {
    entries: Vec<RoundLogEntry>,
}

impl RoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RoundLogEntry) {
        self.entries.push(entry);
    }

    /// Appends a public entry with no attributed entities.
    pub fn public(&mut self, kind: LogKind, message: impl Into<String>) {
        self.push(RoundLogEntry {
            kind,
            message: message.into(),
            is_public: true,
            source: None,
            target: None,
            visible_to: Vec::new(),
        });
    }

    /// Appends a public entry attributed to a source and/or target.
    pub fn event(
        &mut self,
        kind: LogKind,
        message: impl Into<String>,
        source: Option<ActorId>,
        target: Option<ActorId>,
    ) {
        self.push(RoundLogEntry {
            kind,
            message: message.into(),
            is_public: true,
            source,
            target,
            visible_to: Vec::new(),
        });
    }

    /// Appends a private entry visible only to the listed ids.
    pub fn private(&mut self, kind: LogKind, message: impl Into<String>, visible_to: Vec<ActorId>) {
        self.push(RoundLogEntry {
            kind,
            message: message.into(),
            is_public: false,
            source: None,
            target: None,
            visible_to,
        });
    }

    /// Stable-partitions reveal/corruption entries after everything else.
    ///
    /// Relative order inside both groups is preserved, so the narrative of
    /// the round reads normally and the reveals land together at the end.
    pub fn finalize(&mut self) {
        let (tail, head): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|e| e.kind.partitions_to_tail());
        self.entries = head;
        self.entries.extend(tail);
    }

    pub fn entries(&self) -> &[RoundLogEntry] {
        &self.entries
    }

    /// Entries a specific player is allowed to see, in order.
    pub fn visible_entries(&self, viewer: ActorId) -> impl Iterator<Item = &RoundLogEntry> {
        self.entries.iter().filter(move |e| e.visible_to(viewer))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_moves_reveals_to_tail_stably() {
        let mut log = RoundLog::new();
        log.public(LogKind::Action, "a");
        log.public(LogKind::Reveal, "r1");
        log.public(LogKind::Damage, "b");
        log.public(LogKind::Corruption, "c1");
        log.public(LogKind::Round, "d");
        log.finalize();

        let kinds: Vec<LogKind> = log.entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LogKind::Action,
                LogKind::Damage,
                LogKind::Round,
                LogKind::Reveal,
                LogKind::Corruption,
            ]
        );
        // Stable within groups.
        assert_eq!(log.entries()[3].message, "r1");
        assert_eq!(log.entries()[4].message, "c1");
    }

    #[test]
    fn private_entries_are_hidden_from_outsiders() {
        let mut log = RoundLog::new();
        log.private(LogKind::Corruption, "secret", vec![ActorId(2)]);
        log.public(LogKind::Action, "open");

        let seen: Vec<_> = log.visible_entries(ActorId(1)).collect();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, "open");

        let seen: Vec<_> = log.visible_entries(ActorId(2)).collect();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn source_and_target_always_see_their_entry() {
        let mut log = RoundLog::new();
        log.push(RoundLogEntry {
            kind: LogKind::Damage,
            message: "hit".into(),
            is_public: false,
            source: Some(ActorId(1)),
            target: Some(ActorId(2)),
            visible_to: Vec::new(),
        });
        assert!(log.entries()[0].visible_to(ActorId(1)));
        assert!(log.entries()[0].visible_to(ActorId(2)));
        assert!(!log.entries()[0].visible_to(ActorId(3)));
    }
}
