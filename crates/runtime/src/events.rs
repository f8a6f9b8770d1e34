//! Topic-based event bus for resolved rounds.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use raid_core::{ActorId, RoundLogEntry, Winner};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Every resolved round.
    Round,
    /// Game-deciding results only.
    Outcome,
}

/// A fully resolved round, ready for broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResolved {
    pub room: String,
    pub round: u32,
    pub level: u32,
    pub winner: Option<Winner>,
    pub timestamp: DateTime<Utc>,
    pub log: Vec<RoundLogEntry>,
}

impl RoundResolved {
    /// The log entries one player is allowed to see, in order.
    ///
    /// Private entries (saboteur corruption notes, insight results) reach
    /// only the ids they list.
    pub fn visible_log(&self, viewer: ActorId) -> Vec<&RoundLogEntry> {
        self.log.iter().filter(|e| e.visible_to(viewer)).collect()
    }
}

/// The game in a room has been decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDecided {
    pub room: String,
    pub winner: Winner,
    pub timestamp: DateTime<Utc>,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    Round(RoundResolved),
    Outcome(GameDecided),
}

impl RoomEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RoomEvent::Round(_) => Topic::Round,
            RoomEvent::Outcome(_) => Topic::Outcome,
        }
    }

    /// JSON form for session layers that ship text frames.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to the topics they care about; publishing is
/// best-effort and never blocks round resolution.
pub struct EventBus {
    channels: HashMap<Topic, broadcast::Sender<RoomEvent>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        channels.insert(Topic::Round, broadcast::channel(capacity).0);
        channels.insert(Topic::Outcome, broadcast::channel(capacity).0);
        Self { channels }
    }

    /// Publishes an event to its topic.
    pub fn publish(&self, event: RoomEvent) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - normal, not an error.
            tracing::trace!(?topic, "no subscribers");
        }
    }

    /// Subscribes to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RoomEvent> {
        self.channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
