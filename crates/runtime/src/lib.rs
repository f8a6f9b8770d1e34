//! Room host for the raid engine.
//!
//! One [`Room`] owns one simulation: it wires the static content oracles to
//! `raid-core`, exposes the submission/resolution surface the session layer
//! calls, and fans resolved rounds out on a topic-based event bus. Rooms are
//! fully independent; running many of them concurrently shares nothing.

mod error;
mod events;
mod room;

pub use error::RoomError;
pub use events::{EventBus, GameDecided, RoomEvent, RoundResolved, Topic};
pub use room::{Room, RoomOptions};
