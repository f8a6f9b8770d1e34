//! Room-level errors.

use raid_core::SetupError;

/// Errors surfaced by the room host.
///
/// Submission failures keep their own type ([`raid_core::SubmitError`]) so
/// the session layer can report them to the submitting player verbatim.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Room creation failed (bad party, missing content).
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The game has ended; no further rounds can run.
    #[error("the game in this room is over")]
    Finished,
}
