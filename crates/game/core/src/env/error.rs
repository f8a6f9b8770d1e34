//! Oracle availability errors.

use crate::error::{ErrorSeverity, GameError};

/// Returned when a component asks the environment for an oracle that was not
/// provided. Always a wiring bug on the host side, never a gameplay outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ability catalog oracle not available")]
    AbilitiesNotAvailable,

    #[error("balance tables oracle not available")]
    TablesNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            Self::TablesNotAvailable => "ORACLE_TABLES_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
