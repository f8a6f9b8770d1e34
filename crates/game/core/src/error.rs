//! Common error infrastructure for raid-core.
//!
//! Domain-specific errors (e.g., `SubmitError`, `HandlerError`) are defined in
//! their respective modules alongside the operations they validate. This module
//! provides the shared severity taxonomy and the trait every error implements.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed with a different action
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected inconsistencies that indicate a wiring bug
/// - **Fatal**: Unrecoverable errors indicating corrupted room state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the submitter can retry with a different target or ability.
    ///
    /// Examples: ability on cooldown, no visible redirect target
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown actor, target shape mismatch
    Validation,

    /// Internal error - unexpected inconsistency between catalog and registry.
    ///
    /// Examples: ability in the catalog with no registered handler
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - room state corrupted, the round cannot run.
    ///
    /// Examples: hp above maximum, alive flag disagreeing with hp
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all raid-core errors.
///
/// Provides a uniform interface for error classification across the crate.
/// The host uses `severity()` to pick a response (reject, log-and-skip, abort
/// the round) and `error_code()` for metrics and structured logs.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
