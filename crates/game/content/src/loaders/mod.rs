//! Data-file loaders.
//!
//! Loaders read override files from disk at host startup; the engine itself
//! never touches the filesystem. Errors are wrapped with `anyhow` context so
//! a bad data file names itself in the failure.

mod balance;

pub use balance::load_balance;

/// Error type shared by all loaders.
pub type LoadError = anyhow::Error;

/// Result alias for loader functions.
pub type LoadResult<T> = Result<T, LoadError>;
