//! Static game content and loaders.
//!
//! This crate houses the shipped ability catalog (class kits, racial gifts,
//! per-ability numbers) and the balance tables, and provides TOML loaders
//! for balance overrides. Content is consumed by the engine through the
//! oracle traits in `raid-core::env` and never appears in game state.

pub mod catalog;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;
pub use tables::BalanceTables;

#[cfg(feature = "loaders")]
pub use loaders::{LoadError, LoadResult, load_balance};
