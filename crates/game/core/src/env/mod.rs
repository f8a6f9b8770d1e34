//! Traits describing read-only rule data.
//!
//! Oracles expose the ability catalog, balance tables, and the deterministic
//! RNG. The [`Env`] aggregate bundles them so the resolver and every ability
//! handler can reach what they need through one explicit context value instead
//! of a shared global room object.

mod abilities;
mod error;
mod rng;
mod tables;

pub use abilities::{AbilityOracle, ClassBaseline};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed, seed_ctx};
pub use tables::{
    BalanceParams, ComebackParams, CoordinationParams, CritParams, HealParams, MonsterParams,
    TablesOracle,
};

/// Aggregates the read-only oracles required by round resolution.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, A, T, R>
where
    A: AbilityOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    abilities: Option<&'a A>,
    tables: Option<&'a T>,
    rng: Option<&'a R>,
}

/// Trait-object form of [`Env`] passed through the resolver and handlers.
pub type SystemsEnv<'a> = Env<'a, dyn AbilityOracle + 'a, dyn TablesOracle + 'a, dyn RngOracle + 'a>;

impl<'a, A, T, R> Env<'a, A, T, R>
where
    A: AbilityOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(abilities: Option<&'a A>, tables: Option<&'a T>, rng: Option<&'a R>) -> Self {
        Self {
            abilities,
            tables,
            rng,
        }
    }

    pub fn with_all(abilities: &'a A, tables: &'a T, rng: &'a R) -> Self {
        Self::new(Some(abilities), Some(tables), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            abilities: None,
            tables: None,
            rng: None,
        }
    }

    /// Returns the AbilityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AbilitiesNotAvailable` if no catalog was provided.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TablesNotAvailable` if no tables oracle was provided.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Shortcut to the balance parameters.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TablesNotAvailable` if no tables oracle was provided.
    pub fn balance(&self) -> Result<&'a BalanceParams, OracleError> {
        Ok(self.tables()?.balance())
    }
}

impl<'a, A, T, R> Env<'a, A, T, R>
where
    A: AbilityOracle + 'a,
    T: TablesOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into the trait-object based [`SystemsEnv`].
    pub fn as_systems_env(&self) -> SystemsEnv<'a> {
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|a| a as _);
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|t| t as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        Env::new(abilities, tables, rng)
    }
}
