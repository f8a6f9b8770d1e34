//! Balance tables oracle implementation.

use raid_core::{BalanceParams, TablesOracle};

/// Holds the active balance parameters for a room.
///
/// Defaults to the shipped tuning; hosts may construct one from a TOML
/// override via [`crate::loaders::load_balance`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceTables {
    params: BalanceParams,
}

impl BalanceTables {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_params(params: BalanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BalanceParams {
        &self.params
    }
}

impl TablesOracle for BalanceTables {
    fn balance(&self) -> &BalanceParams {
        &self.params
    }
}
