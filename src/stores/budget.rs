//! Defines the budget store trait.

use crate::{Error, models::Budget};

/// Handles the retrieval and setting of budgets.
pub trait BudgetStore {
    /// Retrieve every budget in the store.
    fn get_all(&self) -> Result<Vec<Budget>, Error>;

    /// Insert or replace the budget for the `(category, month)` pair.
    ///
    /// Setting a budget for a pair that already has one replaces the amount,
    /// so the store never holds more than one record per pair. Returns the
    /// stored budget.
    fn upsert(&mut self, budget: Budget) -> Result<Budget, Error>;
}
