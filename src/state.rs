//! Defines the state of the application which holds the stores that the route
//! handlers use.

use crate::stores::{BudgetStore, TransactionStore};

/// The state of the application.
#[derive(Debug, Clone)]
pub struct AppState<T, B>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    /// The store for transactions.
    pub transaction_store: T,
    /// The store for budgets.
    pub budget_store: B,
}

impl<T, B> AppState<T, B>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    /// Create the application state from the given stores.
    pub fn new(transaction_store: T, budget_store: B) -> Self {
        Self {
            transaction_store,
            budget_store,
        }
    }
}
