//! Combines a primary store with a fallback store.

use crate::{
    Error,
    models::{Budget, DatabaseID, Transaction, TransactionBuilder, TransactionUpdate},
    stores::{BudgetStore, TransactionStore},
};

/// A store that prefers `P` and falls back to `S` when `P` fails.
///
/// The primary is optional so that the application can run on the fallback
/// alone when the primary backend could not be opened at startup. Each
/// operation is first attempted on the primary; on error the failure is
/// logged and the operation is retried on the fallback.
#[derive(Debug, Clone)]
pub struct Fallback<P, S> {
    primary: Option<P>,
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    /// Create a store that uses `primary` and falls back to `secondary`.
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary: Some(primary),
            secondary,
        }
    }

    /// Create a store that only uses `secondary`.
    pub fn without_primary(secondary: S) -> Self {
        Self {
            primary: None,
            secondary,
        }
    }
}

impl<P, S> TransactionStore for Fallback<P, S>
where
    P: TransactionStore,
    S: TransactionStore,
{
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        if let Some(primary) = &self.primary {
            match primary.get_all() {
                Ok(transactions) => return Ok(transactions),
                Err(error) => {
                    tracing::warn!("primary transaction store failed, using fallback: {error}");
                }
            }
        }

        self.secondary.get_all()
    }

    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        if let Some(primary) = &mut self.primary {
            match primary.create(builder.clone()) {
                Ok(transaction) => return Ok(transaction),
                Err(error) => {
                    tracing::warn!("primary transaction store failed, using fallback: {error}");
                }
            }
        }

        self.secondary.create(builder)
    }

    fn update(
        &mut self,
        id: DatabaseID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        if let Some(primary) = &mut self.primary {
            match primary.update(id, update.clone()) {
                Ok(transaction) => return Ok(transaction),
                // Validation and not-found errors are about the data, not the
                // backend, so they must not be retried on the fallback.
                Err(error @ (Error::SqlError(_) | Error::StorageError(_))) => {
                    tracing::warn!("primary transaction store failed, using fallback: {error}");
                }
                Err(error) => return Err(error),
            }
        }

        self.secondary.update(id, update)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        if let Some(primary) = &mut self.primary {
            match primary.delete(id) {
                Ok(()) => return Ok(()),
                Err(error @ (Error::SqlError(_) | Error::StorageError(_))) => {
                    tracing::warn!("primary transaction store failed, using fallback: {error}");
                }
                Err(error) => return Err(error),
            }
        }

        self.secondary.delete(id)
    }
}

impl<P, S> BudgetStore for Fallback<P, S>
where
    P: BudgetStore,
    S: BudgetStore,
{
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        if let Some(primary) = &self.primary {
            match primary.get_all() {
                Ok(budgets) => return Ok(budgets),
                Err(error) => {
                    tracing::warn!("primary budget store failed, using fallback: {error}");
                }
            }
        }

        self.secondary.get_all()
    }

    fn upsert(&mut self, budget: Budget) -> Result<Budget, Error> {
        if let Some(primary) = &mut self.primary {
            match primary.upsert(budget.clone()) {
                Ok(budget) => return Ok(budget),
                Err(error) => {
                    tracing::warn!("primary budget store failed, using fallback: {error}");
                }
            }
        }

        self.secondary.upsert(budget)
    }
}
