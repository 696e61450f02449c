//! Defines the transaction store trait.

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionUpdate},
};

/// Handles the creation, retrieval and mutation of transactions.
pub trait TransactionStore {
    /// Retrieve every transaction in the store, newest first.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Create a new transaction in the store and assign it an ID.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Apply a partial update to the transaction with `id`.
    ///
    /// # Errors
    /// Implementers should return [Error::UpdateMissingTransaction] if `id`
    /// does not refer to a transaction in the store.
    fn update(&mut self, id: DatabaseID, update: TransactionUpdate)
    -> Result<Transaction, Error>;

    /// Delete the transaction with `id` from the store.
    ///
    /// # Errors
    /// Implementers should return [Error::DeleteMissingTransaction] if `id`
    /// does not refer to a transaction in the store.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
