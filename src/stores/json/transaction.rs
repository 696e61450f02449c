//! Implements a flat-file JSON backed transaction store.

use std::path::{Path, PathBuf};

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionUpdate},
    stores::TransactionStore,
};

use super::{load_or_default, save};

/// Stores transactions in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonTransactionStore {
    path: PathBuf,
}

impl JsonTransactionStore {
    /// Create a store backed by `transactions.json` inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("transactions.json"),
        }
    }

    fn load(&self) -> Result<Vec<Transaction>, Error> {
        load_or_default(&self.path)
    }
}

impl TransactionStore for JsonTransactionStore {
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let mut transactions = self.load()?;
        transactions.sort_by(|a, b| b.date().cmp(&a.date()).then(b.id().cmp(&a.id())));

        Ok(transactions)
    }

    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let mut transactions = self.load()?;

        let next_id = transactions
            .iter()
            .map(Transaction::id)
            .max()
            .unwrap_or_default()
            + 1;
        let transaction = builder.finalise(next_id);

        transactions.push(transaction.clone());
        save(&self.path, &transactions)?;

        Ok(transaction)
    }

    fn update(
        &mut self,
        id: DatabaseID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut transactions = self.load()?;

        let position = transactions
            .iter()
            .position(|transaction| transaction.id() == id)
            .ok_or(Error::UpdateMissingTransaction)?;

        let updated = update.apply(&transactions[position])?;
        transactions[position] = updated.clone();
        save(&self.path, &transactions)?;

        Ok(updated)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let mut transactions = self.load()?;
        let count_before = transactions.len();

        transactions.retain(|transaction| transaction.id() != id);

        if transactions.len() == count_before {
            return Err(Error::DeleteMissingTransaction);
        }

        save(&self.path, &transactions)
    }
}
