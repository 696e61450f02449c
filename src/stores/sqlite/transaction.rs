//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionUpdate},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SqliteTransactionStore {
    /// Retrieve every transaction in the database, newest first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, amount, date, description, category, kind FROM \"transaction\"
                 ORDER BY date DESC, id DESC",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (amount, date, description, category, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, amount, date, description, category, kind",
            )?
            .query_row(
                (
                    builder.amount,
                    builder.date,
                    &builder.description,
                    builder.category,
                    builder.kind,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Apply a partial update to the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - [Error::NonPositiveAmount] if the replacement amount is zero or negative,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        id: DatabaseID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        let existing = connection
            .prepare(
                "SELECT id, amount, date, description, category, kind FROM \"transaction\"
                 WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => error.into(),
            })?;

        let updated = update.apply(&existing)?;

        connection.execute(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, description = ?3, category = ?4, kind = ?5
             WHERE id = ?6",
            (
                updated.amount(),
                updated.date(),
                updated.description(),
                updated.category(),
                updated.kind(),
                id,
            ),
        )?;

        Ok(updated)
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

        if rows_deleted == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        Ok(())
    }
}

impl CreateTable for SqliteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount REAL NOT NULL,
                    date TEXT NOT NULL,
                    description TEXT NOT NULL,
                    category TEXT NOT NULL,
                    kind TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let date = row.get(offset + 2)?;
        let description = row.get(offset + 3)?;
        let category = row.get(offset + 4)?;
        let kind = row.get(offset + 5)?;

        Ok(Transaction::new_unchecked(
            id,
            amount,
            date,
            description,
            category,
            kind,
        ))
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryId, Transaction, TransactionKind, TransactionUpdate},
        stores::TransactionStore,
    };

    use super::SqliteTransactionStore;

    fn get_store() -> SqliteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SqliteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_then_get_returns_same_transaction() {
        let mut store = get_store();

        let created = store
            .create(
                Transaction::build(12.3, CategoryId::Food, TransactionKind::Expense)
                    .unwrap()
                    .date(date!(2024 - 01 - 15))
                    .description("lunch"),
            )
            .unwrap();

        let all = store.get_all().unwrap();

        assert_eq!(all, vec![created.clone()]);
        assert_eq!(created.amount(), 12.3);
        assert_eq!(created.date(), date!(2024 - 01 - 15));
        assert_eq!(created.category(), CategoryId::Food);
        assert_eq!(created.kind(), TransactionKind::Expense);
    }

    #[test]
    fn get_all_returns_newest_first() {
        let mut store = get_store();

        let older = store
            .create(
                Transaction::build(1.0, CategoryId::Food, TransactionKind::Expense)
                    .unwrap()
                    .date(date!(2024 - 01 - 01)),
            )
            .unwrap();
        let newer = store
            .create(
                Transaction::build(2.0, CategoryId::Food, TransactionKind::Expense)
                    .unwrap()
                    .date(date!(2024 - 02 - 01)),
            )
            .unwrap();

        let all = store.get_all().unwrap();

        assert_eq!(all, vec![newer, older]);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut store = get_store();

        let created = store
            .create(
                Transaction::build(10.0, CategoryId::Food, TransactionKind::Expense)
                    .unwrap()
                    .date(date!(2024 - 01 - 15))
                    .description("groceries"),
            )
            .unwrap();

        let updated = store
            .update(
                created.id(),
                TransactionUpdate {
                    amount: Some(15.5),
                    category: Some(CategoryId::Shopping),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount(), 15.5);
        assert_eq!(updated.category(), CategoryId::Shopping);
        assert_eq!(updated.date(), created.date());
        assert_eq!(updated.description(), created.description());

        let all = store.get_all().unwrap();
        assert_eq!(all, vec![updated]);
    }

    #[test]
    fn update_fails_on_missing_id() {
        let mut store = get_store();

        let maybe_updated = store.update(999, TransactionUpdate::default());

        assert_eq!(maybe_updated, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction() {
        let mut store = get_store();

        let created = store
            .create(
                Transaction::build(10.0, CategoryId::Food, TransactionKind::Expense).unwrap(),
            )
            .unwrap();

        store.delete(created.id()).unwrap();

        assert_eq!(store.get_all().unwrap(), vec![]);
    }

    #[test]
    fn delete_fails_on_missing_id() {
        let mut store = get_store();

        let maybe_deleted = store.delete(999);

        assert_eq!(maybe_deleted, Err(Error::DeleteMissingTransaction));
    }
}
