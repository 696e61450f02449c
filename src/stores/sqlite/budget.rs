//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::Budget,
    stores::BudgetStore,
};

/// Stores budgets in a SQLite database.
///
/// The `(category, month)` uniqueness invariant is enforced with a UNIQUE
/// constraint and an upsert.
#[derive(Debug, Clone)]
pub struct SqliteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetStore for SqliteBudgetStore {
    /// Retrieve every budget in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT category, month, amount FROM budget ORDER BY month, category")?
            .query_map([], Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    /// Insert or replace the budget for the `(category, month)` pair.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn upsert(&mut self, budget: Budget) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO budget (category, month, amount) VALUES (?1, ?2, ?3)
                 ON CONFLICT(category, month) DO UPDATE SET amount = excluded.amount
                 RETURNING category, month, amount",
            )?
            .query_row(
                (budget.category_id(), budget.month(), budget.amount()),
                Self::map_row,
            )?;

        Ok(budget)
    }
}

impl CreateTable for SqliteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    category TEXT NOT NULL,
                    month TEXT NOT NULL,
                    amount REAL NOT NULL,
                    UNIQUE(category, month)
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteBudgetStore {
    type ReturnType = Budget;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let category = row.get(offset)?;
        let month = row.get(offset + 1)?;
        let amount = row.get(offset + 2)?;

        Ok(Budget::new_unchecked(category, month, amount))
    }
}

#[cfg(test)]
mod sqlite_budget_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        db::initialize,
        models::{Budget, CategoryId},
        stores::BudgetStore,
    };

    use super::SqliteBudgetStore;

    fn get_store() -> SqliteBudgetStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SqliteBudgetStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn upsert_then_get_returns_budget() {
        let mut store = get_store();
        let month = "2024-03".parse().unwrap();

        let budget = store
            .upsert(Budget::new(CategoryId::Food, month, 250.0).unwrap())
            .unwrap();

        assert_eq!(budget.category_id(), CategoryId::Food);
        assert_eq!(budget.month(), month);
        assert_eq!(budget.amount(), 250.0);
        assert_eq!(store.get_all().unwrap(), vec![budget]);
    }

    #[test]
    fn upsert_replaces_amount_for_same_category_and_month() {
        let mut store = get_store();
        let month = "2024-03".parse().unwrap();

        store
            .upsert(Budget::new(CategoryId::Food, month, 250.0).unwrap())
            .unwrap();
        store
            .upsert(Budget::new(CategoryId::Food, month, 300.0).unwrap())
            .unwrap();

        let all = store.get_all().unwrap();

        assert_eq!(all.len(), 1, "want a single budget record, got {all:?}");
        assert_eq!(all[0].amount(), 300.0);
    }

    #[test]
    fn upsert_keeps_budgets_for_other_months_and_categories() {
        let mut store = get_store();
        let march = "2024-03".parse().unwrap();
        let april = "2024-04".parse().unwrap();

        store
            .upsert(Budget::new(CategoryId::Food, march, 250.0).unwrap())
            .unwrap();
        store
            .upsert(Budget::new(CategoryId::Food, april, 200.0).unwrap())
            .unwrap();
        store
            .upsert(Budget::new(CategoryId::Rent, march, 1200.0).unwrap())
            .unwrap();

        assert_eq!(store.get_all().unwrap().len(), 3);
    }
}
