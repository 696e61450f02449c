//! SQLite-backed implementations of the store traits, plus a convenience
//! function for opening both stores over a single shared connection.

mod budget;
mod transaction;

pub use budget::SqliteBudgetStore;
pub use transaction::SqliteTransactionStore;

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Open the SQLite database at `path` and create stores that share one
/// connection.
///
/// This function will modify the database by adding the tables for the domain
/// models if they do not already exist.
///
/// # Errors
/// Returns an error if the database could not be opened or initialized.
pub fn open_stores(path: &Path) -> Result<(SqliteTransactionStore, SqliteBudgetStore), Error> {
    let connection = Connection::open(path)?;

    create_stores(connection)
}

/// Create stores over an in-memory SQLite database.
///
/// The database is discarded when the stores are dropped, which makes this
/// useful for tests.
///
/// # Errors
/// Returns an error if the database could not be opened or initialized.
pub fn open_stores_in_memory() -> Result<(SqliteTransactionStore, SqliteBudgetStore), Error> {
    let connection = Connection::open_in_memory()?;

    create_stores(connection)
}

fn create_stores(
    connection: Connection,
) -> Result<(SqliteTransactionStore, SqliteBudgetStore), Error> {
    initialize(&connection)?;

    let connection = Arc::new(Mutex::new(connection));

    Ok((
        SqliteTransactionStore::new(connection.clone()),
        SqliteBudgetStore::new(connection),
    ))
}
