//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Two backends are provided: SQLite ([sqlite]) and flat JSON files ([json]).
//! [Fallback] composes the two into the persistence façade the server runs
//! on: operations prefer the SQLite backend and transparently fall back to
//! the JSON files when it is unavailable or failing.

mod budget;
mod fallback;
mod transaction;

pub mod json;
pub mod sqlite;

pub use budget::BudgetStore;
pub use fallback::Fallback;
pub use json::{JsonBudgetStore, JsonTransactionStore};
pub use sqlite::{SqliteBudgetStore, SqliteTransactionStore, open_stores};
pub use transaction::TransactionStore;
