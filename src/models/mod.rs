//! The domain models: transactions, budgets and the fixed category list.

mod budget;
mod category;
mod transaction;

pub use budget::{Budget, MonthKey};
pub use category::{Category, CategoryId};
pub use transaction::{Transaction, TransactionBuilder, TransactionKind, TransactionUpdate};

/// The integer type used for database row IDs.
pub type DatabaseID = i64;
