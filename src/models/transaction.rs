//! This file defines the type `Transaction`, the core type of the
//! application, along with the builder for creating new transactions and the
//! partial-update type used by the PUT endpoint.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{CategoryId, DatabaseID},
};

/// Whether a transaction spends or earns money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl TransactionKind {
    /// The kind as it appears on the wire and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            _ => Err(Error::UnknownTransactionKind(s.to_string())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    amount: f64,
    date: Date,
    description: String,
    category: CategoryId,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    ///
    /// # Errors
    /// Returns an [Error::NonPositiveAmount] if `amount` is zero or negative.
    pub fn build(
        amount: f64,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Result<TransactionBuilder, Error> {
        TransactionBuilder::new(amount, category, kind)
    }

    /// Create a transaction without validating the amount.
    ///
    /// The caller should ensure that `amount` is greater than zero. This
    /// function is intended for store implementations reconstructing
    /// transactions that were validated when they were created.
    pub fn new_unchecked(
        id: DatabaseID,
        amount: f64,
        date: Date,
        description: String,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            amount,
            date,
            description,
            category,
            kind,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The fixed category that classifies the transaction.
    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Whether the transaction is an expense or income.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

/// Builder for creating a new [Transaction].
///
/// The date defaults to today and the description to an empty string.
/// Finalize the builder by passing it to a
/// [TransactionStore](crate::stores::TransactionStore), which assigns the ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) amount: f64,
    pub(crate) date: Date,
    pub(crate) description: String,
    pub(crate) category: CategoryId,
    pub(crate) kind: TransactionKind,
}

impl TransactionBuilder {
    /// Create a builder for a new transaction.
    ///
    /// # Errors
    /// Returns an [Error::NonPositiveAmount] if `amount` is zero or negative.
    pub fn new(
        amount: f64,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Result<Self, Error> {
        if amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        Ok(Self {
            amount,
            date: OffsetDateTime::now_utc().date(),
            description: String::new(),
            category,
            kind,
        })
    }

    /// Set the date for the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Finalise the builder into a [Transaction] with the given `id`.
    pub fn finalise(self, id: DatabaseID) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            category: self.category,
            kind: self.kind,
        }
    }
}

/// A partial update to an existing [Transaction].
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    /// Replacement amount, validated on apply.
    pub amount: Option<f64>,
    /// Replacement date.
    pub date: Option<Date>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement category.
    pub category: Option<CategoryId>,
    /// Replacement transaction type.
    pub kind: Option<TransactionKind>,
}

impl TransactionUpdate {
    /// Apply the update to `transaction`, producing the updated transaction.
    ///
    /// # Errors
    /// Returns an [Error::NonPositiveAmount] if the replacement amount is
    /// zero or negative.
    pub fn apply(self, transaction: &Transaction) -> Result<Transaction, Error> {
        if let Some(amount) = self.amount
            && amount <= 0.0
        {
            return Err(Error::NonPositiveAmount(amount));
        }

        Ok(Transaction {
            id: transaction.id,
            amount: self.amount.unwrap_or(transaction.amount),
            date: self.date.unwrap_or(transaction.date),
            description: self
                .description
                .unwrap_or_else(|| transaction.description.clone()),
            category: self.category.unwrap_or(transaction.category),
            kind: self.kind.unwrap_or(transaction.kind),
        })
    }
}
