//! This file defines the `Budget` type, a per-category monthly spending cap,
//! and `MonthKey`, the year-month value that budgets and the monthly
//! summaries are keyed by.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::Date;

use crate::{Error, models::CategoryId};

/// A calendar month, e.g. `2024-03`.
///
/// Ordering is chronological. The wire and database representation is the
/// `YYYY-MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    /// Create a month key.
    ///
    /// # Errors
    /// Returns an [Error::InvalidMonth] if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(format!("{year:04}-{month:02}")));
        }

        Ok(Self { year, month })
    }

    /// The month that `date` falls in.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// The month immediately before this one.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Whether `date` falls within this month.
    pub fn contains(self, date: Date) -> bool {
        MonthKey::containing(date) == self
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The month number, `1..=12`.
    pub fn month(self) -> u8 {
        self.month
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for MonthKey {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.to_string().into())
    }
}

impl FromSql for MonthKey {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// A per-category spending cap for one month.
///
/// There is at most one budget per `(category, month)` pair; setting a budget
/// for a pair that already has one replaces the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    category_id: CategoryId,
    amount: f64,
    month: MonthKey,
}

impl Budget {
    /// Create a budget.
    ///
    /// # Errors
    /// Returns an [Error::NegativeBudget] if `amount` is negative. A zero
    /// amount is allowed and means "no spending planned".
    pub fn new(category_id: CategoryId, month: MonthKey, amount: f64) -> Result<Self, Error> {
        if amount < 0.0 {
            return Err(Error::NegativeBudget(amount));
        }

        Ok(Self {
            category_id,
            amount,
            month,
        })
    }

    /// Create a budget without validating the amount.
    ///
    /// The caller should ensure that `amount` is not negative. This function
    /// is intended for store implementations reconstructing budgets that were
    /// validated when they were set.
    pub fn new_unchecked(category_id: CategoryId, month: MonthKey, amount: f64) -> Self {
        Self {
            category_id,
            amount,
            month,
        }
    }

    /// The category the budget caps.
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// The budgeted amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The month the budget applies to.
    pub fn month(&self) -> MonthKey {
        self.month
    }
}

#[cfg(test)]
mod month_key_tests {
    use time::macros::date;

    use crate::Error;

    use super::MonthKey;

    #[test]
    fn from_str_parses_valid_month() {
        let month: MonthKey = "2024-03".parse().unwrap();

        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 3);
        assert_eq!(month.to_string(), "2024-03");
    }

    #[test]
    fn from_str_fails_on_malformed_text() {
        for text in ["2024", "2024-13", "2024-0", "24-03", "March 2024", ""] {
            let maybe_month = text.parse::<MonthKey>();

            assert_eq!(
                maybe_month,
                Err(Error::InvalidMonth(text.to_string())),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn previous_crosses_year_boundary() {
        let january: MonthKey = "2024-01".parse().unwrap();

        assert_eq!(january.previous().to_string(), "2023-12");
    }

    #[test]
    fn contains_matches_only_dates_in_the_month() {
        let month = MonthKey::containing(date!(2024 - 02 - 10));

        assert!(month.contains(date!(2024 - 02 - 01)));
        assert!(month.contains(date!(2024 - 02 - 29)));
        assert!(!month.contains(date!(2024 - 03 - 01)));
        assert!(!month.contains(date!(2023 - 02 - 10)));
    }

    #[test]
    fn ordering_is_chronological() {
        let earlier: MonthKey = "2023-12".parse().unwrap();
        let later: MonthKey = "2024-01".parse().unwrap();

        assert!(earlier < later);
    }

    #[test]
    fn serializes_as_string() {
        let month: MonthKey = "2024-03".parse().unwrap();

        let json = serde_json::to_string(&month).unwrap();

        assert_eq!(json, "\"2024-03\"");
    }
}
