//! This file defines the fixed category list that transactions and budgets
//! reference. Categories are static reference data compiled into the app and
//! are not user-editable.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The fixed set of category IDs.
///
/// The wire and database representation is the lowercase ID string, e.g.
/// `"food"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    /// Food and dining out.
    Food,
    /// Transportation.
    Transport,
    /// Rent and utilities.
    Rent,
    /// Entertainment.
    Entertainment,
    /// Shopping.
    Shopping,
    /// Healthcare.
    Healthcare,
    /// Education.
    Education,
    /// Everything that does not fit the other categories.
    Other,
}

impl CategoryId {
    /// Every category ID in display order.
    pub const ALL: [CategoryId; 8] = [
        CategoryId::Food,
        CategoryId::Transport,
        CategoryId::Rent,
        CategoryId::Entertainment,
        CategoryId::Shopping,
        CategoryId::Healthcare,
        CategoryId::Education,
        CategoryId::Other,
    ];

    /// The ID as it appears on the wire and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::Food => "food",
            CategoryId::Transport => "transport",
            CategoryId::Rent => "rent",
            CategoryId::Entertainment => "entertainment",
            CategoryId::Shopping => "shopping",
            CategoryId::Healthcare => "healthcare",
            CategoryId::Education => "education",
            CategoryId::Other => "other",
        }
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl ToSql for CategoryId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for CategoryId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Static reference data describing a category: the ID plus the display
/// metadata the client renders it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The fixed ID that transactions and budgets reference.
    pub id: CategoryId,
    /// The human-readable name, e.g. "Food & Dining".
    pub name: &'static str,
    /// The display color as a hex string.
    pub color: &'static str,
    /// The display icon as an emoji.
    pub icon: &'static str,
}

const CATEGORIES: [Category; 8] = [
    Category {
        id: CategoryId::Food,
        name: "Food & Dining",
        color: "#FF6B6B",
        icon: "🍽️",
    },
    Category {
        id: CategoryId::Transport,
        name: "Transportation",
        color: "#4ECDC4",
        icon: "🚗",
    },
    Category {
        id: CategoryId::Rent,
        name: "Rent & Utilities",
        color: "#45B7D1",
        icon: "🏠",
    },
    Category {
        id: CategoryId::Entertainment,
        name: "Entertainment",
        color: "#96CEB4",
        icon: "🎬",
    },
    Category {
        id: CategoryId::Shopping,
        name: "Shopping",
        color: "#FFEAA7",
        icon: "🛍️",
    },
    Category {
        id: CategoryId::Healthcare,
        name: "Healthcare",
        color: "#DDA0DD",
        icon: "🏥",
    },
    Category {
        id: CategoryId::Education,
        name: "Education",
        color: "#98D8C8",
        icon: "📚",
    },
    Category {
        id: CategoryId::Other,
        name: "Other",
        color: "#F7DC6F",
        icon: "📦",
    },
];

impl Category {
    /// The full category table in display order.
    pub fn all() -> &'static [Category] {
        &CATEGORIES
    }
}
