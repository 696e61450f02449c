//! Pocketbook is a web service for tracking personal finances.
//!
//! This library provides a JSON REST API for recording income and expense
//! transactions, setting monthly budgets per category, and reading the
//! aggregated summaries that back a dashboard (monthly trends, category
//! breakdowns and budget-vs-actual comparisons).
//!
//! Persistence goes through a façade that prefers a SQLite database and
//! transparently falls back to flat JSON files when the database is
//! unavailable, see [stores].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod aggregation;
mod db;
mod logging;
pub mod models;
pub mod routes;
mod state;
pub mod stores;

pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routes::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A zero or negative amount was used to create or update a transaction.
    ///
    /// Transactions record a quantity of money that changed hands, with the
    /// direction carried by the transaction type, so the amount must be
    /// strictly positive.
    #[error("transaction amounts must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// A negative amount was used to set a budget.
    #[error("budget amounts must not be negative, got {0}")]
    NegativeBudget(f64),

    /// A required field was missing from the request body.
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// A date string could not be parsed as a calendar date.
    #[error("could not parse \"{0}\" as a date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A month string could not be parsed as a year-month pair.
    #[error("could not parse \"{0}\" as a month, expected YYYY-MM")]
    InvalidMonth(String),

    /// The category ID does not appear in the fixed category list.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The transaction type was neither `expense` nor `income`.
    #[error("\"{0}\" is not a valid transaction type, expected \"expense\" or \"income\"")]
    UnknownTransactionKind(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The flat-file store could not read or write its backing file.
    #[error("could not access the backing file: {0}")]
    StorageError(String),

    /// A value could not be serialized to or deserialized from JSON.
    #[error("could not convert to or from JSON: {0}")]
    JsonError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JsonError(value.to_string())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NonPositiveAmount(_)
            | Error::NegativeBudget(_)
            | Error::MissingField(_)
            | Error::InvalidDate(_)
            | Error::InvalidMonth(_)
            | Error::UnknownCategory(_)
            | Error::UnknownTransactionKind(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
