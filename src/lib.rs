//! Sales insights is a small JSON API over a collection of product sale
//! transactions.
//!
//! The API can seed its store from a remote JSON source and then answer
//! month-scoped queries: a paginated, searchable transaction list, sales
//! statistics, a price-range histogram and a per-category breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod charts;
mod database_id;
mod db;
mod endpoints;
mod internal_server_error;
mod logging;
mod month;
mod not_found;
mod pagination;
mod routing;
mod seed;
mod statistics;
mod stores;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, HttpSeedSource, SeedSource, StaticSeedSource, parse_seed_data};
pub use stores::{
    create_in_memory_app_state,
    sqlite::{create_app_state, seed_database},
};
pub use timezone::get_local_offset;
pub use transaction::Transaction;

use crate::internal_server_error::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
    /// A query parameter could not be parsed into the type the endpoint needs.
    ///
    /// This is the only error that is reported back to the client in detail,
    /// with a 400 Bad Request status.
    #[error("invalid value {value:?} for query parameter \"{name}\": {reason}")]
    InvalidQueryParameter {
        /// The name of the query parameter, e.g. "perPage".
        name: &'static str,
        /// The raw value sent by the client.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The seed data could not be fetched or decoded.
    ///
    /// Covers network failures, non-success HTTP statuses and payloads that
    /// are not an array of transaction records.
    #[error("could not fetch seed data: {0}")]
    SeedFetchError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A calendar date could not be constructed, e.g. for a year out of range.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(value: time::error::ComponentRange) -> Self {
        Error::InvalidDate(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidQueryParameter { .. } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": self.to_string() })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
