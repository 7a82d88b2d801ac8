//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{pagination::PaginationConfig, seed::SeedSource, stores::TransactionStore};

/// The state of the REST server.
///
/// Build one with [crate::create_app_state] or
/// [crate::create_in_memory_app_state] and pass it to [crate::build_router].
#[derive(Clone)]
pub struct AppState {
    /// The store holding the transaction records.
    pub(crate) transaction_store: Arc<dyn TransactionStore>,

    /// Where the seed endpoint gets its transaction records from.
    pub(crate) seed_source: Arc<dyn SeedSource>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Month names in requests are resolved to midnight in this timezone.
    pub(crate) local_timezone: String,

    /// The config that controls how to return pages of data.
    pub(crate) pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with the default pagination config.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) fn new(
        transaction_store: Arc<dyn TransactionStore>,
        seed_source: Arc<dyn SeedSource>,
        local_timezone: &str,
    ) -> Self {
        Self {
            transaction_store,
            seed_source,
            local_timezone: local_timezone.to_owned(),
            pagination_config: PaginationConfig::default(),
        }
    }
}

/// The state needed by the month-scoped report endpoints.
#[derive(Clone)]
pub struct ReportState {
    /// The store holding the transaction records.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
