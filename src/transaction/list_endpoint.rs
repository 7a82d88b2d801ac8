//! Defines the endpoint for listing a page of transactions.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    month::resolve_month,
    pagination::{Page, PaginationConfig, parse_page_number, parse_page_size},
    stores::TransactionStore,
    transaction::{SearchTerm, Transaction, TransactionFilter},
};

/// The state needed to list transactions.
#[derive(Clone)]
pub struct TransactionListState {
    /// The store holding the transaction records.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how to return pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw query parameters for the transaction list.
///
/// Values are kept as strings and parsed explicitly so that bad values get a
/// descriptive error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// The page number, starting from 1.
    pub page: Option<String>,
    /// The maximum number of transactions per page.
    pub per_page: Option<String>,
    /// Text to search for in titles and descriptions, or a price.
    pub search: Option<String>,
    /// An English month name, e.g. "March".
    pub month: Option<String>,
}

/// A route handler that responds with one page of the transactions sold in a
/// month that match a search.
///
/// A missing or unrecognised month gives an empty list.
///
/// # Errors
/// Responds with 400 Bad Request if `page` or `perPage` is not a positive
/// integer.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionListState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let page = Page {
        number: parse_page_number(
            query.page.as_deref(),
            state.pagination_config.default_page,
        )?,
        size: parse_page_size(
            query.per_page.as_deref(),
            state.pagination_config.default_page_size,
        )?,
    };
    let search = SearchTerm::parse(query.search.as_deref());

    let Some(date_range) = resolve_month(query.month.as_deref(), &state.local_timezone)? else {
        return Ok(Json(Vec::new()));
    };

    let filter = TransactionFilter { date_range, search };

    let transactions = state.transaction_store.find(&filter, page)?;

    Ok(Json(transactions))
}
