//! Seeds the transaction store from an external source of transaction records.
//!
//! Seeding does not check for existing data: every call inserts the full set
//! of records again.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, internal_server_error::InternalServerError, stores::TransactionStore,
    transaction::Transaction,
};

/// The public JSON document of product transactions used to seed the store.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

const SEED_SUCCESS_MESSAGE: &str = "Database initialized successfully";
const SEED_FAILURE_MESSAGE: &str = "Failed to initialize database";

/// A source of transaction records for seeding the store.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch every transaction record from the source.
    ///
    /// # Errors
    /// Returns [Error::SeedFetchError] if the source is unreachable or does not
    /// hold an array of transaction records.
    async fn fetch(&self) -> Result<Vec<Transaction>, Error>;
}

/// Fetches transaction records as a JSON array over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    /// Create a source that fetches from `url`.
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_owned(),
        }
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<Transaction>, Error> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| Error::SeedFetchError(error.to_string()))?;

        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|error| Error::SeedFetchError(error.to_string()))
    }
}

/// Serves a fixed set of transaction records, e.g. ones read from a file.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    transactions: Vec<Transaction>,
}

impl StaticSeedSource {
    /// Create a source that always returns `transactions`.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn fetch(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.transactions.clone())
    }
}

/// Decode a JSON array of transaction records.
///
/// # Errors
/// Returns [Error::SeedFetchError] if `json` is not an array of transaction
/// records, including records with an invalid `dateOfSale`.
pub fn parse_seed_data(json: &str) -> Result<Vec<Transaction>, Error> {
    serde_json::from_str(json).map_err(|error| Error::SeedFetchError(error.to_string()))
}

/// Fetch every record from `source` and insert them into `store` in one batch.
///
/// Returns the number of records inserted.
///
/// # Errors
/// Returns [Error::SeedFetchError] if the fetch fails, or the store's error if
/// the insert fails. Nothing is inserted on error.
pub async fn seed_store(
    source: &dyn SeedSource,
    store: &dyn TransactionStore,
) -> Result<usize, Error> {
    let transactions = source.fetch().await?;
    tracing::debug!("fetched {} transactions for seeding", transactions.len());

    store.insert_many(transactions)
}

/// The state needed to seed the store.
#[derive(Clone)]
pub struct SeedState {
    /// The store to insert seed data into.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// Where the seed data comes from.
    pub seed_source: Arc<dyn SeedSource>,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            seed_source: state.seed_source.clone(),
        }
    }
}

/// A route handler that seeds the store, responding with a message on success
/// or a fixed error message on any failure.
pub async fn initialize_endpoint(State(state): State<SeedState>) -> Response {
    match seed_store(
        state.seed_source.as_ref(),
        state.transaction_store.as_ref(),
    )
    .await
    {
        Ok(count) => {
            tracing::info!("seeded the store with {count} transactions");
            Json(serde_json::json!({ "message": SEED_SUCCESS_MESSAGE })).into_response()
        }
        Err(error) => {
            tracing::error!("could not seed the store: {error}");
            InternalServerError {
                error: SEED_FAILURE_MESSAGE,
            }
            .into_response()
        }
    }
}
