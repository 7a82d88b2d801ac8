//! Contains the SQLite backed store and convenience functions for creating an
//! [AppState] that uses it and for loading transactions into a database.

mod transaction;

pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    AppState, Error, db::initialize, seed::SeedSource, stores::TransactionStore,
    transaction::Transaction,
};

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the transaction table if
/// it does not exist yet.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Connection,
    seed_source: Arc<dyn SeedSource>,
    local_timezone: &str,
) -> Result<AppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let transaction_store = SQLiteTransactionStore::new(connection);

    Ok(AppState::new(
        Arc::new(transaction_store),
        seed_source,
        local_timezone,
    ))
}

/// Insert `transactions` into the database behind `db_connection` in one
/// batch, returning how many were inserted.
///
/// The transaction table is created first if it does not exist yet.
///
/// # Errors
/// Returns an error if the database cannot be initialized or any insert
/// fails, in which case nothing is inserted.
pub fn seed_database(
    db_connection: Connection,
    transactions: Vec<Transaction>,
) -> Result<usize, Error> {
    initialize(&db_connection)?;

    SQLiteTransactionStore::new(Arc::new(Mutex::new(db_connection))).insert_many(transactions)
}
