//! Product sale transactions.
//!
//! This module contains:
//! - The `Transaction` record as it arrives from the seed data and leaves the API
//! - The filter used by the transaction list, including the search term rules
//! - The route handler for listing transactions

mod core;
mod filter;
mod list_endpoint;

pub use core::Transaction;
pub use filter::{SearchTerm, TransactionFilter};
pub use list_endpoint::get_transactions_endpoint;
