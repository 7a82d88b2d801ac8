//! Contains the store trait for [transactions](crate::transaction::Transaction)
//! and its implementations.

mod memory;
mod transaction;

pub mod sqlite;

pub use memory::create_in_memory_app_state;
pub use transaction::TransactionStore;

#[cfg(test)]
pub use memory::InMemoryTransactionStore;
#[cfg(test)]
pub use sqlite::SQLiteTransactionStore;
