//! Database ID type definition.

/// The ID a transaction record carries in the seed data.
///
/// Seeding twice inserts the same IDs twice, so this is not a primary key.
pub type TransactionId = i64;
