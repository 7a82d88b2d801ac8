//! Defines the transaction store trait.

use crate::{
    Error,
    charts::{CategoryCount, PriceRangeCount},
    month::DateRange,
    pagination::Page,
    statistics::SalesStatistics,
    transaction::{Transaction, TransactionFilter},
};

/// Handles the bulk creation, querying and aggregation of transactions.
///
/// Every date range is half-open: a transaction sold exactly at
/// `date_range.end` is outside the range.
pub trait TransactionStore: Send + Sync {
    /// Insert all `transactions` in one batch, returning how many were inserted.
    ///
    /// Either every transaction is inserted or none are. Transactions are not
    /// checked for duplicates.
    fn insert_many(&self, transactions: Vec<Transaction>) -> Result<usize, Error>;

    /// Retrieve one page of the transactions that pass `filter`.
    ///
    /// Transactions are returned in the order they were inserted.
    fn find(&self, filter: &TransactionFilter, page: Page) -> Result<Vec<Transaction>, Error>;

    /// Summarise the transactions sold within `date_range`.
    fn sales_statistics(&self, date_range: &DateRange) -> Result<SalesStatistics, Error>;

    /// Count the transactions sold within `date_range` per price range.
    ///
    /// Only non-empty ranges are returned, in ascending order of price.
    fn count_by_price_range(&self, date_range: &DateRange)
    -> Result<Vec<PriceRangeCount>, Error>;

    /// Count the transactions sold within `date_range` per category.
    fn count_by_category(&self, date_range: &DateRange) -> Result<Vec<CategoryCount>, Error>;
}
