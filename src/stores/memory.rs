//! Implements an in-memory transaction store.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::{
    AppState, Error,
    charts::{CategoryCount, PriceRangeCount, count_by_category, count_by_price_range},
    month::DateRange,
    pagination::Page,
    seed::SeedSource,
    statistics::SalesStatistics,
    stores::TransactionStore,
    transaction::{Transaction, TransactionFilter},
};

/// Stores transactions in a vector, in insertion order.
///
/// Used when the server runs without a database file, nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every stored transaction, in insertion order.
    #[cfg(test)]
    pub fn transactions(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Transaction>>, Error> {
        self.transactions
            .read()
            .map_err(|_| Error::DatabaseLockError)
    }

    fn in_range<'a>(
        transactions: &'a [Transaction],
        date_range: &'a DateRange,
    ) -> impl Iterator<Item = &'a Transaction> {
        transactions
            .iter()
            .filter(|transaction| date_range.contains(transaction.date_of_sale))
    }
}

/// Creates an [AppState] backed by an empty in-memory store.
///
/// Nothing is persisted, the store starts empty on every run until it is
/// seeded.
pub fn create_in_memory_app_state(
    seed_source: Arc<dyn SeedSource>,
    local_timezone: &str,
) -> AppState {
    AppState::new(
        Arc::new(InMemoryTransactionStore::new()),
        seed_source,
        local_timezone,
    )
}

impl TransactionStore for InMemoryTransactionStore {
    fn insert_many(&self, transactions: Vec<Transaction>) -> Result<usize, Error> {
        let mut stored = self
            .transactions
            .write()
            .map_err(|_| Error::DatabaseLockError)?;

        let count = transactions.len();
        stored.extend(transactions);

        Ok(count)
    }

    fn find(&self, filter: &TransactionFilter, page: Page) -> Result<Vec<Transaction>, Error> {
        let transactions = self.read()?;

        Ok(transactions
            .iter()
            .filter(|transaction| filter.matches(transaction))
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn sales_statistics(&self, date_range: &DateRange) -> Result<SalesStatistics, Error> {
        let transactions = self.read()?;

        Ok(SalesStatistics::summarize(Self::in_range(
            &transactions,
            date_range,
        )))
    }

    fn count_by_price_range(
        &self,
        date_range: &DateRange,
    ) -> Result<Vec<PriceRangeCount>, Error> {
        let transactions = self.read()?;

        Ok(count_by_price_range(Self::in_range(
            &transactions,
            date_range,
        )))
    }

    fn count_by_category(&self, date_range: &DateRange) -> Result<Vec<CategoryCount>, Error> {
        let transactions = self.read()?;

        Ok(count_by_category(Self::in_range(&transactions, date_range)))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        charts::{PriceRange, PriceRangeCount},
        month::DateRange,
        pagination::Page,
        statistics::SalesStatistics,
        stores::TransactionStore,
        test_utils::transaction,
        transaction::{SearchTerm, TransactionFilter},
    };

    use super::InMemoryTransactionStore;

    fn march_2024() -> DateRange {
        DateRange {
            start: datetime!(2024-03-01 00:00 UTC),
            end: datetime!(2024-04-01 00:00 UTC),
        }
    }

    #[test]
    fn insert_many_keeps_duplicates() {
        let store = InMemoryTransactionStore::new();
        let batch = vec![transaction(1, "Mug", 5.0, "A")];

        store.insert_many(batch.clone()).unwrap();
        store.insert_many(batch).unwrap();

        assert_eq!(store.transactions().unwrap().len(), 2);
    }

    #[test]
    fn find_pages_through_matches_in_insertion_order() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many((1..=5).map(|i| transaction(i, "Mug", 5.0, "A")).collect())
            .unwrap();
        let filter = TransactionFilter {
            date_range: march_2024(),
            search: SearchTerm::default(),
        };

        let page = store.find(&filter, Page { number: 2, size: 2 }).unwrap();

        let ids: Vec<_> = page.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn aggregates_ignore_transactions_outside_range() {
        let store = InMemoryTransactionStore::new();
        let mut april = transaction(2, "Lamp", 500.0, "B");
        april.date_of_sale = datetime!(2024-04-01 00:00 UTC);
        store
            .insert_many(vec![transaction(1, "Mug", 150.0, "A"), april])
            .unwrap();

        assert_eq!(
            store.sales_statistics(&march_2024()).unwrap(),
            SalesStatistics {
                total_sale_amount: 150.0,
                total_sold_items: 1,
                total_not_sold_items: 0,
            }
        );
        assert_eq!(
            store.count_by_price_range(&march_2024()).unwrap(),
            vec![PriceRangeCount {
                range: PriceRange::From(100),
                count: 1
            }]
        );
        assert_eq!(store.count_by_category(&march_2024()).unwrap().len(), 1);
    }
}
