use async_trait::async_trait;
use time::{Date, Month, OffsetDateTime, Time, macros::datetime};

use crate::{
    Error,
    charts::{CategoryCount, PriceRangeCount},
    month::DateRange,
    pagination::Page,
    seed::SeedSource,
    statistics::SalesStatistics,
    stores::TransactionStore,
    transaction::{Transaction, TransactionFilter},
};

/// A sold transaction on 2024-03-05 with an empty description and image.
pub(crate) fn transaction(id: i64, title: &str, price: f64, category: &str) -> Transaction {
    Transaction {
        id,
        title: title.to_owned(),
        price,
        description: String::new(),
        category: category.to_owned(),
        image: String::new(),
        sold: true,
        date_of_sale: datetime!(2024-03-05 12:00 UTC),
    }
}

/// Noon UTC on `day` of `month` in the current year.
pub(crate) fn sold_this_year(month: Month, day: u8) -> OffsetDateTime {
    let year = OffsetDateTime::now_utc().year();

    Date::from_calendar_date(year, month, day)
        .expect("invalid test date")
        .with_time(Time::MIDNIGHT)
        .assume_utc()
        + time::Duration::hours(12)
}

/// A seed source that is always unreachable.
pub(crate) struct FailingSeedSource;

#[async_trait]
impl SeedSource for FailingSeedSource {
    async fn fetch(&self) -> Result<Vec<Transaction>, Error> {
        Err(Error::SeedFetchError("connection refused".to_owned()))
    }
}

/// A store where every operation fails.
pub(crate) struct FailingTransactionStore;

impl TransactionStore for FailingTransactionStore {
    fn insert_many(&self, _: Vec<Transaction>) -> Result<usize, Error> {
        Err(Error::DatabaseLockError)
    }

    fn find(&self, _: &TransactionFilter, _: Page) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn sales_statistics(&self, _: &DateRange) -> Result<SalesStatistics, Error> {
        Err(Error::DatabaseLockError)
    }

    fn count_by_price_range(&self, _: &DateRange) -> Result<Vec<PriceRangeCount>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn count_by_category(&self, _: &DateRange) -> Result<Vec<CategoryCount>, Error> {
        Err(Error::DatabaseLockError)
    }
}
