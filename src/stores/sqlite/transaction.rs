//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, named_params, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    charts::{CategoryCount, OPEN_RANGE_START, PriceRange, PriceRangeCount, RANGE_WIDTH},
    db::UNICODE_LOWER,
    month::DateRange,
    pagination::Page,
    statistics::SalesStatistics,
    stores::TransactionStore,
    transaction::{Transaction, TransactionFilter},
};

/// Stores transactions in a SQLite database.
///
/// The `product_transaction` table and `unicode_lower` function must exist, see
/// [crate::db::initialize].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert all `transactions` inside a single SQL transaction.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if any insert fails, in which case nothing
    /// is inserted.
    fn insert_many(&self, transactions: Vec<Transaction>) -> Result<usize, Error> {
        let mut connection = self.lock()?;
        let tx = connection.transaction()?;

        // Prepare the insert statement once for reuse
        let mut stmt = tx.prepare(
            "INSERT INTO product_transaction
                (id, title, price, description, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        for transaction in &transactions {
            stmt.execute((
                transaction.id,
                &transaction.title,
                transaction.price,
                &transaction.description,
                &transaction.category,
                &transaction.image,
                transaction.sold,
                to_unix_millis(transaction.date_of_sale),
            ))?;
        }

        drop(stmt);

        tx.commit()?;
        Ok(transactions.len())
    }

    /// Retrieve one page of the transactions that pass `filter`.
    ///
    /// Transactions are returned in insertion order. Case-insensitive matching
    /// uses the `unicode_lower` function registered by [crate::db::initialize].
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn find(&self, filter: &TransactionFilter, page: Page) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        let query = format!(
            "SELECT id, title, price, description, category, image, sold, date_of_sale
             FROM product_transaction
             WHERE date_of_sale >= :start AND date_of_sale < :end
               AND (instr({UNICODE_LOWER}(title), :search) > 0
                    OR instr({UNICODE_LOWER}(description), :search) > 0
                    OR price = :price)
             ORDER BY row_id
             LIMIT :limit OFFSET :offset"
        );
        let mut stmt = connection.prepare(&query)?;

        stmt.query_map(
            named_params! {
                ":start": to_unix_millis(filter.date_range.start),
                ":end": to_unix_millis(filter.date_range.end),
                ":search": filter.search.text.to_lowercase(),
                ":price": filter.search.price,
                ":limit": to_sql_integer(page.size),
                ":offset": to_sql_integer(page.offset()),
            },
            map_transaction_row,
        )?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(Error::from)
    }

    /// Summarise the transactions sold within `date_range`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn sales_statistics(&self, date_range: &DateRange) -> Result<SalesStatistics, Error> {
        let connection = self.lock()?;

        connection
            .query_row(
                "SELECT
                    COALESCE(SUM(price), 0.0),
                    COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
                 FROM product_transaction
                 WHERE date_of_sale >= :start AND date_of_sale < :end",
                named_params! {
                    ":start": to_unix_millis(date_range.start),
                    ":end": to_unix_millis(date_range.end),
                },
                |row| {
                    Ok(SalesStatistics {
                        total_sale_amount: row.get(0)?,
                        total_sold_items: get_count(row, 1)?,
                        total_not_sold_items: get_count(row, 2)?,
                    })
                },
            )
            .map_err(Error::from)
    }

    /// Count the transactions sold within `date_range` per price range.
    ///
    /// The open-ended range has a NULL lower bound, which sorts last.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn count_by_price_range(
        &self,
        date_range: &DateRange,
    ) -> Result<Vec<PriceRangeCount>, Error> {
        let connection = self.lock()?;

        let query = format!(
            "SELECT
                CASE WHEN price >= 0 AND price < {OPEN_RANGE_START}
                    THEN CAST(price / {RANGE_WIDTH} AS INTEGER) * {RANGE_WIDTH}
                END AS lower_bound,
                COUNT(*)
             FROM product_transaction
             WHERE date_of_sale >= :start AND date_of_sale < :end
             GROUP BY lower_bound
             ORDER BY lower_bound IS NULL, lower_bound"
        );

        connection
            .prepare(&query)?
            .query_map(
                named_params! {
                    ":start": to_unix_millis(date_range.start),
                    ":end": to_unix_millis(date_range.end),
                },
                |row| {
                    Ok(PriceRangeCount {
                        range: PriceRange::from_lower_bound(row.get(0)?),
                        count: get_count(row, 1)?,
                    })
                },
            )?
            .collect::<Result<Vec<PriceRangeCount>, rusqlite::Error>>()
            .map_err(Error::from)
    }

    /// Count the transactions sold within `date_range` per category.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn count_by_category(&self, date_range: &DateRange) -> Result<Vec<CategoryCount>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT category, COUNT(*)
                 FROM product_transaction
                 WHERE date_of_sale >= :start AND date_of_sale < :end
                 GROUP BY category
                 ORDER BY category",
            )?
            .query_map(
                named_params! {
                    ":start": to_unix_millis(date_range.start),
                    ":end": to_unix_millis(date_range.end),
                },
                |row| {
                    Ok(CategoryCount {
                        category: row.get(0)?,
                        count: get_count(row, 1)?,
                    })
                },
            )?
            .collect::<Result<Vec<CategoryCount>, rusqlite::Error>>()
            .map_err(Error::from)
    }
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, title, price, description, category, image, sold,
/// date_of_sale` in that order.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let price = row.get(2)?;
    let description = row.get(3)?;
    let category = row.get(4)?;
    let image = row.get(5)?;
    let sold = row.get(6)?;
    let date_of_sale = from_unix_millis(row.get(7)?).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(7, Type::Integer, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        title,
        price,
        description,
        category,
        image,
        sold,
        date_of_sale,
    })
}

/// Sale dates are stored as milliseconds since the Unix epoch so that range
/// comparisons do not depend on the UTC offset the date was recorded with.
fn to_unix_millis(date_time: OffsetDateTime) -> i64 {
    date_time.unix_timestamp_nanos().div_euclid(1_000_000) as i64
}

fn from_unix_millis(millis: i64) -> Result<OffsetDateTime, time::error::ComponentRange> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
}

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn get_count(row: &Row, index: usize) -> Result<u64, rusqlite::Error> {
    let count: i64 = row.get(index)?;

    u64::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(index, count))
}
