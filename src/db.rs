//! Sets up the application's SQLite database.

use rusqlite::{Connection, functions::FunctionFlags};

use crate::Error;

/// The name of the SQL function that lowercases text with Unicode case rules.
pub(crate) const UNICODE_LOWER: &str = "unicode_lower";

/// Create the tables and indexes the application needs and register the SQL
/// functions its queries use.
///
/// Safe to call on a database that has already been initialized. Functions
/// belong to the connection, so this must run on every new connection.
///
/// # Errors
/// Returns an [Error::SqlError] if a table, index or function cannot be
/// created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;
    register_functions(connection)?;

    Ok(())
}

/// SQLite's built-in `lower` only folds ASCII letters.
fn register_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: String = context.get(0)?;
            Ok(text.to_lowercase())
        },
    )
}

/// Create the transaction table in the database.
///
/// `row_id` preserves insertion order. `id` comes from the seed data and is
/// not unique since seeding twice duplicates every record.
fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product_transaction (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL,
                title TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale INTEGER NOT NULL
                )",
        (),
    )?;

    // Every query filters on the month of sale.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_product_transaction_date_of_sale
            ON product_transaction(date_of_sale);",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("first initialization failed");
        initialize(&conn).expect("second initialization failed");
    }

    #[test]
    fn creates_transaction_table() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM product_transaction", [], |row| {
                row.get(0)
            })
            .unwrap();

        assert_eq!(count, 0);
    }

    #[test]
    fn unicode_lower_folds_non_ascii_letters() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let lowered: String = conn
            .query_row("SELECT unicode_lower('ÉCLAIR Ünd')", [], |row| row.get(0))
            .unwrap();

        assert_eq!(lowered, "éclair ünd");
    }
}
