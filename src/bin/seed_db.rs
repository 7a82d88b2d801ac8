use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_insights::{parse_seed_data, seed_database};

/// A utility for loading transactions from a JSON file into a database for the
/// REST API server of sales_insights.
///
/// Does the same as the server's initialize route, without the network fetch.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON array of transaction records.
    #[arg(long, short)]
    input_path: String,

    /// File path to the SQLite database. The database is created if it does
    /// not exist.
    #[arg(long, short)]
    output_path: String,
}

/// Load transactions from a JSON file into a database.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    println!("Reading transactions from {:#?}", args.input_path);
    let json = fs::read_to_string(&args.input_path)?;
    let transactions = parse_seed_data(&json)?;

    println!("Opening database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let count = seed_database(conn, transactions)?;

    println!("Inserted {count} transactions.");

    Ok(())
}
