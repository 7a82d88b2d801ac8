use std::{
    fs::{self, OpenOptions},
    net::SocketAddr,
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_insights::{
    AppState, DEFAULT_SEED_URL, HttpSeedSource, SeedSource, StaticSeedSource, build_router,
    create_app_state, create_in_memory_app_state, get_local_offset, graceful_shutdown,
    parse_seed_data,
};

/// The REST API server for sales_insights.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. Without it, transactions
    /// are kept in memory and lost on exit.
    #[arg(long)]
    db_path: Option<String>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// The URL of the JSON array of transactions used to seed the database.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// File path to a JSON array of transactions to seed from instead of
    /// `--seed-url`.
    #[arg(long, conflicts_with = "seed_url")]
    seed_file: Option<String>,

    /// The canonical timezone that month names are resolved in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    if get_local_offset(&args.timezone).is_none() {
        tracing::error!("\"{}\" is not a canonical timezone name", args.timezone);
        exit(1);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let seed_source = match get_seed_source(&args) {
        Ok(seed_source) => seed_source,
        Err(error) => {
            tracing::error!("Could not load the seed file: {error}");
            exit(1);
        }
    };

    let app_state = match get_app_state(&args, seed_source) {
        Ok(app_state) => app_state,
        Err(error) => {
            tracing::error!("Could not initialize the database: {error}");
            exit(1);
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        exit(1);
    }
}

fn get_seed_source(args: &Args) -> Result<Arc<dyn SeedSource>, Box<dyn std::error::Error>> {
    let Some(seed_file) = &args.seed_file else {
        return Ok(Arc::new(HttpSeedSource::new(&args.seed_url)));
    };

    let transactions = parse_seed_data(&fs::read_to_string(seed_file)?)?;
    tracing::info!("Loaded {} seed transactions from {seed_file}", transactions.len());

    Ok(Arc::new(StaticSeedSource::new(transactions)))
}

fn get_app_state(
    args: &Args,
    seed_source: Arc<dyn SeedSource>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let Some(db_path) = &args.db_path else {
        tracing::warn!("No database path given, transactions will not be persisted");
        return Ok(create_in_memory_app_state(seed_source, &args.timezone));
    };

    let conn = Connection::open(db_path)?;

    Ok(create_app_state(conn, seed_source, &args.timezone)?)
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(filter::LevelFilter::INFO);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
