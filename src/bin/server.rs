//! The REST API server binary.
//!
//! Opens the SQLite database and wires it up as the primary backend with the
//! flat-file JSON stores as the fallback. If the database cannot be opened at
//! all, the server runs on the JSON stores alone.

use std::{fs, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use pocketbook::{
    AppState, build_router, graceful_shutdown,
    stores::{Fallback, JsonBudgetStore, JsonTransactionStore, open_stores},
};

/// The REST API server for pocketbook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "pocketbook.db")]
    db_path: PathBuf,

    /// Directory for the flat-file JSON fallback stores.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    fs::create_dir_all(&args.data_dir).expect("Could not create the data directory");

    let json_transactions = JsonTransactionStore::new(&args.data_dir);
    let json_budgets = JsonBudgetStore::new(&args.data_dir);

    let (transaction_store, budget_store) = match open_stores(&args.db_path) {
        Ok((transactions, budgets)) => (
            Fallback::new(transactions, json_transactions),
            Fallback::new(budgets, json_budgets),
        ),
        Err(error) => {
            tracing::warn!(
                "could not open the database at {:?}, running on the flat-file stores: {error}",
                args.db_path
            );
            (
                Fallback::without_primary(json_transactions),
                Fallback::without_primary(json_budgets),
            )
        }
    };

    let state = AppState::new(transaction_store, budget_store);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .and_then(debug_log.with_filter(filter::LevelFilter::DEBUG)),
        )
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
