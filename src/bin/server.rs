use std::{
    env,
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use allowance_rs::{AppState, build_router, graceful_shutdown};

/// Where the server keeps its records.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// A SQLite database file.
    Sqlite,
    /// A single JSON data file.
    JsonFile,
}

/// The REST API server for allowance_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The storage backend to use.
    #[arg(long, value_enum, default_value_t = Backend::Sqlite)]
    backend: Backend,

    /// File path to the SQLite database or JSON data file.
    #[arg(long)]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(&args.log_path) {
        eprintln!("Could not open log file {}: {error}", args.log_path.display());
        return ExitCode::FAILURE;
    }

    let Ok(secret) = env::var("SECRET") else {
        tracing::error!("The environment variable 'SECRET' must be set");
        return ExitCode::FAILURE;
    };

    let state = match args.backend {
        Backend::Sqlite => Connection::open(&args.db_path)
            .map_err(allowance_rs::Error::from)
            .and_then(|connection| AppState::with_sqlite(connection, &secret)),
        Backend::JsonFile => AppState::with_json_file(&args.db_path, &secret),
    };
    let state = match state {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not open {}: {error}", args.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    tracing::info!(
        "HTTP server listening on {addr} with the {:?} backend at {}",
        args.backend,
        args.db_path.display()
    );
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging(log_path: &Path) -> std::io::Result<()> {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
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
