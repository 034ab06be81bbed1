use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledger_client::{
    AppState, ClientConfig, api::HttpLedgerApi, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web front end for the transaction ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the ledger API.
    #[arg(long, env = "LEDGER_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// The port to serve the front end from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The log filter, e.g. "info" or "ledger_client=debug".
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_filter);

    let config = match ClientConfig::new(&args.api_url, args.port) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return;
        }
    };

    let state = AppState::new(HttpLedgerApi::new(&config.api_url));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    tracing::info!(
        "HTTP server listening on {} using the ledger API at {}",
        config.address,
        config.api_url
    );

    if let Err(error) = axum_server::bind(config.address)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("The server stopped unexpectedly: {error}");
    }
}

fn setup_logging(log_filter: &str) {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|error| {
        eprintln!("Invalid log filter \"{log_filter}\", falling back to \"info\": {error}");
        EnvFilter::new("info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
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
        // The handlers log their own errors.
        .on_failure(());

    router.layer(tracing_layer)
}
