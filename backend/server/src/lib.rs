//! Backend of a tournament penalty tracker.
//!
//! Judges record rules infractions (round, table, player, infraction,
//! penalty) and review what has already been handed out while the event
//! runs.
//!
//!
//!
//! # General Infrastructure
//! - Judge stations on the event floor talk to this backend over the LAN
//! - The backend holds the Google service account; clients never see credentials
//! - All persistent state is one Google spreadsheet, one row per penalty
//! - Two routes only: `POST /addPenalty` appends a row, `GET /getPenalties` lists every row
//!
//!
//!
//! # Notes
//!
//! ## Google Sheets as the store
//! In theory, we could keep penalties in a real database and export a sheet
//! afterwards. But, the scorekeeper works inside the spreadsheet during the
//! event and fixes typos by hand between rounds. Keeping the sheet as the
//! single source of truth removes the syncing problem entirely, at the cost
//! of a slower read path, which a per-judge polling interval of a few
//! seconds absorbs without getting near the API quota.
//!
//! Auth is a service-account JWT exchanged per request, no token cache. A
//! revoked key stops working at the next request.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! export RUST_PORT=1111
//! export GOOGLE_SERVICE_ACCOUNT_EMAIL=tracker@event.iam.gserviceaccount.com
//! export GOOGLE_PRIVATE_KEY="$(cat key.pem)"
//! export SPREADSHEET_ID=1AbC...
//! export SHEET_TITLE=Penalità
//! ```
//!
//! The private key may also be mounted at `/run/secrets/GOOGLE_PRIVATE_KEY`.
//! The sheet's first row must hold the column titles; see
//! `record::sheet::COLUMN_TITLES`.
//!
//! Smoke checks.
//! ```sh
//! curl localhost:1111/getPenalties
//! curl -X POST localhost:1111/addPenalty \
//!   -H 'Content-Type: application/json' \
//!   -d '{"values":{"round":1,"table":"12","judge":"Alice","infraction":"Slow Play","penalty":"Warning"}}'
//! ```
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod sheets;
pub mod state;

use routes::{add_penalty_handler, get_penalties_handler};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/addPenalty", post(add_penalty_handler))
        .route("/getPenalties", get(get_penalties_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
