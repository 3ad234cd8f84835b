//! fizzbuzz-api — REST API for the fizzbuzz service.
//!
//! Provides axum route handlers for sequence generation and the
//! most-requested stats query, plus the Prometheus exposition endpoint.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | POST | `/fizzbuzz/run` | Generate a sequence from query parameters |
//! | GET | `/fizzbuzz/stats/most-requested` | Most frequently requested tuple |
//! | GET | `/metrics` | Prometheus exposition |
//!
//! Handlers are generic over the [`FrequencyLedger`] capability so tests can
//! substitute a ledger without touching the routing layer.

pub mod handlers;

use axum::Router;
use axum::routing::{get, post};
use fizzbuzz_metrics::RequestMetrics;
use fizzbuzz_state::FrequencyLedger;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState<L> {
    pub ledger: L,
    pub metrics: RequestMetrics,
}

/// Build the complete API router (fizzbuzz routes + metrics).
pub fn build_router<L>(ledger: L, metrics: RequestMetrics) -> Router
where
    L: FrequencyLedger + Clone + Send + Sync + 'static,
{
    let state = ApiState { ledger, metrics };

    let fizzbuzz_routes = Router::new()
        .route("/run", post(handlers::run::<L>))
        .route("/stats/most-requested", get(handlers::most_requested::<L>))
        .with_state(state.clone());

    Router::new()
        .nest("/fizzbuzz", fizzbuzz_routes)
        .route("/metrics", get(handlers::prometheus_metrics::<L>).with_state(state))
}
