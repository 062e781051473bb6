//! Route definitions for the scanmetrics API.

pub mod health;
pub mod projects;
pub mod results;
pub mod scans;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/projects", get(projects::list))
        .route("/scans/{tool}", post(scans::scan_project))
        .route("/scans/{tool}/all", post(scans::scan_all))
        .route("/results/latest", get(results::latest))
        .route("/results/{name}", get(results::get_by_name));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
