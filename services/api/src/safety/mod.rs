pub mod handlers;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/safety/snapshot", get(handlers::safety_snapshot))
        .route("/safety/trend", get(handlers::kpi_trend))
        .route("/safety/shi-trend", get(handlers::shi_trend))
}
