pub mod handlers;
pub mod responses;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/missions/totals", get(handlers::mission_totals))
        .route("/missions/timeline", get(handlers::mission_timeline))
        .route("/missions/charts/monthly", get(handlers::monthly_chart))
        .route("/missions/charts/results", get(handlers::result_chart))
}
