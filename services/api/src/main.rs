mod dashboard;
mod error;
mod extractors;
mod missions;
mod safety;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Utc};
use skyops_analytics::missions::MissionAnalytics;
use skyops_analytics::safety::SafetyAnalytics;
use skyops_common::types::ServiceInfo;
use skyops_config::{init_tracing, AppConfig};
use skyops_db::kpi::pg_repository::PgKpiRepository;
use skyops_db::missions::pg_repository::{PgMissionRepository, PgPlanningRepository};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub missions: MissionAnalytics<PgMissionRepository, PgPlanningRepository>,
    pub safety: SafetyAnalytics<PgKpiRepository>,
}

pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("skyops-api"))
}

async fn metrics() -> impl IntoResponse {
    let body = "\
# HELP skyops_up Service up indicator\n\
# TYPE skyops_up gauge\n\
skyops_up 1\n\
# HELP skyops_info Service info\n\
# TYPE skyops_info gauge\n\
skyops_info{service=\"skyops-api\",version=\"0.1.0\"} 1\n";

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse::<HeaderValue>().unwrap(),
            "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            "x-owner-id".parse().unwrap(),
            "x-user-id".parse().unwrap(),
            "x-user-profile".parse().unwrap(),
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .merge(dashboard::router())
        .merge(missions::router())
        .merge(safety::router())
        .layer(cors)
        .with_state(state)
}

fn app_state(pool: sqlx::PgPool) -> AppState {
    AppState {
        missions: MissionAnalytics::new(
            PgMissionRepository::new(pool.clone()),
            PgPlanningRepository::new(pool.clone()),
        ),
        safety: SafetyAnalytics::new(PgKpiRepository::new(pool)),
    }
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(service = "skyops-api", "starting");

    let pool = skyops_db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");

    let app = build_router(app_state(pool));
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
