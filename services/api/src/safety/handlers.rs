use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use skyops_analytics::safety::{KpiTrend, SafetySnapshot, ShiTrend};
use skyops_common::error::SkyopsError;

use crate::error::ApiError;
use crate::extractors::OwnerId;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub indicator: Option<String>,
}

pub async fn safety_snapshot(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
) -> Json<SafetySnapshot> {
    Json(state.safety.snapshot(owner).await)
}

pub async fn kpi_trend(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Query(query): Query<TrendQuery>,
) -> Result<Json<KpiTrend>, ApiError> {
    let indicator = query
        .indicator
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SkyopsError::Validation("indicator query parameter is required".to_string())
        })?;

    Ok(Json(state.safety.trend(owner, indicator).await))
}

pub async fn shi_trend(State(state): State<AppState>, OwnerId(owner): OwnerId) -> Json<ShiTrend> {
    Json(state.safety.shi_trend(owner).await)
}
