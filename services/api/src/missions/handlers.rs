use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use skyops_analytics::missions::{MonthlyMissionChart, ResultDistribution, TimelineDirection};
use skyops_common::error::SkyopsError;

use crate::error::ApiError;
use crate::extractors::OwnerId;
use crate::missions::responses::{TimelineResponse, TotalsResponse};
use crate::{current_year, AppState};

const DEFAULT_TIMELINE_LIMIT: i64 = 10;
const MAX_TIMELINE_LIMIT: i64 = 100;

/// Year-scoped aggregation filters. The zero defaults are the "no
/// filter" sentinels the analytics layer expects.
#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    #[serde(default)]
    pub client_id: i64,
    #[serde(default)]
    pub pilot_id: i64,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    #[serde(default)]
    pub client_id: i64,
    #[serde(default)]
    pub pilot_id: i64,
    pub direction: Option<String>,
    pub limit: Option<i64>,
    pub timezone: Option<String>,
}

pub async fn mission_totals(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<TotalsResponse>, ApiError> {
    let year = query.year.unwrap_or_else(current_year);
    let data = state
        .missions
        .totals(owner, query.client_id, query.pilot_id, year)
        .await?;
    Ok(Json(TotalsResponse { data }))
}

pub async fn mission_timeline(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let direction = match query.direction.as_deref() {
        None | Some("past") => TimelineDirection::Past,
        Some("future") => TimelineDirection::Future,
        Some(other) => {
            return Err(SkyopsError::Validation(format!(
                "direction must be 'past' or 'future', got '{other}'"
            ))
            .into())
        }
    };

    let limit = query.limit.unwrap_or(DEFAULT_TIMELINE_LIMIT);
    if !(1..=MAX_TIMELINE_LIMIT).contains(&limit) {
        return Err(SkyopsError::Validation(format!(
            "limit must be between 1 and {MAX_TIMELINE_LIMIT}"
        ))
        .into());
    }

    let timezone = query.timezone.as_deref().unwrap_or("UTC");
    let data = state
        .missions
        .timeline(
            owner,
            query.client_id,
            query.pilot_id,
            direction,
            limit,
            timezone,
        )
        .await?;
    let count = data.len();
    Ok(Json(TimelineResponse { data, count }))
}

pub async fn monthly_chart(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Query(query): Query<ScopeQuery>,
) -> Json<MonthlyMissionChart> {
    let year = query.year.unwrap_or_else(current_year);
    Json(
        state
            .missions
            .missions_by_month(owner, query.client_id, query.pilot_id, year)
            .await,
    )
}

pub async fn result_chart(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Query(query): Query<ScopeQuery>,
) -> Json<ResultDistribution> {
    let year = query.year.unwrap_or_else(current_year);
    Json(
        state
            .missions
            .result_distribution(owner, query.client_id, query.pilot_id, year)
            .await,
    )
}
