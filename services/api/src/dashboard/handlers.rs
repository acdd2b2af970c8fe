use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use skyops_analytics::dashboard::{dashboard, DashboardRequest, DashboardSummary};

use crate::error::ApiError;
use crate::extractors::{OwnerId, UserContext};
use crate::{current_year, AppState};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    pub timezone: Option<String>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    user: UserContext,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let request = DashboardRequest {
        owner_id: owner,
        user_id: user.user_id,
        profile: user.profile,
        year: query.year.unwrap_or_else(current_year),
        timezone: query.timezone.unwrap_or_else(|| "UTC".to_string()),
    };

    let summary = dashboard(&state.missions, &request).await?;
    Ok(Json(summary))
}
