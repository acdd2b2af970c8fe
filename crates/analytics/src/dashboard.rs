use serde::Serialize;
use skyops_common::error::SkyopsResult;
use skyops_db::missions::repositories::{MissionRepository, PlanningRepository};

use crate::missions::{
    MissionAnalytics, MissionListItem, MissionTotals, MonthlyMissionChart, ResultDistribution,
    TimelineDirection, ALL,
};

/// User profile whose dashboard carries a personal totals card.
pub const PIC_PROFILE: &str = "PIC";

/// How many rows the recent/upcoming timeline cards show.
const TIMELINE_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub owner_id: i64,
    pub user_id: i64,
    pub profile: String,
    pub year: i32,
    pub timezone: String,
}

/// One composite response per dashboard request.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// `None` means not applicable (non-pilot profile), which is
    /// distinct from a pilot with zero missions.
    pub pilot_totals: Option<MissionTotals>,
    pub totals: MissionTotals,
    pub recent_missions: Vec<MissionListItem>,
    pub upcoming_missions: Vec<MissionListItem>,
    pub missions_by_month: MonthlyMissionChart,
    pub result_distribution: ResultDistribution,
}

/// Fan out the six dashboard queries concurrently and join them into
/// one summary. `tokio::join!` rather than `try_join!`: the branches
/// are independent reads and no branch may cancel a sibling; loud
/// branches surface their error only after every branch has finished.
pub async fn dashboard<M, P>(
    missions: &MissionAnalytics<M, P>,
    req: &DashboardRequest,
) -> SkyopsResult<DashboardSummary>
where
    M: MissionRepository,
    P: PlanningRepository,
{
    let pilot_id = if req.profile == PIC_PROFILE {
        req.user_id
    } else {
        ALL
    };

    let (pilot_totals, totals, recent, upcoming, by_month, results) = tokio::join!(
        async {
            if req.profile == PIC_PROFILE {
                missions
                    .totals(req.owner_id, ALL, req.user_id, req.year)
                    .await
                    .map(Some)
            } else {
                Ok(None)
            }
        },
        missions.totals(req.owner_id, ALL, pilot_id, req.year),
        missions.timeline(
            req.owner_id,
            ALL,
            pilot_id,
            TimelineDirection::Past,
            TIMELINE_LIMIT,
            &req.timezone,
        ),
        missions.timeline(
            req.owner_id,
            ALL,
            pilot_id,
            TimelineDirection::Future,
            TIMELINE_LIMIT,
            &req.timezone,
        ),
        missions.missions_by_month(req.owner_id, ALL, pilot_id, req.year),
        missions.result_distribution(req.owner_id, ALL, pilot_id, req.year),
    );

    Ok(DashboardSummary {
        pilot_totals: pilot_totals?,
        totals: totals?,
        recent_missions: recent?,
        upcoming_missions: upcoming?,
        missions_by_month: by_month,
        result_distribution: results,
    })
}
