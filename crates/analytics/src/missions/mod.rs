mod charts;
mod timeline;
mod totals;

pub use charts::{ChartSeries, MonthlyMissionChart, ResultDistribution};
pub use timeline::{MissionListItem, TimelineDirection};
pub use totals::MissionTotals;

use std::collections::HashMap;

use skyops_common::error::SkyopsResult;
use skyops_db::missions::models::{Mission, Planning};
use skyops_db::missions::repositories::{MissionRepository, PlanningRepository};

use crate::period::year_bounds;

/// Client/pilot sentinel meaning "no filter".
pub const ALL: i64 = 0;

/// Mission aggregation over the mission and planning repositories.
///
/// Client scoping is a two-phase fetch by construction: the planning id
/// set is unknown until the mission fetch resolves, so the client filter
/// can only run in-process after the second round trip.
#[derive(Clone)]
pub struct MissionAnalytics<M, P> {
    missions: M,
    plannings: P,
}

impl<M: MissionRepository, P: PlanningRepository> MissionAnalytics<M, P> {
    pub fn new(missions: M, plannings: P) -> Self {
        Self { missions, plannings }
    }

    pub(crate) fn missions(&self) -> &M {
        &self.missions
    }

    /// Phase two of the mission→planning pipeline: resolve the planning
    /// rows referenced by a mission set into a lookup map.
    pub(crate) async fn resolve_plannings(
        &self,
        owner_id: i64,
        missions: &[Mission],
    ) -> SkyopsResult<HashMap<i64, Planning>> {
        let mut ids: Vec<i64> = missions.iter().filter_map(|m| m.planning_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = self.plannings.list_by_ids(owner_id, &ids).await?;
        Ok(rows.into_iter().map(|p| (p.planning_id, p)).collect())
    }

    /// Year-scoped mission fetch with the client filter applied after
    /// planning resolution. Shared by the totals and chart builders so
    /// the filters behave identically.
    pub(crate) async fn missions_for_year(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        year: i32,
    ) -> SkyopsResult<(Vec<Mission>, HashMap<i64, Planning>)> {
        let (from, to) = year_bounds(year)?;
        let missions = self
            .missions
            .list_for_period(owner_id, from, to, pilot_filter(pilot_id))
            .await?;
        let plannings = self.resolve_plannings(owner_id, &missions).await?;
        let missions = filter_by_client(missions, &plannings, client_id);
        Ok((missions, plannings))
    }
}

pub(crate) fn pilot_filter(pilot_id: i64) -> Option<i64> {
    (pilot_id != ALL).then_some(pilot_id)
}

/// Drop missions whose resolved planning does not point at the client.
/// A mission without a planning row never matches a concrete client.
pub(crate) fn filter_by_client(
    missions: Vec<Mission>,
    plannings: &HashMap<i64, Planning>,
    client_id: i64,
) -> Vec<Mission> {
    if client_id == ALL {
        return missions;
    }
    missions
        .into_iter()
        .filter(|m| {
            m.planning_id
                .and_then(|id| plannings.get(&id))
                .is_some_and(|p| p.client_id == Some(client_id))
        })
        .collect()
}
