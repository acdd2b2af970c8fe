use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use skyops_common::error::SkyopsResult;
use skyops_db::missions::repositories::{MissionRepository, PlanningRepository};

use super::{filter_by_client, pilot_filter, MissionAnalytics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineDirection {
    Past,
    Future,
}

/// One row of the "last N" / "next N" mission list, with every joined
/// display field flattened. Unresolved joins render as empty string or
/// zero, never as an error.
#[derive(Debug, Clone, Serialize)]
pub struct MissionListItem {
    pub id: i64,
    /// `actual_start` rendered in the caller's timezone, `YYYY-MM-DD HH:MM`.
    pub start: String,
    pub pilot_name: String,
    pub drone_code: String,
    pub mission_type: String,
    pub mission_result: String,
    pub client_name: String,
    pub flight_duration: i32,
    pub distance_flown: f64,
}

impl<M: MissionRepository, P: PlanningRepository> MissionAnalytics<M, P> {
    /// The mission timeline around now: `Past` returns the most recent
    /// missions first, `Future` the soonest upcoming first. The limit is
    /// applied at the store before the in-process client filter, so a
    /// client-scoped call can return fewer than `limit` rows.
    pub async fn timeline(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        direction: TimelineDirection,
        limit: i64,
        timezone: &str,
    ) -> SkyopsResult<Vec<MissionListItem>> {
        let now = Utc::now();
        let missions = match direction {
            TimelineDirection::Past => {
                self.missions()
                    .list_before(owner_id, now, pilot_filter(pilot_id), limit)
                    .await?
            }
            TimelineDirection::Future => {
                self.missions()
                    .list_after(owner_id, now, pilot_filter(pilot_id), limit)
                    .await?
            }
        };

        let plannings = self.resolve_plannings(owner_id, &missions).await?;
        let missions = filter_by_client(missions, &plannings, client_id);

        // Unparseable zone falls back to UTC; a bad display preference
        // must not fail the whole timeline.
        let tz: Tz = timezone.parse().unwrap_or(Tz::UTC);

        Ok(missions
            .into_iter()
            .map(|m| {
                let client_name = m
                    .planning_id
                    .and_then(|id| plannings.get(&id))
                    .and_then(|p| p.client_name.clone())
                    .unwrap_or_default();

                MissionListItem {
                    id: m.id,
                    start: m
                        .actual_start
                        .with_timezone(&tz)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                    pilot_name: m.pilot_name.unwrap_or_default(),
                    drone_code: m.drone_code.unwrap_or_default(),
                    mission_type: m.mission_type.unwrap_or_default(),
                    mission_result: m.mission_result.unwrap_or_default(),
                    client_name,
                    flight_duration: m.flight_duration.unwrap_or(0),
                    distance_flown: m.distance_flown.unwrap_or(0.0),
                }
            })
            .collect())
    }
}
