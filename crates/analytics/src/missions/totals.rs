use std::collections::HashSet;

use serde::Serialize;
use skyops_common::error::SkyopsResult;
use skyops_db::missions::repositories::{MissionRepository, PlanningRepository};

use super::{MissionAnalytics, ALL};

/// Status codes counted as not-yet-flown.
const PLANNED_STATUS_CODES: &[&str] = &["PLANNED", "SCHEDULED"];

/// Label reported when totals are not scoped to one client.
const ALL_CLIENTS: &str = "All Clients";

/// Summary counters for a filtered mission set. Feeds compliance
/// reporting, so the builder is fail-loud.
#[derive(Debug, Clone, Serialize)]
pub struct MissionTotals {
    pub missions: i64,
    pub total_minutes: i64,
    pub total_hours: i64,
    pub total_distance_m: f64,
    pub planned: i64,
    pub distinct_drones: i64,
    pub distinct_clients: i64,
    pub client_name: String,
}

impl MissionTotals {
    fn empty(client_name: &str) -> Self {
        Self {
            missions: 0,
            total_minutes: 0,
            total_hours: 0,
            total_distance_m: 0.0,
            planned: 0,
            distinct_drones: 0,
            distinct_clients: 0,
            client_name: client_name.to_owned(),
        }
    }
}

impl<M: MissionRepository, P: PlanningRepository> MissionAnalytics<M, P> {
    /// Mission totals for one owner and calendar year, optionally scoped
    /// to a client and/or pilot (`0` = all). Zero matching missions is a
    /// zero-filled result, not an error; store faults propagate.
    pub async fn totals(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        year: i32,
    ) -> SkyopsResult<MissionTotals> {
        let (missions, plannings) = self
            .missions_for_year(owner_id, client_id, pilot_id, year)
            .await?;

        // A resolved client with no name stays an empty string; the
        // all-clients label is reserved for the unscoped card
        let client_name = if client_id == ALL {
            ALL_CLIENTS.to_owned()
        } else {
            plannings
                .values()
                .find(|p| p.client_id == Some(client_id))
                .map(|p| p.client_name.clone().unwrap_or_default())
                .unwrap_or_else(|| ALL_CLIENTS.to_owned())
        };

        if missions.is_empty() {
            return Ok(MissionTotals::empty(&client_name));
        }

        let total_minutes: i64 = missions
            .iter()
            .map(|m| i64::from(m.flight_duration.unwrap_or(0)))
            .sum();
        let total_distance_m: f64 = missions.iter().map(|m| m.distance_flown.unwrap_or(0.0)).sum();

        let planned = missions
            .iter()
            .filter(|m| {
                m.status_code
                    .as_deref()
                    .is_some_and(|c| PLANNED_STATUS_CODES.contains(&c))
            })
            .count() as i64;

        let drones: HashSet<i64> = missions.iter().filter_map(|m| m.tool_id).collect();
        let clients: HashSet<i64> = missions
            .iter()
            .filter_map(|m| m.planning_id)
            .filter_map(|id| plannings.get(&id))
            .filter_map(|p| p.client_id)
            .collect();

        Ok(MissionTotals {
            missions: missions.len() as i64,
            total_minutes,
            total_hours: total_minutes / 60,
            total_distance_m,
            planned,
            distinct_drones: drones.len() as i64,
            distinct_clients: clients.len() as i64,
            client_name,
        })
    }
}
