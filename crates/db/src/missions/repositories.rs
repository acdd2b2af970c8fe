use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::missions::models::{Mission, Planning};
use skyops_common::error::SkyopsResult;

/// Read-only mission queries with reference joins expanded.
///
/// `pilot_id = None` means no pilot filter; callers translate the `0`
/// sentinel before reaching the repository.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Missions with `actual_start` inside `[from, to)`, ascending.
    async fn list_for_period(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        pilot_id: Option<i64>,
    ) -> SkyopsResult<Vec<Mission>>;

    /// Missions with `actual_start <= cutoff`, most recent first.
    async fn list_before(
        &self,
        owner_id: i64,
        cutoff: DateTime<Utc>,
        pilot_id: Option<i64>,
        limit: i64,
    ) -> SkyopsResult<Vec<Mission>>;

    /// Missions with `actual_start > cutoff`, soonest first.
    async fn list_after(
        &self,
        owner_id: i64,
        cutoff: DateTime<Utc>,
        pilot_id: Option<i64>,
        limit: i64,
    ) -> SkyopsResult<Vec<Mission>>;
}

#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// Planning rows for the given ids, with the client name expanded.
    async fn list_by_ids(&self, owner_id: i64, planning_ids: &[i64])
        -> SkyopsResult<Vec<Planning>>;
}
