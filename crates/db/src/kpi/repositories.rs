use async_trait::async_trait;
use chrono::NaiveDate;

use crate::kpi::models::{KpiDefinition, KpiRecord};
use skyops_common::error::SkyopsResult;

#[async_trait]
pub trait KpiRepository: Send + Sync {
    /// Most recent measurement date for the owner, if any records exist.
    async fn latest_measurement_date(&self, owner_id: i64) -> SkyopsResult<Option<NaiveDate>>;

    /// All records for one exact measurement date, ordered by `created_at`.
    async fn list_for_date(&self, owner_id: i64, date: NaiveDate) -> SkyopsResult<Vec<KpiRecord>>;

    async fn list_definitions_by_ids(&self, ids: &[i64]) -> SkyopsResult<Vec<KpiDefinition>>;

    /// Exact-name lookup. Names are not unique upstream; the first match
    /// by definition id wins.
    async fn find_definition_by_name(&self, name: &str) -> SkyopsResult<Option<KpiDefinition>>;

    /// Earliest records for one definition, date ascending.
    async fn list_earliest_for_definition(
        &self,
        owner_id: i64,
        definition_id: i64,
        limit: i64,
    ) -> SkyopsResult<Vec<KpiRecord>>;

    /// Every record for the owner, date ascending.
    async fn list_ordered(&self, owner_id: i64) -> SkyopsResult<Vec<KpiRecord>>;
}
