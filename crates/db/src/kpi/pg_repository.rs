use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::kpi::models::{KpiDefinition, KpiRecord};
use crate::kpi::repositories::KpiRepository;
use skyops_common::error::{SkyopsError, SkyopsResult};

const RECORD_SELECT: &str = "select id as kpi_id, owner_id, definition_id, measurement_date, \
     actual_value::float8 as actual_value, target_value::float8 as target_value, \
     status, created_at \
     from kpi_records";

const DEFINITION_SELECT: &str = "select id as definition_id, kpi_code, kpi_name, kpi_type, \
     kpi_category, measurement_unit \
     from kpi_definitions";

#[derive(Clone)]
pub struct PgKpiRepository {
    pool: PgPool,
}

impl PgKpiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KpiRepository for PgKpiRepository {
    async fn latest_measurement_date(&self, owner_id: i64) -> SkyopsResult<Option<NaiveDate>> {
        let row = sqlx::query(
            "select max(measurement_date) as measurement_date
             from kpi_records where owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(row.get("measurement_date"))
    }

    async fn list_for_date(&self, owner_id: i64, date: NaiveDate) -> SkyopsResult<Vec<KpiRecord>> {
        let rows = sqlx::query(&format!(
            "{RECORD_SELECT} where owner_id = $1 and measurement_date = $2
             order by created_at asc"
        ))
        .bind(owner_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_record_row).collect())
    }

    async fn list_definitions_by_ids(&self, ids: &[i64]) -> SkyopsResult<Vec<KpiDefinition>> {
        let rows = sqlx::query(&format!("{DEFINITION_SELECT} where id = any($1)"))
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_definition_row).collect())
    }

    async fn find_definition_by_name(&self, name: &str) -> SkyopsResult<Option<KpiDefinition>> {
        // Names are not unique; first match by id preserves the documented
        // upstream tie-break.
        let row = sqlx::query(&format!(
            "{DEFINITION_SELECT} where kpi_name = $1 order by id asc limit 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(row.map(|r| map_definition_row(&r)))
    }

    async fn list_earliest_for_definition(
        &self,
        owner_id: i64,
        definition_id: i64,
        limit: i64,
    ) -> SkyopsResult<Vec<KpiRecord>> {
        let rows = sqlx::query(&format!(
            "{RECORD_SELECT} where owner_id = $1 and definition_id = $2
             order by measurement_date asc, created_at asc
             limit $3"
        ))
        .bind(owner_id)
        .bind(definition_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_record_row).collect())
    }

    async fn list_ordered(&self, owner_id: i64) -> SkyopsResult<Vec<KpiRecord>> {
        let rows = sqlx::query(&format!(
            "{RECORD_SELECT} where owner_id = $1
             order by measurement_date asc, created_at asc"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_record_row).collect())
    }
}

fn map_record_row(row: &PgRow) -> KpiRecord {
    KpiRecord {
        kpi_id: row.get("kpi_id"),
        owner_id: row.get("owner_id"),
        definition_id: row.get("definition_id"),
        measurement_date: row.get("measurement_date"),
        actual_value: row.get("actual_value"),
        target_value: row.get("target_value"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

fn map_definition_row(row: &PgRow) -> KpiDefinition {
    KpiDefinition {
        definition_id: row.get("definition_id"),
        kpi_code: row.get("kpi_code"),
        kpi_name: row.get("kpi_name"),
        kpi_type: row.get("kpi_type"),
        kpi_category: row.get("kpi_category"),
        measurement_unit: row.get("measurement_unit"),
    }
}
