use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One KPI/SPI measurement. Several records may exist for the same
/// `(definition_id, measurement_date)` pair; they are revisions and the
/// latest `created_at` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiRecord {
    pub kpi_id: i64,
    pub owner_id: i64,
    pub definition_id: i64,
    pub measurement_date: NaiveDate,
    pub actual_value: Option<f64>,
    pub target_value: Option<f64>,
    /// Free-text status as entered upstream ("ABOVE TARGET", "Poor", ...).
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Static reference data describing an indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiDefinition {
    pub definition_id: i64,
    pub kpi_code: String,
    pub kpi_name: String,
    pub kpi_type: Option<String>,
    /// Operational area the indicator belongs to (OPERATIONS, SMS, ...).
    pub kpi_category: Option<String>,
    pub measurement_unit: Option<String>,
}
