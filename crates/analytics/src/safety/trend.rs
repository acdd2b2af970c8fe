use std::collections::BTreeMap;

use serde::Serialize;
use skyops_common::error::{SkyopsError, SkyopsResult};
use skyops_db::kpi::repositories::KpiRepository;

use super::{SafetyAnalytics, CODE_FAILED, CODE_OK};
use crate::period::{month_key, round_2dp};

/// Trend window: up to this many of the earliest records feed the series.
const TREND_RECORD_LIMIT: i64 = 12;

/// Target reported when no record in the window ever carried one.
const DEFAULT_TARGET: f64 = 100.0;

/// Monthly averages for one named indicator, with the carried-forward
/// target.
#[derive(Debug, Clone, Serialize)]
pub struct KpiTrend {
    pub code: u8,
    pub message: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub target: f64,
}

impl KpiTrend {
    fn failed(message: String) -> Self {
        Self {
            code: CODE_FAILED,
            message,
            labels: Vec::new(),
            values: Vec::new(),
            target: 0.0,
        }
    }
}

impl<K: KpiRepository> SafetyAnalytics<K> {
    /// Historical trend for one indicator, resolved by exact name.
    /// Values are per-month means of `actual_value`; the target is the
    /// last one seen across the window, not an average. Definition names
    /// are not unique upstream and the first match wins.
    pub async fn trend(&self, owner_id: i64, indicator_name: &str) -> KpiTrend {
        match self.trend_inner(owner_id, indicator_name).await {
            Ok(trend) => trend,
            Err(e) => {
                tracing::warn!(owner_id, indicator_name, error = %e, "kpi trend failed");
                KpiTrend::failed(e.to_string())
            }
        }
    }

    async fn trend_inner(&self, owner_id: i64, indicator_name: &str) -> SkyopsResult<KpiTrend> {
        let definition = self
            .kpis()
            .find_definition_by_name(indicator_name)
            .await?
            .ok_or_else(|| SkyopsError::NotFound(format!("indicator: {indicator_name}")))?;

        let records = self
            .kpis()
            .list_earliest_for_definition(owner_id, definition.definition_id, TREND_RECORD_LIMIT)
            .await?;

        let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut target = None;
        for record in &records {
            buckets
                .entry(month_key(record.measurement_date))
                .or_default()
                .push(record.actual_value.unwrap_or(0.0));
            if let Some(t) = record.target_value {
                target = Some(t);
            }
        }

        let (labels, values) = buckets
            .into_iter()
            .map(|(label, values)| {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (label, round_2dp(mean))
            })
            .unzip();

        Ok(KpiTrend {
            code: CODE_OK,
            message: "ok".to_owned(),
            labels,
            values,
            target: target.unwrap_or(DEFAULT_TARGET),
        })
    }
}
