use std::collections::BTreeMap;

use serde::Serialize;
use skyops_common::error::SkyopsResult;
use skyops_db::kpi::repositories::KpiRepository;

use super::{SafetyAnalytics, CODE_FAILED, CODE_OK};
use crate::period::{month_key, percent_1dp};
use crate::tier::SafetyTier;

/// Number of trailing month buckets reported.
const TREND_WINDOW_MONTHS: usize = 12;

/// Safety Health Index series: the weighted pass rate per calendar
/// month over all of the owner's KPI/SPI records.
#[derive(Debug, Clone, Serialize)]
pub struct ShiTrend {
    pub code: u8,
    pub message: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ShiTrend {
    fn no_data() -> Self {
        Self {
            code: CODE_OK,
            message: "no safety records available".to_owned(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            code: CODE_FAILED,
            message,
            labels: Vec::new(),
            values: Vec::new(),
        }
    }
}

#[derive(Default)]
struct TierCounts {
    green: usize,
    yellow: usize,
    total: usize,
}

impl<K: KpiRepository> SafetyAnalytics<K> {
    /// SHI trend over the last twelve month buckets, oldest first. An
    /// empty record set is a typed no-data outcome, distinct from an
    /// all-zero series.
    pub async fn shi_trend(&self, owner_id: i64) -> ShiTrend {
        match self.shi_trend_inner(owner_id).await {
            Ok(trend) => trend,
            Err(e) => {
                tracing::warn!(owner_id, error = %e, "shi trend failed");
                ShiTrend::failed(e.to_string())
            }
        }
    }

    async fn shi_trend_inner(&self, owner_id: i64) -> SkyopsResult<ShiTrend> {
        let records = self.kpis().list_ordered(owner_id).await?;
        if records.is_empty() {
            return Ok(ShiTrend::no_data());
        }

        let mut buckets: BTreeMap<String, TierCounts> = BTreeMap::new();
        for record in &records {
            let counts = buckets
                .entry(month_key(record.measurement_date))
                .or_default();
            match SafetyTier::normalize(record.status.as_deref().unwrap_or("")) {
                SafetyTier::Green => counts.green += 1,
                SafetyTier::Yellow => counts.yellow += 1,
                SafetyTier::Red => {}
            }
            counts.total += 1;
        }

        let skip = buckets.len().saturating_sub(TREND_WINDOW_MONTHS);
        let (labels, values) = buckets
            .into_iter()
            .skip(skip)
            .map(|(label, counts)| {
                let score =
                    (counts.green as f64 + counts.yellow as f64 * 0.5) / counts.total as f64;
                (label, percent_1dp(score))
            })
            .unzip();

        Ok(ShiTrend {
            code: CODE_OK,
            message: "ok".to_owned(),
            labels,
            values,
        })
    }
}
