use std::collections::BTreeMap;

use serde::Serialize;
use skyops_common::error::SkyopsResult;
use skyops_db::missions::repositories::{MissionRepository, PlanningRepository};

use super::MissionAnalytics;
use crate::period::{month_index, MONTH_LABELS};

/// Fallback label for missions with no result recorded yet.
const UNKNOWN_RESULT: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub name: String,
    /// Twelve counts indexed by calendar month, 0 = January.
    pub data: Vec<i64>,
}

/// Missions-per-month matrix, one series per drone code.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyMissionChart {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl MonthlyMissionChart {
    fn empty() -> Self {
        Self {
            labels: MONTH_LABELS.iter().map(|l| (*l).to_owned()).collect(),
            series: Vec::new(),
        }
    }
}

/// Mission-result frequency distribution as parallel arrays, sorted by
/// descending count.
#[derive(Debug, Clone, Serialize)]
pub struct ResultDistribution {
    pub labels: Vec<String>,
    pub series: Vec<i64>,
}

impl ResultDistribution {
    fn empty() -> Self {
        Self {
            labels: Vec::new(),
            series: Vec::new(),
        }
    }
}

impl<M: MissionRepository, P: PlanningRepository> MissionAnalytics<M, P> {
    /// Mission counts per calendar month per drone. Fail-soft: a store
    /// fault returns the empty chart shape and never an error — a blank
    /// widget beats a broken dashboard.
    pub async fn missions_by_month(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        year: i32,
    ) -> MonthlyMissionChart {
        match self
            .missions_by_month_inner(owner_id, client_id, pilot_id, year)
            .await
        {
            Ok(chart) => chart,
            Err(e) => {
                tracing::warn!(owner_id, year, error = %e, "monthly mission chart failed");
                MonthlyMissionChart::empty()
            }
        }
    }

    async fn missions_by_month_inner(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        year: i32,
    ) -> SkyopsResult<MonthlyMissionChart> {
        let (missions, _plannings) = self
            .missions_for_year(owner_id, client_id, pilot_id, year)
            .await?;

        // Missions without a resolvable drone code are excluded
        let mut by_drone: BTreeMap<String, [i64; 12]> = BTreeMap::new();
        for m in &missions {
            if let Some(code) = &m.drone_code {
                by_drone.entry(code.clone()).or_default()[month_index(m.actual_start)] += 1;
            }
        }

        Ok(MonthlyMissionChart {
            labels: MONTH_LABELS.iter().map(|l| (*l).to_owned()).collect(),
            series: by_drone
                .into_iter()
                .map(|(name, data)| ChartSeries {
                    name,
                    data: data.to_vec(),
                })
                .collect(),
        })
    }

    /// Frequency of mission results, most common first. Fail-soft like
    /// the monthly chart.
    pub async fn result_distribution(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        year: i32,
    ) -> ResultDistribution {
        match self
            .result_distribution_inner(owner_id, client_id, pilot_id, year)
            .await
        {
            Ok(dist) => dist,
            Err(e) => {
                tracing::warn!(owner_id, year, error = %e, "result distribution failed");
                ResultDistribution::empty()
            }
        }
    }

    async fn result_distribution_inner(
        &self,
        owner_id: i64,
        client_id: i64,
        pilot_id: i64,
        year: i32,
    ) -> SkyopsResult<ResultDistribution> {
        let (missions, _plannings) = self
            .missions_for_year(owner_id, client_id, pilot_id, year)
            .await?;

        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for m in &missions {
            let label = m.mission_result.as_deref().unwrap_or(UNKNOWN_RESULT);
            *counts.entry(label.to_owned()).or_insert(0) += 1;
        }

        // Descending count; the BTreeMap source keeps equal counts in a
        // stable label order so identical inputs serialize identically
        let mut groups: Vec<(String, i64)> = counts.into_iter().collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1));

        let (labels, series) = groups.into_iter().unzip();
        Ok(ResultDistribution { labels, series })
    }
}
