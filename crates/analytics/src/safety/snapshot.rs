use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use skyops_common::error::SkyopsResult;
use skyops_db::kpi::models::{KpiDefinition, KpiRecord};
use skyops_db::kpi::repositories::KpiRepository;

use super::{Area, SafetyAnalytics, CODE_FAILED, CODE_OK};
use crate::period::percent_1dp;
use crate::tier::SafetyTier;

/// One indicator of the current measurement period, joined to its
/// definition and carrying both the raw status text and the normalized
/// tier.
#[derive(Debug, Clone, Serialize)]
pub struct Indicator {
    pub kpi_code: String,
    pub kpi_name: String,
    pub kpi_type: String,
    pub measurement_unit: String,
    pub actual_value: f64,
    pub target_value: f64,
    pub status: String,
    pub tier: SafetyTier,
}

/// The KPI/SPI snapshot envelope for the most recent measurement period.
/// `code = 1` covers both data and typed no-data; `code = 0` is a store
/// fault with zeroed metric fields.
#[derive(Debug, Clone, Serialize)]
pub struct SafetySnapshot {
    pub code: u8,
    pub message: String,
    pub period: String,
    pub safety_index: f64,
    pub indexes: BTreeMap<Area, f64>,
    pub data: BTreeMap<Area, Vec<Indicator>>,
}

impl SafetySnapshot {
    fn no_data() -> Self {
        Self {
            code: CODE_OK,
            message: "no safety records available".to_owned(),
            period: String::new(),
            safety_index: 0.0,
            indexes: BTreeMap::new(),
            data: BTreeMap::new(),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            code: CODE_FAILED,
            message,
            period: String::new(),
            safety_index: 0.0,
            indexes: BTreeMap::new(),
            data: BTreeMap::new(),
        }
    }
}

impl<K: KpiRepository> SafetyAnalytics<K> {
    /// Weighted safety scoring of the most recent measurement period:
    /// one deduplicated indicator per definition, grouped by area, with
    /// per-area indexes and an overall Safety Index.
    pub async fn snapshot(&self, owner_id: i64) -> SafetySnapshot {
        match self.snapshot_inner(owner_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(owner_id, error = %e, "safety snapshot failed");
                SafetySnapshot::failed(e.to_string())
            }
        }
    }

    async fn snapshot_inner(&self, owner_id: i64) -> SkyopsResult<SafetySnapshot> {
        let Some(period) = self.kpis().latest_measurement_date(owner_id).await? else {
            return Ok(SafetySnapshot::no_data());
        };

        let records = self.kpis().list_for_date(owner_id, period).await?;
        let records = dedup_latest_revision(records);

        let definition_ids: Vec<i64> = records.iter().map(|r| r.definition_id).collect();
        let definitions: HashMap<i64, KpiDefinition> = self
            .kpis()
            .list_definitions_by_ids(&definition_ids)
            .await?
            .into_iter()
            .map(|d| (d.definition_id, d))
            .collect();

        let mut indicators: Vec<(Area, Indicator)> = records
            .into_iter()
            .map(|r| {
                let definition = definitions.get(&r.definition_id);
                let area = Area::new(
                    definition
                        .and_then(|d| d.kpi_category.as_deref())
                        .unwrap_or(""),
                );
                let status = r.status.unwrap_or_default();
                let indicator = Indicator {
                    kpi_code: definition.map(|d| d.kpi_code.clone()).unwrap_or_default(),
                    kpi_name: definition.map(|d| d.kpi_name.clone()).unwrap_or_default(),
                    kpi_type: definition
                        .and_then(|d| d.kpi_type.clone())
                        .unwrap_or_default(),
                    measurement_unit: definition
                        .and_then(|d| d.measurement_unit.clone())
                        .unwrap_or_default(),
                    actual_value: r.actual_value.unwrap_or(0.0),
                    target_value: r.target_value.unwrap_or(0.0),
                    tier: SafetyTier::normalize(&status),
                    status,
                };
                (area, indicator)
            })
            .collect();

        // Area priority first, then indicator type descending
        indicators.sort_by(|a, b| {
            (a.0.priority(), Reverse(&a.1.kpi_type)).cmp(&(b.0.priority(), Reverse(&b.1.kpi_type)))
        });

        let safety_index = weighted_index(indicators.iter().map(|(_, i)| i.tier));

        let mut data: BTreeMap<Area, Vec<Indicator>> = BTreeMap::new();
        for (area, indicator) in indicators {
            data.entry(area).or_default().push(indicator);
        }

        // An area only appears with at least one indicator, so the
        // per-area division is never by zero
        let indexes = data
            .iter()
            .map(|(area, indicators)| {
                (
                    area.clone(),
                    weighted_index(indicators.iter().map(|i| i.tier)),
                )
            })
            .collect();

        Ok(SafetySnapshot {
            code: CODE_OK,
            message: "ok".to_owned(),
            period: period.format("%Y-%m-%d").to_string(),
            safety_index,
            indexes,
            data,
        })
    }
}

/// Same-day revisions: keep the record with the latest `created_at` per
/// definition.
fn dedup_latest_revision(records: Vec<KpiRecord>) -> Vec<KpiRecord> {
    let mut latest: HashMap<i64, KpiRecord> = HashMap::new();
    for record in records {
        match latest.get(&record.definition_id) {
            Some(existing) if existing.created_at >= record.created_at => {}
            _ => {
                latest.insert(record.definition_id, record);
            }
        }
    }
    let mut records: Vec<KpiRecord> = latest.into_values().collect();
    records.sort_by_key(|r| r.definition_id);
    records
}

/// `sum(weights) / count` as a one-decimal percentage.
fn weighted_index(tiers: impl Iterator<Item = SafetyTier>) -> f64 {
    let mut total = 0usize;
    let mut score = 0.0;
    for tier in tiers {
        total += 1;
        score += tier.weight();
    }
    if total == 0 {
        return 0.0;
    }
    percent_1dp(score / total as f64)
}
