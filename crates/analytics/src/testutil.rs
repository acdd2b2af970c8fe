//! In-memory repository fakes and fixture builders shared by the
//! component tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use skyops_common::error::{SkyopsError, SkyopsResult};
use skyops_db::kpi::models::{KpiDefinition, KpiRecord};
use skyops_db::kpi::repositories::KpiRepository;
use skyops_db::missions::models::{Mission, Planning};
use skyops_db::missions::repositories::{MissionRepository, PlanningRepository};

use crate::missions::MissionAnalytics;
use crate::safety::SafetyAnalytics;

// ── mission fixtures ───────────────────────────────────────────────

pub struct MockMissionRepo {
    missions: Vec<Mission>,
    fail: bool,
}

#[async_trait]
impl MissionRepository for MockMissionRepo {
    async fn list_for_period(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        pilot_id: Option<i64>,
    ) -> SkyopsResult<Vec<Mission>> {
        if self.fail {
            return Err(SkyopsError::Database("mission store unavailable".into()));
        }
        let mut out: Vec<Mission> = self
            .missions
            .iter()
            .filter(|m| m.owner_id == owner_id)
            .filter(|m| m.actual_start >= from && m.actual_start < to)
            .filter(|m| pilot_id.is_none() || m.pilot_user_id == pilot_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| m.actual_start);
        Ok(out)
    }

    async fn list_before(
        &self,
        owner_id: i64,
        cutoff: DateTime<Utc>,
        pilot_id: Option<i64>,
        limit: i64,
    ) -> SkyopsResult<Vec<Mission>> {
        if self.fail {
            return Err(SkyopsError::Database("mission store unavailable".into()));
        }
        let mut out: Vec<Mission> = self
            .missions
            .iter()
            .filter(|m| m.owner_id == owner_id && m.actual_start <= cutoff)
            .filter(|m| pilot_id.is_none() || m.pilot_user_id == pilot_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| std::cmp::Reverse(m.actual_start));
        out.truncate(limit as usize);
        Ok(out)
    }

    async fn list_after(
        &self,
        owner_id: i64,
        cutoff: DateTime<Utc>,
        pilot_id: Option<i64>,
        limit: i64,
    ) -> SkyopsResult<Vec<Mission>> {
        if self.fail {
            return Err(SkyopsError::Database("mission store unavailable".into()));
        }
        let mut out: Vec<Mission> = self
            .missions
            .iter()
            .filter(|m| m.owner_id == owner_id && m.actual_start > cutoff)
            .filter(|m| pilot_id.is_none() || m.pilot_user_id == pilot_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| m.actual_start);
        out.truncate(limit as usize);
        Ok(out)
    }
}

pub struct MockPlanningRepo {
    plannings: Vec<Planning>,
    fail: bool,
}

#[async_trait]
impl PlanningRepository for MockPlanningRepo {
    async fn list_by_ids(
        &self,
        owner_id: i64,
        planning_ids: &[i64],
    ) -> SkyopsResult<Vec<Planning>> {
        if self.fail {
            return Err(SkyopsError::Database("planning store unavailable".into()));
        }
        Ok(self
            .plannings
            .iter()
            .filter(|p| p.owner_id == owner_id && planning_ids.contains(&p.planning_id))
            .cloned()
            .collect())
    }
}

pub fn analytics(
    missions: Vec<Mission>,
    plannings: Vec<Planning>,
) -> MissionAnalytics<MockMissionRepo, MockPlanningRepo> {
    MissionAnalytics::new(
        MockMissionRepo { missions, fail: false },
        MockPlanningRepo { plannings, fail: false },
    )
}

pub fn failing_analytics() -> MissionAnalytics<MockMissionRepo, MockPlanningRepo> {
    MissionAnalytics::new(
        MockMissionRepo { missions: Vec::new(), fail: true },
        MockPlanningRepo { plannings: Vec::new(), fail: true },
    )
}

pub fn mission(id: i64, start: impl AsRef<str>) -> Mission {
    Mission {
        id,
        owner_id: 1,
        pilot_user_id: None,
        tool_id: None,
        planning_id: None,
        status_id: None,
        actual_start: parse_ts(start.as_ref()),
        flight_duration: None,
        distance_flown: None,
        drone_code: None,
        mission_type: None,
        mission_result: None,
        status_code: None,
        pilot_name: None,
    }
}

/// RFC 3339 timestamp `days` back from now; negative values land in the
/// future.
pub fn past_ts(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

pub fn planning(id: i64, client_id: Option<i64>, client_name: &str) -> Planning {
    Planning {
        planning_id: id,
        owner_id: 1,
        client_id,
        client_name: (!client_name.is_empty()).then(|| client_name.to_owned()),
    }
}

/// Chainable field overrides on the mission fixture.
pub trait MissionExt {
    fn duration(self, minutes: i32) -> Mission;
    fn status(self, code: &str) -> Mission;
    fn drone(self, tool_id: i64, code: &str) -> Mission;
    fn planning(self, planning_id: i64) -> Mission;
    fn pilot(self, user_id: i64, name: &str) -> Mission;
    fn result(self, description: &str) -> Mission;
}

impl MissionExt for Mission {
    fn duration(mut self, minutes: i32) -> Mission {
        self.flight_duration = Some(minutes);
        self
    }

    fn status(mut self, code: &str) -> Mission {
        self.status_code = Some(code.to_owned());
        self
    }

    fn drone(mut self, tool_id: i64, code: &str) -> Mission {
        self.tool_id = Some(tool_id);
        self.drone_code = Some(code.to_owned());
        self
    }

    fn planning(mut self, planning_id: i64) -> Mission {
        self.planning_id = Some(planning_id);
        self
    }

    fn pilot(mut self, user_id: i64, name: &str) -> Mission {
        self.pilot_user_id = Some(user_id);
        self.pilot_name = Some(name.to_owned());
        self
    }

    fn result(mut self, description: &str) -> Mission {
        self.mission_result = Some(description.to_owned());
        self
    }
}

// ── safety fixtures ────────────────────────────────────────────────

pub struct MockKpiRepo {
    records: Vec<KpiRecord>,
    definitions: Vec<KpiDefinition>,
    fail: bool,
}

#[async_trait]
impl KpiRepository for MockKpiRepo {
    async fn latest_measurement_date(&self, owner_id: i64) -> SkyopsResult<Option<NaiveDate>> {
        if self.fail {
            return Err(SkyopsError::Database("kpi store unavailable".into()));
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .map(|r| r.measurement_date)
            .max())
    }

    async fn list_for_date(&self, owner_id: i64, date: NaiveDate) -> SkyopsResult<Vec<KpiRecord>> {
        if self.fail {
            return Err(SkyopsError::Database("kpi store unavailable".into()));
        }
        let mut out: Vec<KpiRecord> = self
            .records
            .iter()
            .filter(|r| r.owner_id == owner_id && r.measurement_date == date)
            .cloned()
            .collect();
        out.sort_by_key(|r| r.created_at);
        Ok(out)
    }

    async fn list_definitions_by_ids(&self, ids: &[i64]) -> SkyopsResult<Vec<KpiDefinition>> {
        if self.fail {
            return Err(SkyopsError::Database("kpi store unavailable".into()));
        }
        Ok(self
            .definitions
            .iter()
            .filter(|d| ids.contains(&d.definition_id))
            .cloned()
            .collect())
    }

    async fn find_definition_by_name(&self, name: &str) -> SkyopsResult<Option<KpiDefinition>> {
        if self.fail {
            return Err(SkyopsError::Database("kpi store unavailable".into()));
        }
        Ok(self
            .definitions
            .iter()
            .filter(|d| d.kpi_name == name)
            .min_by_key(|d| d.definition_id)
            .cloned())
    }

    async fn list_earliest_for_definition(
        &self,
        owner_id: i64,
        definition_id: i64,
        limit: i64,
    ) -> SkyopsResult<Vec<KpiRecord>> {
        if self.fail {
            return Err(SkyopsError::Database("kpi store unavailable".into()));
        }
        let mut out: Vec<KpiRecord> = self
            .records
            .iter()
            .filter(|r| r.owner_id == owner_id && r.definition_id == definition_id)
            .cloned()
            .collect();
        out.sort_by_key(|r| (r.measurement_date, r.created_at));
        out.truncate(limit as usize);
        Ok(out)
    }

    async fn list_ordered(&self, owner_id: i64) -> SkyopsResult<Vec<KpiRecord>> {
        if self.fail {
            return Err(SkyopsError::Database("kpi store unavailable".into()));
        }
        let mut out: Vec<KpiRecord> = self
            .records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        out.sort_by_key(|r| (r.measurement_date, r.created_at));
        Ok(out)
    }
}

pub fn safety(
    records: Vec<KpiRecord>,
    definitions: Vec<KpiDefinition>,
) -> SafetyAnalytics<MockKpiRepo> {
    SafetyAnalytics::new(MockKpiRepo {
        records,
        definitions,
        fail: false,
    })
}

pub fn failing_safety() -> SafetyAnalytics<MockKpiRepo> {
    SafetyAnalytics::new(MockKpiRepo {
        records: Vec::new(),
        definitions: Vec::new(),
        fail: true,
    })
}

pub fn record(kpi_id: i64, definition_id: i64, date: &str, status: &str) -> KpiRecord {
    KpiRecord {
        kpi_id,
        owner_id: 1,
        definition_id,
        measurement_date: date.parse().expect("fixture date"),
        actual_value: Some(80.0),
        target_value: Some(100.0),
        status: Some(status.to_owned()),
        // distinct per record so ordering by created_at is well defined
        created_at: Utc.timestamp_opt(kpi_id, 0).unwrap(),
    }
}

pub fn record_at(
    kpi_id: i64,
    definition_id: i64,
    date: &str,
    status: &str,
    created_at: &str,
) -> KpiRecord {
    let mut r = record(kpi_id, definition_id, date, status);
    r.created_at = parse_ts(created_at);
    r
}

pub fn definition(definition_id: i64, name: &str, category: &str) -> KpiDefinition {
    KpiDefinition {
        definition_id,
        kpi_code: format!("IND-{definition_id}"),
        kpi_name: name.to_owned(),
        kpi_type: Some("KPI".to_owned()),
        kpi_category: Some(category.to_owned()),
        measurement_unit: Some("%".to_owned()),
    }
}

/// Chainable field overrides on the KPI fixtures.
pub trait KpiRecordExt {
    fn values(self, actual: Option<f64>, target: Option<f64>) -> KpiRecord;
}

impl KpiRecordExt for KpiRecord {
    fn values(mut self, actual: Option<f64>, target: Option<f64>) -> KpiRecord {
        self.actual_value = actual;
        self.target_value = target;
        self
    }
}

pub trait KpiDefinitionExt {
    fn kpi_type(self, kpi_type: &str) -> KpiDefinition;
}

impl KpiDefinitionExt for KpiDefinition {
    fn kpi_type(mut self, kpi_type: &str) -> KpiDefinition {
        self.kpi_type = Some(kpi_type.to_owned());
        self
    }
}

fn parse_ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("fixture timestamp")
        .with_timezone(&Utc)
}
