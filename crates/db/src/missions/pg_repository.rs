use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, QueryBuilder, Row};

use crate::missions::models::{Mission, Planning};
use crate::missions::repositories::{MissionRepository, PlanningRepository};
use skyops_common::error::{SkyopsError, SkyopsResult};

const MISSION_SELECT: &str = "select m.id, m.owner_id, m.pilot_user_id, m.tool_id, \
     m.planning_id, m.status_id, m.actual_start, m.flight_duration, \
     m.distance_flown::float8 as distance_flown, \
     d.code as drone_code, \
     mt.description as mission_type, \
     mr.description as mission_result, \
     sc.code as status_code, \
     u.name as pilot_name \
     from missions m \
     left join drones d on d.id = m.tool_id \
     left join mission_types mt on mt.id = m.mission_type_id \
     left join mission_results mr on mr.id = m.result_id \
     left join status_codes sc on sc.id = m.status_id \
     left join users u on u.id = m.pilot_user_id \
     where m.owner_id = ";

#[derive(Clone)]
pub struct PgMissionRepository {
    pool: PgPool,
}

impl PgMissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MissionRepository for PgMissionRepository {
    async fn list_for_period(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        pilot_id: Option<i64>,
    ) -> SkyopsResult<Vec<Mission>> {
        let mut qb = QueryBuilder::new(MISSION_SELECT);
        qb.push_bind(owner_id);
        qb.push(" and m.actual_start >= ").push_bind(from);
        qb.push(" and m.actual_start < ").push_bind(to);
        if let Some(pilot) = pilot_id {
            qb.push(" and m.pilot_user_id = ").push_bind(pilot);
        }
        qb.push(" order by m.actual_start asc");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_mission_row).collect())
    }

    async fn list_before(
        &self,
        owner_id: i64,
        cutoff: DateTime<Utc>,
        pilot_id: Option<i64>,
        limit: i64,
    ) -> SkyopsResult<Vec<Mission>> {
        let mut qb = QueryBuilder::new(MISSION_SELECT);
        qb.push_bind(owner_id);
        qb.push(" and m.actual_start <= ").push_bind(cutoff);
        if let Some(pilot) = pilot_id {
            qb.push(" and m.pilot_user_id = ").push_bind(pilot);
        }
        qb.push(" order by m.actual_start desc");
        qb.push(" limit ").push_bind(limit);

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_mission_row).collect())
    }

    async fn list_after(
        &self,
        owner_id: i64,
        cutoff: DateTime<Utc>,
        pilot_id: Option<i64>,
        limit: i64,
    ) -> SkyopsResult<Vec<Mission>> {
        let mut qb = QueryBuilder::new(MISSION_SELECT);
        qb.push_bind(owner_id);
        qb.push(" and m.actual_start > ").push_bind(cutoff);
        if let Some(pilot) = pilot_id {
            qb.push(" and m.pilot_user_id = ").push_bind(pilot);
        }
        qb.push(" order by m.actual_start asc");
        qb.push(" limit ").push_bind(limit);

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_mission_row).collect())
    }
}

#[derive(Clone)]
pub struct PgPlanningRepository {
    pool: PgPool,
}

impl PgPlanningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanningRepository for PgPlanningRepository {
    async fn list_by_ids(
        &self,
        owner_id: i64,
        planning_ids: &[i64],
    ) -> SkyopsResult<Vec<Planning>> {
        let rows = sqlx::query(
            "select p.id as planning_id, p.owner_id, p.client_id, c.name as client_name
             from plannings p
             left join clients c on c.id = p.client_id
             where p.owner_id = $1 and p.id = any($2)",
        )
        .bind(owner_id)
        .bind(planning_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|r| Planning {
                planning_id: r.get("planning_id"),
                owner_id: r.get("owner_id"),
                client_id: r.get("client_id"),
                client_name: r.get("client_name"),
            })
            .collect())
    }
}

fn map_mission_row(row: &PgRow) -> Mission {
    Mission {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        pilot_user_id: row.get("pilot_user_id"),
        tool_id: row.get("tool_id"),
        planning_id: row.get("planning_id"),
        status_id: row.get("status_id"),
        actual_start: row.get("actual_start"),
        flight_duration: row.get("flight_duration"),
        distance_flown: row.get("distance_flown"),
        drone_code: row.get("drone_code"),
        mission_type: row.get("mission_type"),
        mission_result: row.get("mission_result"),
        status_code: row.get("status_code"),
        pilot_name: row.get("pilot_name"),
    }
}
