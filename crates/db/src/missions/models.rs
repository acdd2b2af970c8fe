use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flight record as returned by the store, with its joined reference
/// data flattened. Every join is optional: a mission may not yet have a
/// result, a drone assignment, or a planning link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub owner_id: i64,
    pub pilot_user_id: Option<i64>,
    pub tool_id: Option<i64>,
    pub planning_id: Option<i64>,
    pub status_id: Option<i64>,
    pub actual_start: DateTime<Utc>,
    /// Flown time in minutes.
    pub flight_duration: Option<i32>,
    /// Flown distance in meters.
    pub distance_flown: Option<f64>,
    pub drone_code: Option<String>,
    pub mission_type: Option<String>,
    pub mission_result: Option<String>,
    pub status_code: Option<String>,
    pub pilot_name: Option<String>,
}

/// Planning row linking a mission to a client. A mission has at most
/// one planning record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planning {
    pub planning_id: i64,
    pub owner_id: i64,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
}
