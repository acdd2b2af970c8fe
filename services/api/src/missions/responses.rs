use serde::Serialize;
use skyops_analytics::missions::{MissionListItem, MissionTotals};

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub data: MissionTotals,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub data: Vec<MissionListItem>,
    pub count: usize,
}
