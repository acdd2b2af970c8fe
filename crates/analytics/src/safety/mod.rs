mod area;
mod shi;
mod snapshot;
mod trend;

pub use area::Area;
pub use shi::ShiTrend;
pub use snapshot::{Indicator, SafetySnapshot};
pub use trend::KpiTrend;

use skyops_db::kpi::repositories::KpiRepository;

/// Envelope code for success and for typed no-data outcomes.
pub const CODE_OK: u8 = 1;
/// Envelope code for store faults and unknown indicators.
pub const CODE_FAILED: u8 = 0;

/// Safety scoring over the KPI/SPI record store. Every public method is
/// fail-soft: the envelope's `code`/`message` pair carries the outcome
/// and callers never see an `Err`.
#[derive(Clone)]
pub struct SafetyAnalytics<K> {
    kpis: K,
}

impl<K: KpiRepository> SafetyAnalytics<K> {
    pub fn new(kpis: K) -> Self {
        Self { kpis }
    }

    pub(crate) fn kpis(&self) -> &K {
        &self.kpis
    }
}
