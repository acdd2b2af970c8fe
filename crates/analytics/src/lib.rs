//! Read-only aggregation pipeline behind the operational dashboards.
//!
//! Everything in this crate is a pure read over repository traits: the
//! components fetch a snapshot of the store at request time, derive
//! metrics, and return serializable result shapes. Two error policies
//! coexist and are part of the contract:
//!
//! - fail-loud (mission totals, timeline): store faults propagate as
//!   `SkyopsError`, since silent zeros would corrupt compliance totals;
//! - fail-soft (charts, safety snapshot, trends): store faults collapse
//!   into typed empty/zero results so a broken widget never breaks the
//!   page around it.

pub mod dashboard;
pub mod missions;
pub mod period;
pub mod safety;
pub mod tier;

#[cfg(test)]
pub(crate) mod testutil;
