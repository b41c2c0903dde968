#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by the statistics engine.
//!
//! A [`StatsSnapshot`] is recomputed from scratch on every request and
//! serialized to JSON with exactly four fields: `total`,
//! `countsByCategory`, `hotZones`, and `trend`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use theft_map_incident_models::IncidentCategory;

/// Per-category tallies, keyed in enumeration order.
pub type CategoryCounts = BTreeMap<IncidentCategory, u64>;

/// A cluster of nearby incidents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotZone {
    /// Running-mean latitude of every assigned incident.
    pub lat: f64,
    /// Running-mean longitude of every assigned incident.
    pub lng: f64,
    /// Number of incidents assigned to the zone.
    pub count: u64,
    /// Clustering threshold the zone was formed with, in degrees.
    pub radius: f64,
}

/// Incident count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    /// `YYYY-MM`.
    pub period_key: String,
    /// Number of incidents in the month.
    pub count: u64,
}

/// Combined statistics over one record snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of records in the snapshot.
    pub total: u64,
    /// Count for every category, zero-filled.
    pub counts_by_category: CategoryCounts,
    /// Up to ten largest hot zones, largest first.
    pub hot_zones: Vec<HotZone>,
    /// Monthly counts in chronological order.
    pub trend: Vec<TrendBucket>,
}
