#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident statistics engine.
//!
//! Turns one snapshot of incident records into a [`StatsSnapshot`]:
//! per-category counts ([`categories`]), spatial hot zones
//! ([`hot_zones`]), and a monthly trend series ([`trend`]). Every call
//! recomputes everything from scratch; nothing is cached between calls.
//!
//! The three aggregators run over the same borrowed slice, so they always
//! agree on which records exist even if the store is written to while the
//! statistics are being produced.

pub mod categories;
pub mod hot_zones;
pub mod trend;

use theft_map_incident_models::IncidentRecord;
use theft_map_stats_models::StatsSnapshot;
use theft_map_store::{RecordSource, StoreError};

/// Errors that can occur while producing statistics.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The record source could not supply a snapshot.
    #[error("Record source unavailable: {0}")]
    Source(#[from] StoreError),

    /// A record's occurrence date does not parse.
    #[error("Record {id} has an invalid date: {value:?}")]
    InvalidDate {
        /// ID of the offending record.
        id: String,
        /// The stored date value.
        value: String,
    },
}

/// Computes statistics over `records`.
///
/// # Errors
///
/// Returns [`StatsError::InvalidDate`] if any record's date does not
/// parse. No partial snapshot is produced.
pub fn compute_stats(records: &[IncidentRecord]) -> Result<StatsSnapshot, StatsError> {
    let trend = trend::monthly_trend(records)?;
    let counts_by_category = categories::count_by_category(records);
    let hot_zones = hot_zones::hot_zones(records);

    Ok(StatsSnapshot {
        total: records.len() as u64,
        counts_by_category,
        hot_zones,
        trend,
    })
}

/// Fetches one snapshot from `source` and computes statistics over it.
///
/// # Errors
///
/// Returns [`StatsError::Source`] if the snapshot cannot be fetched, or
/// any error from [`compute_stats`].
pub async fn collect_stats<S>(source: &S) -> Result<StatsSnapshot, StatsError>
where
    S: RecordSource + ?Sized,
{
    let records = source.list_all().await?;
    let snapshot = compute_stats(&records)?;

    log::debug!(
        "Computed stats: {} records, {} hot zones, {} months",
        snapshot.total,
        snapshot.hot_zones.len(),
        snapshot.trend.len()
    );

    Ok(snapshot)
}
