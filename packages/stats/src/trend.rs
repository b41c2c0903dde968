//! Monthly trend series.

use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDate};
use theft_map_incident_models::IncidentRecord;
use theft_map_stats_models::TrendBucket;

use crate::StatsError;

/// Buckets records by calendar month.
///
/// Only months that contain at least one record appear. Buckets are
/// ordered by their zero-padded `YYYY-MM` key, which is chronological.
///
/// # Errors
///
/// Returns [`StatsError::InvalidDate`] for the first record whose date
/// does not parse.
pub fn monthly_trend(records: &[IncidentRecord]) -> Result<Vec<TrendBucket>, StatsError> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        let date = record
            .occurred_on()
            .map_err(|e| StatsError::InvalidDate {
                id: record.id.clone(),
                value: e.value,
            })?;
        *buckets.entry(period_key(date)).or_insert(0) += 1;
    }

    log::debug!("Bucketed {} records into {} months", records.len(), buckets.len());

    Ok(buckets
        .into_iter()
        .map(|(period_key, count)| TrendBucket { period_key, count })
        .collect())
}

/// Formats the `YYYY-MM` bucket key for a date.
#[must_use]
pub fn period_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
