//! Per-category tallies.

use theft_map_incident_models::{IncidentCategory, IncidentRecord};
use theft_map_stats_models::CategoryCounts;

/// Counts records per category.
///
/// Every category is present in the result, zero when absent. Records
/// whose stored category is outside the closed set are not counted
/// anywhere.
#[must_use]
pub fn count_by_category(records: &[IncidentRecord]) -> CategoryCounts {
    let mut counts: CategoryCounts = IncidentCategory::all().iter().map(|c| (*c, 0)).collect();

    let mut uncategorized = 0_usize;
    for record in records {
        match record.category() {
            Some(category) => *counts.entry(category).or_insert(0) += 1,
            None => uncategorized += 1,
        }
    }

    if uncategorized > 0 {
        log::debug!("{uncategorized} records with unrecognized categories left out of tallies");
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn empty_input_is_zero_filled() {
        let counts = count_by_category(&[]);
        assert_eq!(counts.len(), IncidentCategory::all().len());
        assert!(counts.values().all(|c| *c == 0));
    }

    #[test]
    fn keys_iterate_in_enumeration_order() {
        let counts = count_by_category(&[]);
        let keys: Vec<_> = counts.keys().copied().collect();
        assert_eq!(keys, IncidentCategory::all());
    }

    #[test]
    fn unrecognized_categories_are_skipped() {
        let records = vec![
            record("hurto", "2024-01-01", 0.0, 0.0),
            record("hurto", "2024-01-01", 0.0, 0.0),
            record("asalto", "2024-01-01", 0.0, 0.0),
            record("robo_casa", "2024-01-01", 0.0, 0.0),
            record("HURTO", "2024-01-01", 0.0, 0.0),
        ];

        let counts = count_by_category(&records);
        assert_eq!(counts[&IncidentCategory::PettyTheft], 2);
        assert_eq!(counts[&IncidentCategory::Assault], 1);
        assert_eq!(counts[&IncidentCategory::Other], 0);
        assert_eq!(counts.values().sum::<u64>(), 3);
    }
}
