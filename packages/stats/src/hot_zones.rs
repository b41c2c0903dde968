//! Hot zone detection.
//!
//! Single-pass, greedy nearest-centroid clustering. Each incident joins
//! the nearest existing zone when that zone's centroid is closer than
//! [`CLUSTER_RADIUS_DEGREES`], otherwise it seeds a new zone. Distances
//! are plain Euclidean distances in decimal degrees, which is only
//! meaningful over a small local area. Zones are never merged, so the
//! result depends on input order.

use theft_map_incident_models::IncidentRecord;
use theft_map_stats_models::HotZone;

/// Clustering threshold in decimal degrees (roughly 1 km).
pub const CLUSTER_RADIUS_DEGREES: f64 = 0.01;

/// Maximum number of zones returned by [`hot_zones`].
pub const MAX_HOT_ZONES: usize = 10;

/// Clusters every record and returns all zones in creation order.
///
/// The zone counts always sum to `records.len()`.
#[must_use]
pub fn cluster_all(records: &[IncidentRecord]) -> Vec<HotZone> {
    let mut zones: Vec<HotZone> = Vec::new();

    for record in records {
        let (lat, lng) = (record.location.lat, record.location.lng);

        match nearest_zone(&zones, lat, lng) {
            Some((idx, distance)) if distance < CLUSTER_RADIUS_DEGREES => {
                let zone = &mut zones[idx];
                #[allow(clippy::cast_precision_loss)]
                let n = zone.count as f64;
                zone.lat = running_mean(zone.lat, n, lat);
                zone.lng = running_mean(zone.lng, n, lng);
                zone.count += 1;
            }
            _ => zones.push(HotZone {
                lat,
                lng,
                count: 1,
                radius: CLUSTER_RADIUS_DEGREES,
            }),
        }
    }

    log::debug!("Clustered {} records into {} zones", records.len(), zones.len());

    zones
}

/// Returns the largest zones, biggest first, at most [`MAX_HOT_ZONES`].
///
/// Zones with equal counts keep their creation order.
#[must_use]
pub fn hot_zones(records: &[IncidentRecord]) -> Vec<HotZone> {
    let mut zones = cluster_all(records);
    zones.sort_by(|a, b| b.count.cmp(&a.count));
    zones.truncate(MAX_HOT_ZONES);
    zones
}

/// Finds the zone whose centroid is closest to `(lat, lng)`.
///
/// On ties the earliest zone wins.
fn nearest_zone(zones: &[HotZone], lat: f64, lng: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, zone) in zones.iter().enumerate() {
        let distance = degree_distance(zone.lat, zone.lng, lat, lng);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }

    best
}

/// `(mean * n + value) / (n + 1)`, computed without fused multiply-add.
#[allow(clippy::suboptimal_flops)]
fn running_mean(mean: f64, n: f64, value: f64) -> f64 {
    (mean * n + value) / (n + 1.0)
}

#[allow(clippy::suboptimal_flops)]
fn degree_distance(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let d_lat = lat_a - lat_b;
    let d_lng = lng_a - lng_b;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, record};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_input_has_no_zones() {
        assert!(hot_zones(&[]).is_empty());
    }

    #[test]
    fn single_record_is_one_zone() {
        let zones = hot_zones(&[at(-12.05, -77.04)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].count, 1);
        assert!(approx(zones[0].lat, -12.05));
        assert!(approx(zones[0].lng, -77.04));
        assert!(approx(zones[0].radius, CLUSTER_RADIUS_DEGREES));
    }

    #[test]
    fn nearby_records_share_a_zone_with_mean_centroid() {
        let zones = hot_zones(&[
            record("hurto", "2024-01-01", 0.0, 0.0),
            record("hurto", "2024-01-01", 0.001, 0.001),
        ]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].count, 2);
        assert!(approx(zones[0].lat, 0.0005));
        assert!(approx(zones[0].lng, 0.0005));
    }

    #[test]
    fn distant_records_form_separate_zones() {
        let zones = hot_zones(&[at(0.0, 0.0), at(1.0, 1.0)]);
        assert_eq!(zones.len(), 2);
        assert!(zones.iter().all(|z| z.count == 1));
    }

    #[test]
    fn threshold_is_strict() {
        let zones = cluster_all(&[at(0.0, 0.0), at(CLUSTER_RADIUS_DEGREES, 0.0)]);
        assert_eq!(zones.len(), 2);
    }

    #[test]
    fn joins_nearest_zone_not_first_within_threshold() {
        // Two seeds 0.012 apart; the third point is within range of both
        // but closer to the second.
        let zones = cluster_all(&[at(0.0, 0.0), at(0.012, 0.0), at(0.008, 0.0)]);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].count, 1);
        assert_eq!(zones[1].count, 2);
    }

    #[test]
    fn equidistant_point_joins_earliest_zone() {
        // Powers of two keep both distances exactly equal.
        let zones = cluster_all(&[at(0.0, 0.0), at(0.015_625, 0.0), at(0.007_812_5, 0.0)]);
        assert_eq!(zones[0].count, 2);
        assert_eq!(zones[1].count, 1);
    }

    #[test]
    fn centroid_drift_makes_clustering_order_sensitive() {
        let forward = cluster_all(&[at(0.0, 0.0), at(0.009, 0.0), at(0.016, 0.0)]);
        let reverse = cluster_all(&[at(0.016, 0.0), at(0.009, 0.0), at(0.0, 0.0)]);

        // Forward: centroid drifts to 0.0045, so 0.016 is out of range.
        assert_eq!(forward.iter().map(|z| z.count).collect::<Vec<_>>(), [2, 1]);
        // Reverse: centroid drifts to 0.0125, so 0.0 is out of range.
        assert_eq!(reverse.iter().map(|z| z.count).collect::<Vec<_>>(), [2, 1]);
        assert!(!approx(forward[0].lat, reverse[0].lat));
    }

    #[test]
    fn sorted_descending_with_stable_ties_and_truncated() {
        let mut records = Vec::new();
        // 12 isolated zones; zone i gets (i % 3) + 1 records.
        for i in 0..12_u32 {
            let lat = f64::from(i);
            for _ in 0..=(i % 3) {
                records.push(at(lat, 0.0));
            }
        }

        let all = cluster_all(&records);
        assert_eq!(all.len(), 12);

        let top = hot_zones(&records);
        assert_eq!(top.len(), MAX_HOT_ZONES);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));

        let top_lats: Vec<_> = top.iter().map(|z| z.lat).collect();
        assert_eq!(
            top_lats,
            [2.0, 5.0, 8.0, 11.0, 1.0, 4.0, 7.0, 10.0, 0.0, 3.0]
        );
    }

    #[test]
    fn larger_cluster_comes_first() {
        let mut records: Vec<_> = (0..3).map(|_| at(1.0, 1.0)).collect();
        records.extend((0..15).map(|i| at(-12.05 + f64::from(i) * 0.0001, -77.04)));

        let zones = hot_zones(&records);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].count, 15);
        assert_eq!(zones[1].count, 3);
    }
}
