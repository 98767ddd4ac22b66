// shared/src/transform/braking.rs
//
// Braking periods as distance intervals, one row per driver-year.

use crate::driver::{driver_year_key, split_driver_year};
use crate::schema::{BrakingComparison, BrakingPoint};
use crate::scale::extent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

/// Single left-to-right scan over `(distance, brake)` samples.
///
/// A segment opens at the distance where the signal goes from `<= 0` to
/// `> 0` and closes at the previous sample's distance when it drops back.
/// A series that ends while braking closes at the final sample.
pub fn extract_segments<I>(samples: I) -> Vec<Segment>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut out = Vec::new();
    let mut open: Option<f64> = None;
    let mut prev_distance: Option<f64> = None;

    for (distance, value) in samples {
        let active = value > 0.0;
        match (open, active) {
            (None, true) => open = Some(distance),
            (Some(start), false) => {
                out.push(Segment {
                    start,
                    end: prev_distance.unwrap_or(start),
                });
                open = None;
            }
            _ => {}
        }
        prev_distance = Some(distance);
    }

    if let (Some(start), Some(end)) = (open, prev_distance) {
        out.push(Segment { start, end });
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrakingRow {
    /// `{code}_{year}`, normalised from whatever order the API used.
    pub key: String,
    pub label: String,
    pub ideal: Vec<Segment>,
    pub driver: Vec<Segment>,
}

fn sorted_by_distance(series: &[BrakingPoint]) -> Vec<&BrakingPoint> {
    let mut pts: Vec<&BrakingPoint> = series.iter().collect();
    pts.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    pts
}

/// One row per driver-year in response order.
pub fn braking_rows(cmp: &BrakingComparison) -> Vec<BrakingRow> {
    cmp.iter()
        .map(|(raw_key, series)| {
            let (key, label) = match split_driver_year(raw_key) {
                Some((code, year)) => (driver_year_key(code, year), format!("{code} {year}")),
                None => (raw_key.to_string(), raw_key.to_string()),
            };
            let pts = sorted_by_distance(series);
            BrakingRow {
                key,
                label,
                ideal: extract_segments(pts.iter().map(|p| (p.distance, p.ideal_brake))),
                driver: extract_segments(pts.iter().map(|p| (p.distance, p.driver_brake))),
            }
        })
        .collect()
}

pub fn distance_extent(cmp: &BrakingComparison) -> Option<(f64, f64)> {
    extent(cmp.iter().flat_map(|(_, s)| s.iter().map(|p| p.distance)))
}

pub const ROW_HEIGHT: f64 = 36.0;
pub const MIN_CHART_HEIGHT: f64 = 160.0;

/// Row-based chart height: one band per row plus margins, never below the floor.
pub fn chart_height(rows: usize, margins: f64) -> f64 {
    (rows as f64 * ROW_HEIGHT + margins).max(MIN_CHART_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn documented_example() {
        let d = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
        let v = [0.0, 1.0, 1.0, 0.0, 1.0, 0.0];
        let segs = extract_segments(d.into_iter().zip(v));
        assert_eq!(
            segs,
            vec![
                Segment { start: 10.0, end: 20.0 },
                Segment { start: 40.0, end: 40.0 }
            ]
        );
    }

    #[test]
    fn braking_at_the_end_closes_on_last_sample() {
        let segs = extract_segments([(0.0, 0.0), (5.0, 0.4), (9.0, 1.0)]);
        assert_eq!(segs, vec![Segment { start: 5.0, end: 9.0 }]);
    }

    #[test]
    fn braking_from_the_first_sample() {
        let segs = extract_segments([(0.0, 1.0), (5.0, 0.0)]);
        assert_eq!(segs, vec![Segment { start: 0.0, end: 0.0 }]);
    }

    #[test]
    fn no_samples_no_segments() {
        assert!(extract_segments(Vec::new()).is_empty());
    }

    #[test]
    fn rows_normalise_keys_and_sort_samples() {
        let p = |distance: f64, ideal: f64, drv: f64| BrakingPoint {
            distance,
            ideal_brake: ideal,
            driver_brake: drv,
            driver: None,
            year: None,
        };
        let cmp: BrakingComparison = [(
            "2023_VER".to_string(),
            vec![p(20.0, 0.0, 1.0), p(0.0, 1.0, 0.0), p(10.0, 1.0, 1.0)],
        )]
        .into_iter()
        .collect();

        let rows = braking_rows(&cmp);
        assert_eq!(rows[0].key, "VER_2023");
        assert_eq!(rows[0].label, "VER 2023");
        assert_eq!(rows[0].ideal, vec![Segment { start: 0.0, end: 10.0 }]);
        assert_eq!(rows[0].driver, vec![Segment { start: 10.0, end: 20.0 }]);
        assert_eq!(distance_extent(&cmp), Some((0.0, 20.0)));
    }

    #[test]
    fn height_has_a_floor() {
        assert_eq!(chart_height(0, 40.0), MIN_CHART_HEIGHT);
        assert_eq!(chart_height(10, 40.0), 400.0);
    }

    proptest! {
        #[test]
        fn segments_are_ordered_and_disjoint(values in proptest::collection::vec(0u8..3, 0..60)) {
            let samples = values.iter().enumerate().map(|(i, v)| (i as f64 * 10.0, *v as f64 - 1.0));
            let segs = extract_segments(samples);
            for s in &segs {
                prop_assert!(s.start <= s.end);
            }
            for w in segs.windows(2) {
                prop_assert!(w[0].end < w[1].start);
            }
        }
    }
}
