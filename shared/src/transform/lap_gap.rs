// shared/src/transform/lap_gap.rs
//
// Lap gap evolution: time delta against the reference lap along the track.

use crate::driver::driver_year_key;
use crate::schema::{Corner, LapGapData};
use crate::scale::{extent, include_zero};

const ZERO_EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct LapGapSeries {
    pub key: String,
    pub driver: String,
    pub year: String,
    /// `(distance, gap seconds)`, sorted by distance.
    pub points: Vec<(f64, f64)>,
    pub is_reference: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LapGapChart {
    pub series: Vec<LapGapSeries>,
    pub reference: Option<String>,
    pub x_extent: Option<(f64, f64)>,
    pub y_extent: (f64, f64),
    pub corners: Vec<Corner>,
}

impl LapGapChart {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Group points into one series per driver-year (first-seen order).
///
/// The reference series is the first whose gaps are all zero; it is drawn as
/// the dashed zero line and its own polyline is dropped unless `show_baseline`.
pub fn lap_gap_chart(data: &LapGapData, show_baseline: bool) -> LapGapChart {
    let mut series: Vec<LapGapSeries> = Vec::new();
    for p in &data.points {
        let key = driver_year_key(&p.driver, &p.year);
        match series.iter_mut().find(|s| s.key == key) {
            Some(s) => s.points.push((p.x, p.y)),
            None => series.push(LapGapSeries {
                key,
                driver: p.driver.clone(),
                year: p.year.clone(),
                points: vec![(p.x, p.y)],
                is_reference: false,
            }),
        }
    }

    for s in &mut series {
        s.points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let reference = series
        .iter_mut()
        .find(|s| s.points.iter().all(|(_, y)| y.abs() < ZERO_EPS))
        .map(|s| {
            s.is_reference = true;
            s.key.clone()
        });

    let x_extent = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_extent = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
        .map(include_zero)
        .unwrap_or((0.0, 0.0));

    if !show_baseline {
        series.retain(|s| !s.is_reference);
    }

    LapGapChart {
        series,
        reference,
        x_extent,
        y_extent,
        corners: data.corners.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LapGapPoint;

    fn p(x: f64, y: f64, driver: &str) -> LapGapPoint {
        LapGapPoint {
            x,
            y,
            driver: driver.into(),
            year: "2023".into(),
        }
    }

    fn data() -> LapGapData {
        LapGapData {
            points: vec![
                p(100.0, 0.0, "VER"),
                p(200.0, 0.2, "NOR"),
                p(0.0, 0.0, "VER"),
                p(100.0, 0.1, "NOR"),
                p(200.0, 0.0, "VER"),
            ],
            corners: Vec::new(),
        }
    }

    #[test]
    fn groups_sort_and_detect_reference() {
        let chart = lap_gap_chart(&data(), true);
        assert_eq!(chart.reference.as_deref(), Some("VER_2023"));
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points, vec![(0.0, 0.0), (100.0, 0.0), (200.0, 0.0)]);
        assert!(chart.series[0].is_reference);
        assert_eq!(chart.x_extent, Some((0.0, 200.0)));
        assert_eq!(chart.y_extent, (0.0, 0.2));
    }

    #[test]
    fn hidden_baseline_drops_reference_series() {
        let chart = lap_gap_chart(&data(), false);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].key, "NOR_2023");
        assert_eq!(chart.reference.as_deref(), Some("VER_2023"));
    }

    #[test]
    fn negative_gaps_keep_zero_in_range() {
        let d = LapGapData {
            points: vec![p(0.0, -0.3, "LEC"), p(10.0, -0.1, "LEC")],
            corners: Vec::new(),
        };
        let chart = lap_gap_chart(&d, true);
        assert_eq!(chart.y_extent, (-0.3, 0.0));
        assert_eq!(chart.reference, None);
    }

    #[test]
    fn empty_input() {
        let chart = lap_gap_chart(&LapGapData::default(), true);
        assert!(chart.is_empty());
        assert_eq!(chart.x_extent, None);
    }
}
