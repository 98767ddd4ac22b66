// shared/src/transform/telemetry.rs
//
// Per-metric trace series from the telemetry response.

use serde::{Deserialize, Serialize};

use crate::driver::{driver_year_key, split_driver_year};
use crate::schema::{Telemetry, TelemetryPoint};
use crate::scale::extent;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub enum TelemetryMetric {
    Speed,
    Rpm,
    Gear,
    Throttle,
    Brake,
    Drs,
}

impl TelemetryMetric {
    pub const ALL: [TelemetryMetric; 6] = [
        TelemetryMetric::Speed,
        TelemetryMetric::Rpm,
        TelemetryMetric::Gear,
        TelemetryMetric::Throttle,
        TelemetryMetric::Brake,
        TelemetryMetric::Drs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TelemetryMetric::Speed => "Speed",
            TelemetryMetric::Rpm => "RPM",
            TelemetryMetric::Gear => "Gear",
            TelemetryMetric::Throttle => "Throttle",
            TelemetryMetric::Brake => "Brake",
            TelemetryMetric::Drs => "DRS",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            TelemetryMetric::Speed => "km/h",
            TelemetryMetric::Rpm => "rpm",
            TelemetryMetric::Throttle => "%",
            _ => "",
        }
    }

    pub fn value(&self, p: &TelemetryPoint) -> f64 {
        match self {
            TelemetryMetric::Speed => p.speed,
            TelemetryMetric::Rpm => p.rpm,
            TelemetryMetric::Gear => p.n_gear,
            TelemetryMetric::Throttle => p.throttle,
            TelemetryMetric::Brake => p.brake,
            TelemetryMetric::Drs => p.drs,
        }
    }

    /// Step-like signals are drawn without interpolation.
    pub fn is_stepped(&self) -> bool {
        matches!(
            self,
            TelemetryMetric::Gear | TelemetryMetric::Brake | TelemetryMetric::Drs
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    /// `{code}_{year}`.
    pub key: String,
    /// `(distance, value)` sorted by distance.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricChart {
    pub metric: TelemetryMetric,
    pub series: Vec<MetricSeries>,
    pub x_extent: Option<(f64, f64)>,
    pub y_extent: Option<(f64, f64)>,
}

impl MetricChart {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

fn normalized_key(raw: &str) -> String {
    match split_driver_year(raw) {
        Some((code, year)) => driver_year_key(code, year),
        None => raw.to_string(),
    }
}

pub fn metric_chart(telemetry: &Telemetry, metric: TelemetryMetric) -> MetricChart {
    let series: Vec<MetricSeries> = telemetry
        .iter()
        .map(|(raw_key, samples)| {
            let mut points: Vec<(f64, f64)> = samples
                .iter()
                .map(|p| (p.distance, metric.value(p)))
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            MetricSeries {
                key: normalized_key(raw_key),
                points,
            }
        })
        .collect();

    let x_extent = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_extent = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

    MetricChart {
        metric,
        series,
        x_extent,
        y_extent,
    }
}

pub fn metric_charts(telemetry: &Telemetry) -> Vec<MetricChart> {
    TelemetryMetric::ALL
        .iter()
        .map(|m| metric_chart(telemetry, *m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(distance: f64, speed: f64) -> TelemetryPoint {
        TelemetryPoint {
            time: None,
            distance,
            speed,
            rpm: 10_000.0,
            n_gear: 6.0,
            throttle: 100.0,
            brake: 0.0,
            drs: 0.0,
        }
    }

    #[test]
    fn series_are_keyed_code_first_and_sorted() {
        let t: Telemetry = [(
            "2023_VER".to_string(),
            vec![sample(20.0, 300.0), sample(0.0, 280.0)],
        )]
        .into_iter()
        .collect();

        let chart = metric_chart(&t, TelemetryMetric::Speed);
        assert_eq!(chart.series[0].key, "VER_2023");
        assert_eq!(chart.series[0].points, vec![(0.0, 280.0), (20.0, 300.0)]);
        assert_eq!(chart.y_extent, Some((280.0, 300.0)));
    }

    #[test]
    fn one_chart_per_metric() {
        let charts = metric_charts(&Telemetry::default());
        assert_eq!(charts.len(), 6);
        assert!(charts.iter().all(MetricChart::is_empty));
        assert_eq!(charts[1].metric.label(), "RPM");
    }
}
