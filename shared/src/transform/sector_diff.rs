// shared/src/transform/sector_diff.rs
//
// Average time loss per sector type, relative to the fastest driver-year.

use crate::driver::{driver_year_key, split_driver_year};
use crate::schema::AvgDiffPoint;
use crate::scale::{extent, include_zero};

pub const SECTORS: [&str; 4] = ["Slow", "Medium", "Fast", "Straight"];

#[derive(Debug, Clone, PartialEq)]
pub struct SectorRow {
    pub sector: &'static str,
    /// `(driver-year key, seconds lost)` for every plotted key, missing values as 0.
    pub values: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorDiffChart {
    pub baseline: Option<String>,
    pub keys: Vec<String>,
    pub rows: Vec<SectorRow>,
    pub y_domain: (f64, f64),
    pub title: String,
}

impl SectorDiffChart {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn keys_in_order(points: &[AvgDiffPoint]) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for p in points {
        if !keys.contains(&p.driver_year.as_str()) {
            keys.push(&p.driver_year);
        }
    }
    keys
}

/// Reference driver-year for the chart.
///
/// An API-supplied `FastestOverallDriver`/`FastestOverallYear` wins when it
/// names a key present in the data. Otherwise the key with the smallest
/// summed time loss is used; ties go to the first key seen.
pub fn fastest_key(points: &[AvgDiffPoint]) -> Option<String> {
    let keys = keys_in_order(points);

    let supplied = points.iter().find_map(|p| {
        let driver = p.fastest_overall_driver.as_deref()?;
        let year = p.fastest_overall_year.as_deref()?;
        Some((driver, year))
    });
    if let Some((driver, year)) = supplied {
        // Data keys come as either `VER_2023` or `2023_VER`.
        let matching = keys
            .iter()
            .find(|k| split_driver_year(k) == Some((driver, year)));
        if let Some(key) = matching {
            return Some(key.to_string());
        }
        log::warn!(
            "fastest driver-year {} not present in data; using smallest total",
            driver_year_key(driver, year)
        );
    }

    let mut best: Option<(&str, f64)> = None;
    for key in keys {
        let total: f64 = points
            .iter()
            .filter(|p| p.driver_year == key)
            .map(|p| p.diff_to_fastest_sec)
            .sum();
        match best {
            Some((_, t)) if total >= t => {}
            _ => best = Some((key, total)),
        }
    }
    best.map(|(k, _)| k.to_string())
}

pub fn chart_title(baseline: Option<&str>) -> String {
    match baseline.and_then(split_driver_year) {
        Some((code, year)) => format!("Average time loss to fastest driver: {code} ({year})"),
        None => "Avg Time Loss to Fastest".to_string(),
    }
}

/// Grouped bar layout. The baseline key is excluded unless `show_baseline`.
pub fn sector_diff_chart(points: &[AvgDiffPoint], show_baseline: bool) -> SectorDiffChart {
    if points.is_empty() {
        return SectorDiffChart {
            title: chart_title(None),
            ..SectorDiffChart::default()
        };
    }

    let baseline = fastest_key(points);

    let mut keys: Vec<String> = keys_in_order(points)
        .into_iter()
        .filter(|k| show_baseline || Some(*k) != baseline.as_deref())
        .map(str::to_string)
        .collect();
    keys.sort();

    let rows: Vec<SectorRow> = SECTORS
        .iter()
        .map(|&sector| SectorRow {
            sector,
            values: keys
                .iter()
                .map(|key| {
                    let v = points
                        .iter()
                        .find(|p| {
                            p.driver_year == *key && p.minisector_label.eq_ignore_ascii_case(sector)
                        })
                        .map(|p| p.diff_to_fastest_sec)
                        .unwrap_or(0.0);
                    (key.clone(), v)
                })
                .collect(),
        })
        .collect();

    let y_domain = extent(rows.iter().flat_map(|r| r.values.iter().map(|(_, v)| *v)))
        .map(include_zero)
        .unwrap_or((0.0, 0.0));

    SectorDiffChart {
        title: chart_title(baseline.as_deref()),
        baseline,
        keys,
        rows,
        y_domain,
    }
}

/// Years each driver appears with among `keys`, sorted, for HSL shading.
pub fn years_by_driver(keys: &[String]) -> Vec<(String, Vec<String>)> {
    let mut out: Vec<(String, Vec<String>)> = Vec::new();
    for key in keys {
        let Some((code, year)) = split_driver_year(key) else {
            continue;
        };
        match out.iter_mut().find(|(c, _)| c == code) {
            Some((_, years)) => years.push(year.to_string()),
            None => out.push((code.to_string(), vec![year.to_string()])),
        }
    }
    for (_, years) in &mut out {
        years.sort();
        years.dedup();
    }
    out
}
