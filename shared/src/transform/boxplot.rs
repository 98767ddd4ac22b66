// shared/src/transform/boxplot.rs
//
// Box-plot statistics for the braking distance distribution.

use crate::schema::BrakingDistributionPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    /// `{year}_{driver}`, or the bare driver when the year is unknown.
    pub key: String,
    pub driver: String,
    pub year: Option<String>,
    pub count: usize,
    pub stats: BoxStats,
}

/// Linear interpolation between order statistics (R type 7).
/// `sorted` must be ascending.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !p.is_finite() {
        return None;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    Some(BoxStats {
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    })
}

/// Group distances by driver-year in first-seen order and summarise each group.
pub fn box_plot_groups(points: &[BrakingDistributionPoint]) -> Vec<BoxGroup> {
    let mut groups: Vec<(String, &BrakingDistributionPoint, Vec<f64>)> = Vec::new();

    for p in points {
        let key = match &p.year {
            Some(year) => format!("{year}_{}", p.driver),
            None => p.driver.clone(),
        };
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, values)) => values.push(p.braking_distance),
            None => groups.push((key, p, vec![p.braking_distance])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(key, first, values)| {
            let stats = box_stats(&values)?;
            Some(BoxGroup {
                key,
                driver: first.driver.clone(),
                year: first.year.clone(),
                count: values.len(),
                stats,
            })
        })
        .collect()
}

/// Value range covered by all whiskers.
pub fn value_extent(groups: &[BoxGroup]) -> Option<(f64, f64)> {
    crate::scale::extent(groups.iter().flat_map(|g| [g.stats.min, g.stats.max]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(driver: &str, year: &str, d: f64) -> BrakingDistributionPoint {
        BrakingDistributionPoint {
            braking_distance: d,
            driver: driver.into(),
            year: Some(year.into()),
            lap: None,
        }
    }

    #[test]
    fn seven_point_sample_quartiles() {
        let pts: Vec<_> = [22.0, 10.0, 14.0, 12.0, 20.0, 16.0, 18.0]
            .into_iter()
            .map(|d| point("VER", "2023", d))
            .collect();
        let groups = box_plot_groups(&pts);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "2023_VER");
        assert_eq!(
            groups[0].stats,
            BoxStats {
                q1: 13.0,
                median: 16.0,
                q3: 19.0,
                min: 10.0,
                max: 22.0
            }
        );
    }

    #[test]
    fn single_point_group_collapses() {
        let s = box_stats(&[42.0]).unwrap();
        assert_eq!((s.q1, s.median, s.q3, s.min, s.max), (42.0, 42.0, 42.0, 42.0, 42.0));
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let pts = vec![
            point("NOR", "2024", 30.0),
            point("VER", "2023", 20.0),
            point("NOR", "2024", 34.0),
        ];
        let keys: Vec<_> = box_plot_groups(&pts).into_iter().map(|g| g.key).collect();
        assert_eq!(keys, ["2024_NOR", "2023_VER"]);
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(box_plot_groups(&[]).is_empty());
        assert_eq!(box_stats(&[]), None);
        assert_eq!(value_extent(&[]), None);
    }

    #[test]
    fn even_sample_interpolates() {
        let s = box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.q3, 3.25);
    }
}
