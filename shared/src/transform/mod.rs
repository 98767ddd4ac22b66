// shared/src/transform/mod.rs
//
// Client-side chart data preparation. Every transformer is a pure function
// of decoded response data and returns empty structures for empty input.

pub mod boxplot;
pub mod braking;
pub mod gear;
pub mod lap_gap;
pub mod minisector;
pub mod nearest;
pub mod sector_diff;
pub mod telemetry;

use crate::scale::extent;

/// Uniform-scale fit of track coordinates into a pixel box. Track maps keep
/// their aspect ratio and have y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProjection {
    k: f64,
    x0: f64,
    y0: f64,
    off_x: f64,
    off_y: f64,
    height: f64,
}

impl TrackProjection {
    pub fn fit<I>(points: I, width: f64, height: f64, pad: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)> + Clone,
    {
        let (x0, x1) = extent(points.clone().into_iter().map(|p| p.0))?;
        let (y0, y1) = extent(points.into_iter().map(|p| p.1))?;

        let avail_w = (width - 2.0 * pad).max(1.0);
        let avail_h = (height - 2.0 * pad).max(1.0);
        let span_x = (x1 - x0).max(f64::EPSILON);
        let span_y = (y1 - y0).max(f64::EPSILON);
        let k = (avail_w / span_x).min(avail_h / span_y);

        Some(Self {
            k,
            x0,
            y0,
            off_x: pad + (avail_w - span_x * k) / 2.0,
            off_y: pad + (avail_h - span_y * k) / 2.0,
            height,
        })
    }

    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.off_x + (x - self.x0) * self.k;
        let py = self.height - (self.off_y + (y - self.y0) * self.k);
        (px, py)
    }
}

/// SVG `points` attribute for a polyline.
pub fn polyline_points<I>(points: I) -> String
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut out = String::new();
    for (x, y) in points {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("{x:.2},{y:.2}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_keeps_aspect_and_flips_y() {
        let pts = [(0.0, 0.0), (100.0, 50.0)];
        let p = TrackProjection::fit(pts, 200.0, 200.0, 0.0).unwrap();
        assert_eq!(p.project(0.0, 0.0), (0.0, 150.0));
        assert_eq!(p.project(100.0, 50.0), (200.0, 50.0));
    }

    #[test]
    fn projection_of_nothing_is_none() {
        assert!(TrackProjection::fit(Vec::<(f64, f64)>::new(), 10.0, 10.0, 1.0).is_none());
    }

    #[test]
    fn polyline_formatting() {
        assert_eq!(polyline_points([(1.0, 2.0), (3.5, 4.25)]), "1.00,2.00 3.50,4.25");
        assert_eq!(polyline_points(Vec::new()), "");
    }
}
