// shared/src/scale.rs
//
// Linear and band scales mapping data domains to pixel ranges. Tick and
// band arithmetic follows the conventions charting libraries use so axes
// look familiar (1/2/5 steps, centred bands).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn degenerate(&self) -> bool {
        let span = self.domain.1 - self.domain.0;
        !span.is_finite() || span == 0.0
    }

    /// Domain value -> pixel. A zero-width domain maps everything to the range midpoint.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.degenerate() {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel -> domain value.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.degenerate() || r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Extend the domain outward to round tick values.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut prev = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == prev || step == 0.0 || !step.is_finite() {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            prev = step;
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if !start.is_finite() || !stop.is_finite() || count == 0 {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let step = tick_increment(start, stop, count);
        if step == 0.0 || !step.is_finite() {
            return Vec::new();
        }

        let mut out: Vec<f64> = if step < 1.0 {
            let inv = (1.0 / step).round();
            let i0 = (start * inv).ceil() as i64;
            let i1 = (stop * inv).floor() as i64;
            (i0..=i1).map(|i| i as f64 / inv).collect()
        } else {
            let i0 = (start / step).ceil() as i64;
            let i1 = (stop / step).floor() as i64;
            (i0..=i1).map(|i| i as f64 * step).collect()
        };

        if reversed {
            out.reverse();
        }
        out
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Ordinal scale dividing a pixel range into equal bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new<S: Into<String>>(domain: impl IntoIterator<Item = S>, range: (f64, f64)) -> Self {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding together, as a fraction of the step.
    pub fn padding(mut self, p: f64) -> Self {
        let p = p.clamp(0.0, 1.0);
        self.padding_inner = p;
        self.padding_outer = p;
        self
    }

    pub fn padding_inner(mut self, p: f64) -> Self {
        self.padding_inner = p.clamp(0.0, 1.0);
        self
    }

    pub fn padding_outer(mut self, p: f64) -> Self {
        self.padding_outer = p.max(0.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn layout(&self) -> (f64, f64) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - self.padding_inner)) * self.align;
        (start, step)
    }

    pub fn step(&self) -> f64 {
        self.layout().1
    }

    pub fn bandwidth(&self) -> f64 {
        self.layout().1 * (1.0 - self.padding_inner)
    }

    /// Leading edge of the band for `key`; `None` for keys outside the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|d| d == key)?;
        let (start, step) = self.layout();
        let (r0, r1) = self.range;
        let n = self.domain.len();
        let slot = if r1 < r0 { n - 1 - idx } else { idx };
        Some(start + step * slot as f64)
    }
}

/// Finite min and max of a sequence, `None` when nothing finite was seen.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widen an extent so zero is inside it.
pub fn include_zero((lo, hi): (f64, f64)) -> (f64, f64) {
    (lo.min(0.0), hi.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_and_inverts() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        assert_eq!(s.map(50.0), 250.0);
        assert_eq!(s.invert(250.0), 50.0);

        let flipped = LinearScale::new((0.0, 10.0), (300.0, 0.0));
        assert_eq!(flipped.map(10.0), 0.0);
        assert_eq!(flipped.map(0.0), 300.0);
    }

    #[test]
    fn zero_width_domain_maps_to_midpoint() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 200.0));
        assert_eq!(s.map(5.0), 100.0);
        assert_eq!(s.map(42.0), 100.0);
        assert_eq!(s.invert(10.0), 5.0);
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new((0.13, 9.7), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 10.0));

        let neg = LinearScale::new((-0.42, 0.31), (0.0, 1.0)).nice(5);
        let (lo, hi) = neg.domain();
        assert!((lo + 0.6).abs() < 1e-9 && (hi - 0.4).abs() < 1e-9, "{lo} {hi}");
    }

    #[test]
    fn ticks_use_round_steps() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 1.0));
        assert_eq!(s.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let small = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(small.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

        let point = LinearScale::new((3.0, 3.0), (0.0, 1.0));
        assert_eq!(point.ticks(5), vec![3.0]);
    }

    #[test]
    fn band_positions_are_evenly_spaced() {
        let b = BandScale::new(["a", "b", "c", "d"], (0.0, 400.0));
        assert_eq!(b.bandwidth(), 100.0);
        assert_eq!(b.position("a"), Some(0.0));
        assert_eq!(b.position("c"), Some(200.0));
        assert_eq!(b.position("z"), None);
    }

    #[test]
    fn band_padding_shrinks_bands_and_centres_them() {
        let b = BandScale::new(["a", "b"], (0.0, 100.0)).padding(0.2);
        // n - inner + 2 * outer = 2.2
        let step = 100.0 / 2.2;
        assert!((b.step() - step).abs() < 1e-9);
        assert!((b.bandwidth() - step * 0.8).abs() < 1e-9);
        let first = b.position("a").unwrap_or_default();
        assert!((first - step * 0.2).abs() < 1e-9);
    }

    #[test]
    fn empty_band_domain_is_harmless() {
        let b = BandScale::new(Vec::<String>::new(), (0.0, 100.0));
        assert!(b.bandwidth().is_finite());
        assert_eq!(b.position("x"), None);
    }

    #[test]
    fn extent_skips_non_finite_values() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(Vec::<f64>::new()), None);
        assert_eq!(include_zero((2.0, 5.0)), (0.0, 5.0));
        assert_eq!(include_zero((-3.0, -1.0)), (-3.0, 0.0));
    }
}
