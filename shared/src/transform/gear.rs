// shared/src/transform/gear.rs
//
// Gear map: track outline split into runs of constant gear.

use crate::color::{Rgb, category_color};
use crate::schema::GearSample;

#[derive(Debug, Clone, PartialEq)]
pub struct GearRun {
    pub gear: u8,
    /// Track coordinates; each run also carries the first point of the next
    /// run so the outline has no gaps.
    pub points: Vec<(f64, f64)>,
}

pub fn gear_runs(samples: &[GearSample]) -> Vec<GearRun> {
    let chunks: Vec<&[GearSample]> = samples.chunk_by(|a, b| a.gear == b.gear).collect();
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut points: Vec<(f64, f64)> = chunk.iter().map(|s| (s.x, s.y)).collect();
            if let Some(next) = chunks.get(i + 1).and_then(|c| c.first()) {
                points.push((next.x, next.y));
            }
            GearRun {
                gear: chunk[0].gear,
                points,
            }
        })
        .collect()
}

/// Gears used on the lap, ascending.
pub fn gears_present(samples: &[GearSample]) -> Vec<u8> {
    let mut gears: Vec<u8> = samples.iter().map(|s| s.gear).collect();
    gears.sort_unstable();
    gears.dedup();
    gears
}

/// Gear 1 takes the first palette slot.
pub fn gear_color(gear: u8) -> Rgb {
    category_color(usize::from(gear.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TABLEAU10;

    fn s(x: f64, gear: u8) -> GearSample {
        GearSample { x, y: 0.0, gear }
    }

    #[test]
    fn runs_join_onto_the_next_run() {
        let runs = gear_runs(&[s(0.0, 3), s(1.0, 3), s(2.0, 4), s(3.0, 3)]);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].points, vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(runs[2].points, vec![(3.0, 0.0)]);
    }

    #[test]
    fn gear_legend_is_sorted_unique() {
        assert_eq!(gears_present(&[s(0.0, 5), s(1.0, 2), s(2.0, 5)]), vec![2, 5]);
        assert!(gear_runs(&[]).is_empty());
    }

    #[test]
    fn gear_colors_cycle_palette() {
        assert_eq!(gear_color(1), TABLEAU10[0]);
        assert_eq!(gear_color(0), TABLEAU10[0]);
        assert_eq!(gear_color(8), TABLEAU10[7]);
    }
}
