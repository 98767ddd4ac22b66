// shared/src/transform/minisector.rs
//
// Track dominance: contiguous minisector runs, each drawn as one polyline in
// the colour of the driver-year that was fastest through it.

use crate::schema::TrackDominancePoint;

#[derive(Debug, Clone, PartialEq)]
pub struct MinisectorRun {
    pub minisector: i64,
    pub fastest: String,
    pub points: Vec<(f64, f64)>,
    /// Point carrying the minisector label (the run's middle sample).
    pub label_at: (f64, f64),
}

/// Split points into runs of equal minisector id, in input order.
///
/// A minisector id that reappears later (start/finish wrap) starts a new
/// run. The first point of a run decides its fastest key.
pub fn minisector_runs(points: &[TrackDominancePoint]) -> Vec<MinisectorRun> {
    points
        .chunk_by(|a, b| a.minisector == b.minisector)
        .map(|chunk| {
            let first = &chunk[0];
            let mid = &chunk[chunk.len() / 2];
            MinisectorRun {
                minisector: first.minisector,
                fastest: first.fastest.clone(),
                points: chunk.iter().map(|p| (p.x, p.y)).collect(),
                label_at: (mid.x, mid.y),
            }
        })
        .collect()
}

/// Distinct fastest keys in first-seen order.
pub fn dominance_legend(runs: &[MinisectorRun]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for run in runs {
        if !out.contains(&run.fastest) {
            out.push(run.fastest.clone());
        }
    }
    out
}

/// Share of runs won by each legend key.
pub fn dominance_share(runs: &[MinisectorRun]) -> Vec<(String, usize)> {
    dominance_legend(runs)
        .into_iter()
        .map(|key| {
            let n = runs.iter().filter(|r| r.fastest == key).count();
            (key, n)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, ms: i64, fastest: &str) -> TrackDominancePoint {
        TrackDominancePoint {
            x,
            y: -x,
            minisector: ms,
            fastest: fastest.into(),
            driver: None,
            year: None,
            time_gain_fastest: None,
        }
    }

    #[test]
    fn contiguous_runs_with_middle_label() {
        let pts = vec![
            p(0.0, 1, "VER"),
            p(1.0, 1, "VER"),
            p(2.0, 1, "VER"),
            p(3.0, 2, "NOR"),
            p(4.0, 2, "NOR"),
            p(5.0, 3, "VER"),
        ];
        let runs = minisector_runs(&pts);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].points.len(), 3);
        assert_eq!(runs[0].label_at, (1.0, -1.0));
        // even length: index len / 2
        assert_eq!(runs[1].label_at, (4.0, -4.0));
        assert_eq!(dominance_legend(&runs), ["VER", "NOR"]);
        assert_eq!(
            dominance_share(&runs),
            vec![("VER".to_string(), 2), ("NOR".to_string(), 1)]
        );
    }

    #[test]
    fn wrapped_minisector_starts_new_run() {
        let pts = vec![p(0.0, 1, "A"), p(1.0, 2, "B"), p(2.0, 1, "A")];
        assert_eq!(minisector_runs(&pts).len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(minisector_runs(&[]).is_empty());
        assert!(dominance_legend(&[]).is_empty());
    }
}
