// frontend/src/dashboard/charts/track_dominance.rs
//
// Track outline split into minisectors, each coloured by the driver-year
// that was fastest through it.

use dioxus::prelude::*;
use paddock_shared::schema::TrackDominancePoint;
use paddock_shared::transform::minisector::{dominance_share, minisector_runs};
use paddock_shared::transform::{TrackProjection, polyline_points};

use super::{ChartFrame, DEFAULT_WIDTH, SeriesColors, measured_width, swatch_legend, tooltip};

const HEIGHT: f64 = 520.0;
const PAD: f64 = 28.0;
/// Minisector numbers are only drawn when they stay readable.
const MAX_LABELS: usize = 60;

#[component]
pub fn TrackDominanceChart(
    points: Vec<TrackDominancePoint>,
    colors: SeriesColors,
    loading: bool,
) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut hovered = use_signal(|| None::<usize>);

    let runs = minisector_runs(&points);
    let share = dominance_share(&runs);
    let legend_keys: Vec<String> = share.iter().map(|(k, _)| k.clone()).collect();
    let color_of = |key: &str| {
        let idx = legend_keys.iter().position(|k| k == key).unwrap_or(0);
        colors.css(key, idx, &legend_keys)
    };

    let w = width();
    let projection = TrackProjection::fit(points.iter().map(|p| (p.x, p.y)), w, HEIGHT, PAD);

    let marks: Vec<(String, String, (f64, f64), i64)> = match projection {
        Some(proj) => runs
            .iter()
            .map(|run| {
                let pts = polyline_points(run.points.iter().map(|&(x, y)| proj.project(x, y)));
                let label_at = proj.project(run.label_at.0, run.label_at.1);
                (pts, color_of(&run.fastest), label_at, run.minisector)
            })
            .collect(),
        None => Vec::new(),
    };
    let show_labels = marks.len() <= MAX_LABELS;

    let legend: Vec<(String, String)> = share
        .iter()
        .map(|(key, n)| (format!("{key} ({n})"), color_of(key)))
        .collect();

    let tip = hovered().and_then(|i| {
        let run = runs.get(i)?;
        let (_, _, (lx, ly), _) = marks.get(i)?;
        let gain = points
            .iter()
            .find(|p| p.minisector == run.minisector && p.fastest == run.fastest)
            .and_then(|p| p.time_gain_fastest);
        let mut lines = vec![
            (format!("Minisector {}", run.minisector), None),
            (format!("Fastest: {}", run.fastest), Some(color_of(&run.fastest))),
        ];
        if let Some(g) = gain {
            lines.push((format!("Gain: {g:.3} s"), None));
        }
        Some(tooltip(lx + 12.0, ly + 12.0, &lines))
    });

    rsx! {
        ChartFrame {
            title: "Track dominance",
            loading,
            empty: marks.is_empty(),
            div {
                style: "position:relative; width:100%;",
                onresize: move |evt| {
                    if let Some(w) = measured_width(&evt) {
                        width.set(w);
                    }
                },
                onmouseleave: move |_| hovered.set(None),
                svg {
                    style: "width:100%; height:auto; display:block;",
                    view_box: "0 0 {w} {HEIGHT}",

                    for (i, (pts, color, _, _)) in marks.iter().enumerate() {
                        polyline {
                            key: "{i}",
                            points: "{pts}",
                            fill: "none",
                            stroke: "{color}",
                            stroke_width: if hovered() == Some(i) { "9" } else { "6" },
                            stroke_linejoin: "round",
                            stroke_linecap: "round",
                            onmouseenter: move |_| hovered.set(Some(i)),
                        }
                    }

                    if show_labels {
                        for (i, (_, _, (lx, ly), minisector)) in marks.iter().enumerate() {
                            text {
                                key: "label-{i}",
                                x: "{lx + 8.0}",
                                y: "{ly - 8.0}",
                                fill: "#e5e7eb",
                                font_size: "9",
                                pointer_events: "none",
                                "{minisector}"
                            }
                        }
                    }
                }
                {tip}
            }
            {swatch_legend(&legend)}
        }
    }
}
