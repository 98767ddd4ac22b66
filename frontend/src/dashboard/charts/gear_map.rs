// frontend/src/dashboard/charts/gear_map.rs
//
// Track outline coloured by the gear engaged along the lap.

use dioxus::prelude::*;
use paddock_shared::schema::GearSample;
use paddock_shared::transform::gear::{gear_color, gear_runs, gears_present};
use paddock_shared::transform::{TrackProjection, polyline_points};

use super::{ChartFrame, DEFAULT_WIDTH, measured_width, swatch_legend, tooltip};

const HEIGHT: f64 = 460.0;
const PAD: f64 = 24.0;

#[component]
pub fn GearMapChart(samples: Vec<GearSample>, loading: bool, title: String) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut hovered = use_signal(|| None::<usize>);

    let runs = gear_runs(&samples);
    let w = width();
    let projection = TrackProjection::fit(samples.iter().map(|s| (s.x, s.y)), w, HEIGHT, PAD);

    // (points, colour, gear, anchor)
    let marks: Vec<(String, String, u8, (f64, f64))> = match projection {
        Some(proj) => runs
            .iter()
            .map(|run| {
                let anchor = run
                    .points
                    .first()
                    .map(|&(x, y)| proj.project(x, y))
                    .unwrap_or((0.0, 0.0));
                (
                    polyline_points(run.points.iter().map(|&(x, y)| proj.project(x, y))),
                    gear_color(run.gear).to_css(),
                    run.gear,
                    anchor,
                )
            })
            .collect(),
        None => Vec::new(),
    };

    let legend: Vec<(String, String)> = gears_present(&samples)
        .into_iter()
        .map(|g| (format!("Gear {g}"), gear_color(g).to_css()))
        .collect();

    let tip = hovered().and_then(|i| {
        let (_, color, gear, (ax, ay)) = marks.get(i)?;
        Some(tooltip(
            ax + 12.0,
            ay + 12.0,
            &[(format!("Gear {gear}"), Some(color.clone()))],
        ))
    });

    rsx! {
        ChartFrame {
            title,
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
                            stroke_width: if hovered() == Some(i) { "8" } else { "5" },
                            stroke_linejoin: "round",
                            stroke_linecap: "round",
                            onmouseenter: move |_| hovered.set(Some(i)),
                        }
                    }
                }
                {tip}
            }
            {swatch_legend(&legend)}
        }
    }
}
