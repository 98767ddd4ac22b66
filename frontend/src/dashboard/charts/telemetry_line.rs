// frontend/src/dashboard/charts/telemetry_line.rs
//
// One trace chart per telemetry metric, distance on the x axis.

use dioxus::prelude::*;
use paddock_shared::scale::LinearScale;
use paddock_shared::transform::nearest::nearest;
use paddock_shared::transform::polyline_points;
use paddock_shared::transform::telemetry::MetricChart;

use super::{
    ChartFrame, DEFAULT_WIDTH, Margin, SeriesColors, fmt_tick, grid_and_axes, measured_width,
    swatch_legend, tooltip,
};

const HEIGHT: f64 = 220.0;
const MARGIN: Margin = Margin::new(12.0, 16.0, 28.0, 56.0);

/// Holds each value until the next sample instead of interpolating.
fn step_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push((x, points[i - 1].1));
        }
        out.push((x, y));
    }
    out
}

#[component]
pub fn TelemetryLineChart(chart: MetricChart, colors: SeriesColors, loading: bool) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut cursor = use_signal(|| None::<f64>);

    let metric = chart.metric;
    let unit = metric.unit();
    let title = if unit.is_empty() {
        metric.label().to_string()
    } else {
        format!("{} ({unit})", metric.label())
    };
    let keys: Vec<String> = chart.series.iter().map(|s| s.key.clone()).collect();

    let w = width();
    let x = LinearScale::new(
        chart.x_extent.unwrap_or((0.0, 1.0)),
        (MARGIN.left, MARGIN.left + MARGIN.inner_width(w)),
    );
    let y = LinearScale::new(
        chart.y_extent.unwrap_or((0.0, 1.0)),
        (HEIGHT - MARGIN.bottom, MARGIN.top),
    )
    .nice(4);
    let (x_left, x_right) = x.range();

    let lines: Vec<(String, String)> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let shaped = if metric.is_stepped() {
                step_points(&s.points)
            } else {
                s.points.clone()
            };
            let pts = polyline_points(shaped.iter().map(|&(d, v)| (x.map(d), y.map(v))));
            (pts, colors.css(&s.key, i, &keys))
        })
        .collect();

    let legend: Vec<(String, String)> = keys
        .iter()
        .zip(&lines)
        .map(|(k, (_, color))| (k.clone(), color.clone()))
        .collect();

    let tip = cursor().map(|px| {
        let distance = x.invert(px);
        let mut rows = vec![(format!("{distance:.0} m"), None)];
        for (i, s) in chart.series.iter().enumerate() {
            if let Some(&(_, v)) = nearest(&s.points, distance, |p| p.0) {
                rows.push((
                    format!("{}: {} {unit}", s.key, fmt_tick(v)),
                    Some(colors.css(&s.key, i, &keys)),
                ));
            }
        }
        let left = if px > x_right - 180.0 { px - 170.0 } else { px + 12.0 };
        tooltip(left, MARGIN.top, &rows)
    });

    rsx! {
        ChartFrame {
            title,
            loading,
            empty: chart.is_empty(),
            div {
                style: "position:relative; width:100%;",
                onresize: move |evt| {
                    if let Some(w) = measured_width(&evt) {
                        width.set(w);
                    }
                },
                onmousemove: move |evt| {
                    let px = evt.element_coordinates().x;
                    cursor.set((px >= x_left && px <= x_right).then_some(px));
                },
                onmouseleave: move |_| cursor.set(None),
                svg {
                    style: "width:100%; height:auto; display:block; pointer-events:none;",
                    view_box: "0 0 {w} {HEIGHT}",

                    {grid_and_axes(&x, &y, 8, 4, " m")}

                    for (pts, color) in lines.iter() {
                        polyline {
                            points: "{pts}",
                            fill: "none",
                            stroke: "{color}",
                            stroke_width: "1.5",
                            stroke_linejoin: "round",
                        }
                    }

                    {cursor().map(|px| rsx! {
                        line { x1: "{px}", y1: "{MARGIN.top}", x2: "{px}", y2: "{HEIGHT - MARGIN.bottom}", stroke: "#64748b", stroke_width: "1" }
                    })}
                }
                {tip}
            }
            {swatch_legend(&legend)}
        }
    }
}
