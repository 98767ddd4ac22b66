// frontend/src/dashboard/charts/lap_gap.rs
//
// Gap to the reference lap along the track distance. The reference lap is
// the dashed zero line; corners are marked as vertical guides.

use dioxus::prelude::*;
use paddock_shared::scale::LinearScale;
use paddock_shared::schema::LapGapData;
use paddock_shared::transform::lap_gap::lap_gap_chart;
use paddock_shared::transform::nearest::nearest;
use paddock_shared::transform::polyline_points;

use super::{
    ChartFrame, DEFAULT_WIDTH, Margin, SeriesColors, grid_and_axes, measured_width,
    swatch_legend, tooltip,
};

const HEIGHT: f64 = 360.0;
const MARGIN: Margin = Margin::new(22.0, 16.0, 28.0, 52.0);

#[component]
pub fn LapGapEvolutionChart(data: LapGapData, colors: SeriesColors, loading: bool) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut cursor = use_signal(|| None::<f64>);

    let chart = lap_gap_chart(&data, colors.options.show_baseline);
    let keys: Vec<String> = chart.series.iter().map(|s| s.key.clone()).collect();

    let w = width();
    let x = LinearScale::new(
        chart.x_extent.unwrap_or((0.0, 1.0)),
        (MARGIN.left, MARGIN.left + MARGIN.inner_width(w)),
    );
    let y = LinearScale::new(chart.y_extent, (HEIGHT - MARGIN.bottom, MARGIN.top)).nice(5);
    let zero = y.map(0.0);
    let (x_left, x_right) = x.range();

    let lines: Vec<(String, String, bool)> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let pts = polyline_points(s.points.iter().map(|&(d, g)| (x.map(d), y.map(g))));
            (pts, colors.css(&s.key, i, &keys), s.is_reference)
        })
        .collect();

    let corners: Vec<(f64, String)> = chart
        .corners
        .iter()
        .filter(|c| c.distance >= x.domain().0 && c.distance <= x.domain().1)
        .map(|c| (x.map(c.distance), format!("T{}", c.number)))
        .collect();

    let mut legend: Vec<(String, String)> = lines
        .iter()
        .zip(&keys)
        .map(|((_, color, _), k)| (k.clone(), color.clone()))
        .collect();
    if let Some(reference) = &chart.reference
        && !colors.options.show_baseline
    {
        legend.push((format!("{reference} (reference)"), "#e5e7eb".to_string()));
    }

    let tip = cursor().and_then(|px| {
        let distance = x.invert(px);
        let mut rows = vec![(format!("{distance:.0} m"), None)];
        for (i, s) in chart.series.iter().enumerate() {
            let &(_, gap) = nearest(&s.points, distance, |p| p.0)?;
            rows.push((format!("{}: {gap:+.3} s", s.key), Some(colors.css(&s.key, i, &keys))));
        }
        let left = if px > x_right - 160.0 { px - 150.0 } else { px + 12.0 };
        Some(tooltip(left, MARGIN.top, &rows))
    });

    rsx! {
        ChartFrame {
            title: "Lap gap evolution",
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

                    {grid_and_axes(&x, &y, 8, 5, " m")}

                    for (cx, label) in corners.iter() {
                        line { x1: "{cx}", y1: "{MARGIN.top}", x2: "{cx}", y2: "{HEIGHT - MARGIN.bottom}", stroke: "#475569", stroke_width: "1", stroke_dasharray: "2 4" }
                        text { x: "{cx}", y: "{MARGIN.top - 6.0}", fill: "#94a3b8", font_size: "9", text_anchor: "middle", "{label}" }
                    }

                    line { x1: "{x_left}", y1: "{zero}", x2: "{x_right}", y2: "{zero}", stroke: "#e5e7eb", stroke_width: "1", stroke_dasharray: "6 4" }

                    for (pts, color, is_reference) in lines.iter() {
                        polyline {
                            points: "{pts}",
                            fill: "none",
                            stroke: "{color}",
                            stroke_width: if *is_reference { "1" } else { "2" },
                            stroke_linejoin: "round",
                            stroke_linecap: "round",
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
