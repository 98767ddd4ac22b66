// frontend/src/dashboard/charts/braking_comparison.rs
//
// One row per driver-year: where the ideal lap brakes (upper band, grey)
// against where the driver brakes (lower band, driver colour).

use dioxus::prelude::*;
use paddock_shared::scale::{BandScale, LinearScale};
use paddock_shared::schema::BrakingComparison;
use paddock_shared::transform::braking::{Segment, braking_rows, chart_height, distance_extent};
use paddock_shared::transform::nearest::nearest;

use super::{
    ChartFrame, DEFAULT_WIDTH, Margin, SeriesColors, fmt_tick, measured_width, swatch_legend,
    tooltip,
};

pub const MARGIN: Margin = Margin::new(12.0, 16.0, 28.0, 84.0);
const IDEAL_COLOR: &str = "#64748b";
/// Zero-length segments (a single braking sample) still get a visible tick.
const MIN_SEGMENT_PX: f64 = 2.0;

/// Height the braking tab uses for both of its charts.
pub fn comparison_height(data: &BrakingComparison) -> f64 {
    chart_height(data.len(), MARGIN.top + MARGIN.bottom)
}

/// Segment under `distance`, or the one starting nearest to it.
fn segment_at(segments: &[Segment], distance: f64) -> Option<Segment> {
    if let Some(s) = segments
        .iter()
        .find(|s| s.start <= distance && distance <= s.end)
    {
        return Some(*s);
    }
    nearest(segments, distance, |s| s.start).copied()
}

#[component]
pub fn BrakingComparisonChart(
    data: BrakingComparison,
    colors: SeriesColors,
    loading: bool,
) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut cursor = use_signal(|| None::<f64>);

    let rows = braking_rows(&data);
    let keys: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
    let height = comparison_height(&data);

    let w = width();
    let x = LinearScale::new(
        distance_extent(&data).unwrap_or((0.0, 1.0)),
        (MARGIN.left, MARGIN.left + MARGIN.inner_width(w)),
    )
    .nice(8);
    let band = BandScale::new(keys.iter().cloned(), (MARGIN.top, height - MARGIN.bottom))
        .padding(0.15);
    let half = band.bandwidth() / 2.0;
    let (x_left, x_right) = x.range();
    let axis_y = height - MARGIN.bottom;

    let seg_rect = |s: &Segment| {
        let sx = x.map(s.start);
        (sx, (x.map(s.end) - sx).max(MIN_SEGMENT_PX))
    };

    // (row top, label, ideal rects, driver rects, colour)
    type Rects = Vec<(f64, f64)>;
    let lanes: Vec<(f64, String, Rects, Rects, String)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let top = band.position(&row.key)?;
            Some((
                top,
                row.label.clone(),
                row.ideal.iter().map(seg_rect).collect(),
                row.driver.iter().map(seg_rect).collect(),
                colors.css(&row.key, i, &keys),
            ))
        })
        .collect();

    let x_ticks: Vec<(f64, String)> = x
        .ticks(8)
        .into_iter()
        .map(|t| (x.map(t), format!("{} m", fmt_tick(t))))
        .collect();

    let mut legend: Vec<(String, String)> = vec![("Ideal".to_string(), IDEAL_COLOR.to_string())];
    legend.extend(lanes.iter().map(|l| (l.1.clone(), l.4.clone())));

    let tip = cursor().map(|px| {
        let distance = x.invert(px);
        let mut lines = vec![(format!("{distance:.0} m"), None)];
        for (i, row) in rows.iter().enumerate() {
            let describe = |s: Option<Segment>| match s {
                Some(s) if s.start <= distance && distance <= s.end => {
                    format!("braking {:.0}-{:.0} m", s.start, s.end)
                }
                Some(s) => format!("next zone {:.0} m", s.start),
                None => "no braking".to_string(),
            };
            lines.push((
                format!(
                    "{}: driver {} / ideal {}",
                    row.label,
                    describe(segment_at(&row.driver, distance)),
                    describe(segment_at(&row.ideal, distance)),
                ),
                Some(colors.css(&row.key, i, &keys)),
            ));
        }
        let left = if px > x_right - 320.0 { px - 310.0 } else { px + 12.0 };
        tooltip(left, MARGIN.top, &lines)
    });

    rsx! {
        ChartFrame {
            title: "Braking comparison",
            loading,
            empty: rows.is_empty(),
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
                    view_box: "0 0 {w} {height}",

                    for (px, label) in x_ticks.iter() {
                        line { x1: "{px}", y1: "{MARGIN.top}", x2: "{px}", y2: "{axis_y}", stroke: "#1f2937", stroke_width: "1" }
                        text { x: "{px}", y: "{axis_y + 14.0}", fill: "#94a3b8", font_size: "10", text_anchor: "middle", "{label}" }
                    }
                    line { x1: "{x_left}", y1: "{axis_y}", x2: "{x_right}", y2: "{axis_y}", stroke: "#334155", stroke_width: "1" }

                    for (top, label, ideal, driver, color) in lanes.iter() {
                        text { x: "{MARGIN.left - 8.0}", y: "{top + half + 4.0}", fill: "#cbd5e1", font_size: "11", text_anchor: "end", "{label}" }
                        for (sx, sw) in ideal.iter() {
                            rect { x: "{sx}", y: "{top}", width: "{sw}", height: "{half - 1.0}", fill: IDEAL_COLOR, rx: "2" }
                        }
                        for (sx, sw) in driver.iter() {
                            rect { x: "{sx}", y: "{top + half + 1.0}", width: "{sw}", height: "{half - 1.0}", fill: "{color}", rx: "2" }
                        }
                    }

                    {cursor().map(|px| rsx! {
                        line { x1: "{px}", y1: "{MARGIN.top}", x2: "{px}", y2: "{axis_y}", stroke: "#e5e7eb", stroke_width: "1", stroke_dasharray: "3 3" }
                    })}
                }
                {tip}
            }
            {swatch_legend(&legend)}
        }
    }
}
