// frontend/src/dashboard/charts/braking_distribution.rs
//
// Box plot of braking distances per driver-year.

use dioxus::prelude::*;
use paddock_shared::scale::{BandScale, LinearScale};
use paddock_shared::schema::BrakingDistributionPoint;
use paddock_shared::transform::boxplot::{box_plot_groups, value_extent};

use super::{ChartFrame, DEFAULT_WIDTH, Margin, SeriesColors, fmt_tick, measured_width, tooltip};

const MARGIN: Margin = Margin::new(12.0, 16.0, 28.0, 52.0);

#[component]
pub fn BrakingDistributionChart(
    points: Vec<BrakingDistributionPoint>,
    colors: SeriesColors,
    loading: bool,
    height: f64,
) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut hovered = use_signal(|| None::<usize>);

    let groups = box_plot_groups(&points);
    let keys: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();

    let w = width();
    let (x_left, x_right) = (MARGIN.left, MARGIN.left + MARGIN.inner_width(w));
    let band = BandScale::new(keys.iter().cloned(), (x_left, x_right)).padding(0.3);
    let y = LinearScale::new(
        value_extent(&groups).unwrap_or((0.0, 1.0)),
        (height - MARGIN.bottom, MARGIN.top),
    )
    .nice(5);
    let axis_y = height - MARGIN.bottom;
    let bw = band.bandwidth();

    struct BoxMark {
        x: f64,
        center: f64,
        q1: f64,
        q3: f64,
        median: f64,
        min: f64,
        max: f64,
        color: String,
        label: String,
    }

    let marks: Vec<BoxMark> = groups
        .iter()
        .enumerate()
        .filter_map(|(i, g)| {
            let x = band.position(&g.key)?;
            let label = match &g.year {
                Some(year) => format!("{} {}", g.driver, year),
                None => g.driver.clone(),
            };
            Some(BoxMark {
                x,
                center: x + bw / 2.0,
                q1: y.map(g.stats.q1),
                q3: y.map(g.stats.q3),
                median: y.map(g.stats.median),
                min: y.map(g.stats.min),
                max: y.map(g.stats.max),
                color: colors.css(&g.key, i, &keys),
                label,
            })
        })
        .collect();

    let y_ticks: Vec<(f64, String)> = y
        .ticks(5)
        .into_iter()
        .map(|t| (y.map(t), fmt_tick(t)))
        .collect();

    let tip = hovered().and_then(|i| {
        let g = groups.get(i)?;
        let m = marks.get(i)?;
        let s = g.stats;
        Some(tooltip(
            m.x + bw + 6.0,
            m.q3,
            &[
                (m.label.clone(), Some(m.color.clone())),
                (format!("laps: {}", g.count), None),
                (format!("max: {:.1} m", s.max), None),
                (format!("q3: {:.1} m", s.q3), None),
                (format!("median: {:.1} m", s.median), None),
                (format!("q1: {:.1} m", s.q1), None),
                (format!("min: {:.1} m", s.min), None),
            ],
        ))
    });

    rsx! {
        ChartFrame {
            title: "Braking distance distribution",
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
                    view_box: "0 0 {w} {height}",

                    for (py, label) in y_ticks.iter() {
                        line { x1: "{x_left}", y1: "{py}", x2: "{x_right}", y2: "{py}", stroke: "#1f2937", stroke_width: "1" }
                        text { x: "{x_left - 6.0}", y: "{py + 3.0}", fill: "#94a3b8", font_size: "10", text_anchor: "end", "{label} m" }
                    }
                    line { x1: "{x_left}", y1: "{axis_y}", x2: "{x_right}", y2: "{axis_y}", stroke: "#334155", stroke_width: "1" }

                    for (i, m) in marks.iter().enumerate() {
                        g {
                            key: "{i}",
                            onmouseenter: move |_| hovered.set(Some(i)),
                            // whisker
                            line { x1: "{m.center}", y1: "{m.max}", x2: "{m.center}", y2: "{m.min}", stroke: "{m.color}", stroke_width: "1.5" }
                            line { x1: "{m.center - bw / 4.0}", y1: "{m.max}", x2: "{m.center + bw / 4.0}", y2: "{m.max}", stroke: "{m.color}", stroke_width: "1.5" }
                            line { x1: "{m.center - bw / 4.0}", y1: "{m.min}", x2: "{m.center + bw / 4.0}", y2: "{m.min}", stroke: "{m.color}", stroke_width: "1.5" }
                            rect {
                                x: "{m.x}", y: "{m.q3}", width: "{bw}", height: "{(m.q1 - m.q3).max(1.0)}",
                                fill: "{m.color}",
                                fill_opacity: if hovered() == Some(i) { "0.55" } else { "0.35" },
                                stroke: "{m.color}", stroke_width: "1.5",
                            }
                            line { x1: "{m.x}", y1: "{m.median}", x2: "{m.x + bw}", y2: "{m.median}", stroke: "#e5e7eb", stroke_width: "2" }
                            text { x: "{m.center}", y: "{axis_y + 14.0}", fill: "#cbd5e1", font_size: "10", text_anchor: "middle", "{m.label}" }
                        }
                    }
                }
                {tip}
            }
        }
    }
}
