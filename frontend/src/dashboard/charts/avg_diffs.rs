// frontend/src/dashboard/charts/avg_diffs.rs
//
// Signed grouped bars: average time lost per sector type, one bar per
// driver-year, the fastest driver-year named in the title.

use dioxus::prelude::*;
use paddock_shared::GroupBy;
use paddock_shared::driver::driver_year_key;
use paddock_shared::scale::{BandScale, LinearScale};
use paddock_shared::schema::AvgDiffPoint;
use paddock_shared::transform::sector_diff::{SECTORS, sector_diff_chart, years_by_driver};

use super::{
    ChartFrame, DEFAULT_WIDTH, Margin, SeriesColors, fmt_tick, measured_width, swatch_legend,
    tooltip,
};

const HEIGHT: f64 = 340.0;
const MARGIN: Margin = Margin::new(16.0, 16.0, 28.0, 52.0);

/// Bar order inside a sector: sorted keys, or driver-major when grouping by driver.
fn ordered_keys(keys: &[String], group_by: GroupBy) -> Vec<String> {
    match group_by {
        GroupBy::DriverYear => keys.to_vec(),
        GroupBy::Driver => years_by_driver(keys)
            .into_iter()
            .flat_map(|(code, years)| {
                years
                    .into_iter()
                    .map(move |year| driver_year_key(&code, &year))
            })
            .filter(|k| keys.contains(k))
            .collect(),
    }
}

#[component]
pub fn AvgDiffsChart(points: Vec<AvgDiffPoint>, colors: SeriesColors, loading: bool) -> Element {
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut hovered = use_signal(|| None::<(usize, usize)>);

    let chart = sector_diff_chart(&points, colors.options.show_baseline);
    let keys = ordered_keys(&chart.keys, colors.options.group_by);

    let w = width();
    let (x0, x1) = (MARGIN.left, MARGIN.left + MARGIN.inner_width(w));
    let (y_bottom, y_top) = (HEIGHT - MARGIN.bottom, MARGIN.top);

    let outer = BandScale::new(SECTORS, (x0, x1)).padding(0.2);
    let inner = BandScale::new(keys.iter().cloned(), (0.0, outer.bandwidth())).padding(0.05);
    let y = LinearScale::new(chart.y_domain, (y_bottom, y_top)).nice(5);
    let zero = y.map(0.0);

    // (sector index, key index, x, y, w, h, colour)
    let mut bars: Vec<(usize, usize, f64, f64, f64, f64, String)> = Vec::new();
    for (si, row) in chart.rows.iter().enumerate() {
        let Some(gx) = outer.position(row.sector) else {
            continue;
        };
        for (ki, key) in keys.iter().enumerate() {
            let Some(bx) = inner.position(key) else {
                continue;
            };
            let v = row
                .values
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v)
                .unwrap_or(0.0);
            let vy = y.map(v);
            bars.push((
                si,
                ki,
                gx + bx,
                vy.min(zero),
                inner.bandwidth(),
                (vy - zero).abs(),
                colors.css(key, ki, &keys),
            ));
        }
    }

    let y_ticks: Vec<(f64, String)> = y
        .ticks(5)
        .into_iter()
        .map(|t| (y.map(t), fmt_tick(t)))
        .collect();
    let sector_labels: Vec<(f64, &str)> = SECTORS
        .iter()
        .filter_map(|s| Some((outer.position(s)? + outer.bandwidth() / 2.0, *s)))
        .collect();
    let legend: Vec<(String, String)> = keys
        .iter()
        .enumerate()
        .map(|(i, k)| (k.clone(), colors.css(k, i, &keys)))
        .collect();

    let tip = hovered().and_then(|(si, ki)| {
        let row = chart.rows.get(si)?;
        let key = keys.get(ki)?;
        let (_, v) = row.values.iter().find(|(k, _)| k == key)?;
        let bar = bars.iter().find(|b| b.0 == si && b.1 == ki)?;
        Some(tooltip(
            bar.2 + bar.4 + 6.0,
            bar.3,
            &[
                (row.sector.to_string(), None),
                (format!("{key}: {v:+.3} s"), Some(bar.6.clone())),
            ],
        ))
    });

    rsx! {
        ChartFrame {
            title: "{chart.title}",
            loading,
            empty: chart.is_empty(),
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

                    for (py, label) in y_ticks.iter() {
                        line { x1: "{x0}", y1: "{py}", x2: "{x1}", y2: "{py}", stroke: "#1f2937", stroke_width: "1" }
                        text { x: "{x0 - 6.0}", y: "{py + 3.0}", fill: "#94a3b8", font_size: "10", text_anchor: "end", "{label}" }
                    }
                    text {
                        x: "12", y: "{(y_top + y_bottom) / 2.0}",
                        fill: "#94a3b8", font_size: "10", text_anchor: "middle",
                        transform: "rotate(-90 12 {(y_top + y_bottom) / 2.0})",
                        "seconds lost"
                    }

                    for (si, ki, bx, by, bw, bh, color) in bars.iter().cloned() {
                        rect {
                            key: "{si}-{ki}",
                            x: "{bx}", y: "{by}", width: "{bw}", height: "{bh.max(1.0)}",
                            fill: "{color}",
                            opacity: if hovered() == Some((si, ki)) { "1" } else { "0.85" },
                            onmouseenter: move |_| hovered.set(Some((si, ki))),
                        }
                    }

                    line { x1: "{x0}", y1: "{zero}", x2: "{x1}", y2: "{zero}", stroke: "#e5e7eb", stroke_width: "1" }

                    for (lx, label) in sector_labels.iter() {
                        text { x: "{lx}", y: "{y_bottom + 16.0}", fill: "#cbd5e1", font_size: "11", text_anchor: "middle", "{label}" }
                    }
                }
                {tip}
            }
            {swatch_legend(&legend)}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_grouping_puts_years_of_a_driver_together() {
        let keys: Vec<String> = ["LEC_2022", "VER_2021", "LEC_2021", "VER_2022"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ordered_keys(&keys, GroupBy::DriverYear), keys);
        assert_eq!(
            ordered_keys(&keys, GroupBy::Driver),
            ["LEC_2021", "LEC_2022", "VER_2021", "VER_2022"]
        );
    }
}
