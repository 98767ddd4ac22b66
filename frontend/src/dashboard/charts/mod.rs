// frontend/src/dashboard/charts/mod.rs
//
// SVG chart components. Every chart is a pure function of its data, the
// measured container width and the chart options; the marks are rebuilt on
// each render. Layout math and data shaping live in `paddock_shared`.

pub mod avg_diffs;
pub mod braking_comparison;
pub mod braking_distribution;
pub mod gear_map;
pub mod lap_gap;
pub mod telemetry_line;
pub mod track_dominance;

use dioxus::prelude::*;
use paddock_shared::color::{GRAY_SENTINEL, category_color, year_shade};
use paddock_shared::driver::split_driver_year;
use paddock_shared::scale::LinearScale;
use paddock_shared::transform::sector_diff::years_by_driver;
use paddock_shared::{ChartOptions, ColorMode, DriverPalette, GroupBy, Rgb};

/// Width used until the first resize event reports the real one.
pub const DEFAULT_WIDTH: f64 = 960.0;
pub const MIN_WIDTH: f64 = 320.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn inner_width(&self, width: f64) -> f64 {
        (width - self.left - self.right).max(1.0)
    }

    pub fn inner_height(&self, height: f64) -> f64 {
        (height - self.top - self.bottom).max(1.0)
    }
}

/// Content-box width reported by `onresize`, floored at [`MIN_WIDTH`].
pub fn measured_width(evt: &Event<ResizeData>) -> Option<f64> {
    evt.get_content_box_size()
        .ok()
        .map(|size| size.width)
        .filter(|w| w.is_finite() && *w > 0.0)
        .map(|w| w.max(MIN_WIDTH))
}

/// Colour source shared by every chart of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColors {
    pub palette: DriverPalette,
    pub years: Vec<String>,
    pub options: ChartOptions,
}

impl SeriesColors {
    /// Colour for the `index`-th series `key` among `keys`.
    pub fn color(&self, key: &str, index: usize, keys: &[String]) -> Rgb {
        match self.options.color_mode {
            ColorMode::Category => category_color(index),
            ColorMode::DriverYear => match self.options.group_by {
                GroupBy::DriverYear => self.palette.key_color(key, &self.years),
                GroupBy::Driver => self.driver_shade(key, keys),
            },
        }
    }

    pub fn css(&self, key: &str, index: usize, keys: &[String]) -> String {
        self.color(key, index, keys).to_css()
    }

    fn driver_shade(&self, key: &str, keys: &[String]) -> Rgb {
        let Some((code, year)) = split_driver_year(key) else {
            return self.palette.key_color(key, &self.years);
        };
        let Some(base) = self.palette.base_color(code) else {
            log::warn!("no colour assigned for driver code {code:?}");
            return GRAY_SENTINEL;
        };
        years_by_driver(keys)
            .into_iter()
            .find(|(c, _)| c == code)
            .and_then(|(_, years)| {
                let idx = years.iter().position(|y| y == year)?;
                Some(year_shade(base, idx, years.len()))
            })
            .unwrap_or(base)
    }
}

pub fn fmt_tick(v: f64) -> String {
    if v == v.trunc() || v.abs() >= 100.0 {
        format!("{v:.0}")
    } else if v.abs() >= 1.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.2}")
    }
}

/// Card with title plus the loading and no-data states.
#[component]
pub fn ChartFrame(title: String, loading: bool, empty: bool, children: Element) -> Element {
    rsx! {
        div { style: "width:100%; background:#020617; border-radius:14px; border:1px solid #334155; padding:12px; display:flex; flex-direction:column; gap:8px;",
            div { style: "color:#94a3b8; font-size:13px; font-weight:600;", "{title}" }
            if loading {
                div { style: "display:flex; align-items:center; justify-content:center; gap:10px; height:160px; color:#94a3b8; font-size:12px;",
                    div { style: "width:22px; height:22px; border-radius:50%; border:3px solid #334155; border-top-color:#f97316; animation:paddock-spin 0.9s linear infinite;" }
                    "Loading..."
                }
            } else if empty {
                div { style: "display:flex; align-items:center; justify-content:center; height:160px; color:#64748b; font-size:12px;",
                    "No data for this selection yet"
                }
            } else {
                {children}
            }
        }
    }
}

/// Gridlines, axes and tick labels for a pair of linear scales.
pub fn grid_and_axes(
    x: &LinearScale,
    y: &LinearScale,
    x_ticks: usize,
    y_ticks: usize,
    x_unit: &str,
) -> Element {
    let (left, right) = x.range();
    let (bottom, top) = y.range();
    let xs: Vec<(f64, String)> = x
        .ticks(x_ticks)
        .into_iter()
        .map(|t| (x.map(t), format!("{}{x_unit}", fmt_tick(t))))
        .collect();
    let ys: Vec<(f64, String)> = y
        .ticks(y_ticks)
        .into_iter()
        .map(|t| (y.map(t), fmt_tick(t)))
        .collect();

    rsx! {
        for (py, _) in ys.iter() {
            line { x1: "{left}", y1: "{py}", x2: "{right}", y2: "{py}", stroke: "#1f2937", stroke_width: "1" }
        }
        for (px, _) in xs.iter() {
            line { x1: "{px}", y1: "{top}", x2: "{px}", y2: "{bottom}", stroke: "#1f2937", stroke_width: "1" }
        }

        line { x1: "{left}", y1: "{top}", x2: "{left}", y2: "{bottom}", stroke: "#334155", stroke_width: "1" }
        line { x1: "{left}", y1: "{bottom}", x2: "{right}", y2: "{bottom}", stroke: "#334155", stroke_width: "1" }

        for (py, label) in ys.iter() {
            text { x: "{left - 6.0}", y: "{py + 3.0}", fill: "#94a3b8", font_size: "10", text_anchor: "end", "{label}" }
        }
        for (px, label) in xs.iter() {
            text { x: "{px}", y: "{bottom + 14.0}", fill: "#94a3b8", font_size: "10", text_anchor: "middle", "{label}" }
        }
    }
}

/// Absolutely positioned hover box; `lines[0]` is the heading.
pub fn tooltip(left: f64, top: f64, lines: &[(String, Option<String>)]) -> Element {
    rsx! {
        div {
            style: "position:absolute; left:{left}px; top:{top}px; pointer-events:none; padding:6px 8px; border-radius:8px; border:1px solid #334155; background:rgba(2,6,23,0.92); color:#e5e7eb; font-size:11px; white-space:nowrap; z-index:5;",
            for (i, (label, color)) in lines.iter().enumerate() {
                div { style: "display:flex; align-items:center; gap:6px;",
                    {color.as_ref().map(|c| rsx! {
                        span { style: "width:8px; height:8px; border-radius:2px; background:{c};" }
                    })}
                    if i == 0 {
                        b { "{label}" }
                    } else {
                        span { "{label}" }
                    }
                }
            }
        }
    }
}

/// Swatch legend under a chart.
pub fn swatch_legend(items: &[(String, String)]) -> Element {
    rsx! {
        if !items.is_empty() {
            div { style: "display:flex; flex-wrap:wrap; gap:8px; padding:6px 10px; background:rgba(2,6,23,0.75); border:1px solid #1f2937; border-radius:10px;",
                for (label, color) in items.iter() {
                    div { style: "display:flex; align-items:center; gap:6px; font-size:12px; color:#cbd5f5;",
                        svg { width: "26", height: "8", view_box: "0 0 26 8",
                            line { x1: "1", y1: "4", x2: "25", y2: "4", stroke: "{color}", stroke_width: "3", stroke_linecap: "round" }
                        }
                        "{label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_shared::name_to_code;

    fn colors(options: ChartOptions) -> SeriesColors {
        SeriesColors {
            palette: DriverPalette::assign(
                ["Max Verstappen", "Lando Norris"].into_iter().filter_map(name_to_code),
            ),
            years: vec!["2023".into(), "2024".into()],
            options,
        }
    }

    #[test]
    fn driver_year_mode_uses_the_palette() {
        let c = colors(ChartOptions::default());
        let keys = vec!["VER_2023".to_string(), "NOR_2023".to_string()];
        assert_eq!(c.color("VER_2023", 1, &keys), c.palette.key_color("VER_2023", &c.years));
        assert_ne!(c.color("VER_2023", 0, &keys), c.color("NOR_2023", 1, &keys));
    }

    #[test]
    fn category_mode_ignores_keys() {
        let c = colors(ChartOptions::default().colored_by(ColorMode::Category));
        assert_eq!(c.color("VER_2023", 2, &[]), category_color(2));
    }

    #[test]
    fn driver_grouping_shades_years_of_one_hue() {
        let c = colors(ChartOptions::default().grouped_by(GroupBy::Driver));
        let keys = vec!["VER_2023".to_string(), "VER_2024".to_string()];
        let a = c.color("VER_2023", 0, &keys);
        let b = c.color("VER_2024", 1, &keys);
        assert_ne!(a, b);
        let (ha, hb) = (a.to_hsl().h_deg, b.to_hsl().h_deg);
        assert!((ha - hb).abs() < 2.0);
    }

    #[test]
    fn ticks_format_compactly() {
        assert_eq!(fmt_tick(300.0), "300");
        assert_eq!(fmt_tick(2.5), "2.5");
        assert_eq!(fmt_tick(-0.05), "-0.05");
    }
}
