use dioxus::prelude::*;
use paddock_shared::DriverPalette;
use paddock_shared::color::legend_entries;

/// One colour block per selected driver-year.
#[component]
pub fn LegendBar(palette: DriverPalette, years: Vec<String>) -> Element {
    let entries = legend_entries(&palette, &years);

    if entries.is_empty() {
        return rsx! {
            div { style: "color:#64748b; font-size:12px;", "No drivers selected" }
        };
    }

    rsx! {
        div { style: "display:flex; flex-wrap:wrap; gap:8px; padding:6px 10px; background:rgba(2,6,23,0.75); border:1px solid #1f2937; border-radius:10px;",
            for entry in entries.iter() {
                div {
                    key: "{entry.key}",
                    style: "display:flex; align-items:center; gap:6px; font-size:12px; color:#cbd5f5;",
                    div { style: "width:14px; height:14px; border-radius:3px; background:{entry.color.to_css()};" }
                    "{entry.label}"
                }
            }
        }
    }
}
