// frontend/src/dashboard/filter_menu.rs

use dioxus::prelude::*;
use paddock_shared::filter::{
    MAX_DRIVERS, MAX_YEARS, apply_limited, common_driver_names, common_session_names,
};
use paddock_shared::season::{SessionIdentifier, YEARS};

use super::DashboardState;

const SELECT_STYLE: &str = "padding:8px 10px; border-radius:10px; border:1px solid #334155;\
                            background:#020617; color:#e5e7eb; outline:none;";

fn chip_style(on: bool) -> &'static str {
    if on {
        "padding:0.3rem 0.65rem; border-radius:999px; border:1px solid #f97316;\
         background:#1c1917; color:#fdba74; cursor:pointer; font-size:12px;"
    } else {
        "padding:0.3rem 0.65rem; border-radius:999px; border:1px solid #334155;\
         background:#020617; color:#cbd5e1; cursor:pointer; font-size:12px;"
    }
}

/// Toggle `item` in `current`; additions past `max` evict the oldest choice.
fn toggled(current: &[String], item: &str, max: usize) -> Vec<String> {
    if current.iter().any(|c| c == item) {
        return current.iter().filter(|c| *c != item).cloned().collect();
    }
    let mut requested = current.to_vec();
    requested.push(item.to_string());
    apply_limited(current, &requested, max)
}

#[component]
fn MultiSelect(
    label: String,
    options: Vec<String>,
    selected: Vec<String>,
    max: usize,
    on_change: EventHandler<Vec<String>>,
) -> Element {
    let count = selected.len();

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:6px;",
            div { style: "color:#94a3b8; font-size:12px;", "{label} ({count}/{max})" }
            if options.is_empty() {
                div { style: "color:#64748b; font-size:12px;", "Nothing available for the selected years" }
            }
            div { style: "display:flex; flex-wrap:wrap; gap:6px;",
                for opt in options.iter().cloned() {
                    button {
                        key: "{opt}",
                        style: chip_style(selected.contains(&opt)),
                        onclick: {
                            let selected = selected.clone();
                            let opt = opt.clone();
                            move |_| on_change.call(toggled(&selected, &opt, max))
                        },
                        "{opt}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn FilterMenu(on_select: EventHandler<()>) -> Element {
    let state = use_context::<DashboardState>();
    let mut draft = state.draft;

    let sel = draft.read().clone();
    let session_names = common_session_names(sel.years());
    let driver_names = common_driver_names(sel.years());
    let all_years: Vec<String> = YEARS.iter().map(|y| y.to_string()).collect();
    let ready = sel.is_ready();

    rsx! {
        div {
            style: "
                display:flex;
                flex-direction:column;
                gap:14px;
                padding:16px;
                border-radius:14px;
                border:1px solid #334155;
                background:#0b1220;
            ",

            MultiSelect {
                label: "Season",
                options: all_years,
                selected: sel.years().to_vec(),
                max: MAX_YEARS,
                on_change: move |years: Vec<String>| {
                    let next = draft.peek().with_years(years);
                    draft.set(next);
                },
            }

            div { style: "display:flex; gap:16px; flex-wrap:wrap; align-items:flex-end;",
                div { style: "display:flex; flex-direction:column; gap:6px;",
                    div { style: "color:#94a3b8; font-size:12px;", "Grand Prix" }
                    select {
                        style: "{SELECT_STYLE} min-width:240px;",
                        value: "{sel.session_name()}",
                        onchange: move |evt| {
                            let next = draft.peek().with_session_name(&evt.value());
                            draft.set(next);
                        },
                        option { value: "", disabled: true, selected: sel.session_name().is_empty(), "Select a session" }
                        for name in session_names.iter() {
                            option {
                                key: "{name}",
                                value: "{name}",
                                selected: name == sel.session_name(),
                                "{name}"
                            }
                        }
                    }
                }

                div { style: "display:flex; flex-direction:column; gap:6px;",
                    div { style: "color:#94a3b8; font-size:12px;", "Session" }
                    select {
                        style: "{SELECT_STYLE} min-width:140px;",
                        onchange: move |evt| {
                            if let Some(id) = SessionIdentifier::from_label(&evt.value()) {
                                let next = draft.peek().with_identifier(id);
                                draft.set(next);
                            }
                        },
                        for id in SessionIdentifier::ALL {
                            option {
                                key: "{id.label()}",
                                value: "{id.label()}",
                                selected: id == sel.identifier(),
                                "{id.label()}"
                            }
                        }
                    }
                }
            }

            MultiSelect {
                label: "Drivers",
                options: driver_names,
                selected: sel.drivers().to_vec(),
                max: MAX_DRIVERS,
                on_change: move |drivers: Vec<String>| {
                    let next = draft.peek().with_drivers(drivers);
                    draft.set(next);
                },
            }

            div { style: "display:flex; justify-content:flex-end;",
                button {
                    style: if ready {
                        "padding:10px 18px; border-radius:12px; border:1px solid #f97316; background:#7c2d12; color:#ffedd5; cursor:pointer; font-weight:700;"
                    } else {
                        "padding:10px 18px; border-radius:12px; border:1px solid #334155; background:#0f172a; color:#64748b; cursor:not-allowed; font-weight:700;"
                    },
                    disabled: !ready,
                    onclick: move |_| on_select.call(()),
                    "Select"
                }
            }
        }
    }
}
