// frontend/src/dashboard/mod.rs

pub mod api;
pub mod charts;
mod filter_menu;
mod legend;
mod braking_tab;
mod telemetry_tab;
mod track_tab;

use dioxus::prelude::*;
use dioxus_signals::Signal;
use paddock_shared::{
    ChartOptions, ColorMode, DriverPalette, FilterSelection, GroupBy, SessionQuery,
};

use braking_tab::BrakingTab;
use charts::SeriesColors;
use filter_menu::FilterMenu;
use legend::LegendBar;
use telemetry_tab::TelemetryTab;
use track_tab::TrackTab;

// ----------------------------
// Cross-platform persistence
//  - wasm32: localStorage
//  - native: JSON file in app data dir
// ----------------------------
mod persist {
    pub fn get_string(key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            use web_sys::window;
            let w = window()?;
            let ls = w.local_storage().ok()??;
            return ls.get_item(key).ok().flatten();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            match native::get_string(key) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("reading persisted {key:?} failed: {e}");
                    None
                }
            }
        }
    }

    pub fn set_string(key: &str, value: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            use web_sys::window;
            if let Some(w) = window()
                && let Ok(Some(ls)) = w.local_storage()
                && ls.set_item(key, value).is_err()
            {
                log::warn!("localStorage rejected {key:?}");
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(e) = native::set_string(key, value) {
                log::warn!("persisting {key:?} failed: {e}");
            }
        }
    }

    /// JSON-encoded value under `key`; anything unreadable counts as absent.
    pub fn get_json<T: serde::de::DeserializeOwned>(key: &str) -> Option<T> {
        let raw = get_string(key)?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("discarding persisted {key:?}: {e}");
                None
            }
        }
    }

    pub fn set_json<T: serde::Serialize>(key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(s) => set_string(key, &s),
            Err(e) => log::warn!("encoding {key:?} failed: {e}"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod native {
        use std::collections::HashMap;
        use std::io;

        fn storage_path() -> std::path::PathBuf {
            let mut base = dirs::data_local_dir()
                .or_else(dirs::data_dir)
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| ".".into()));
            base.push("paddock");
            base.push("storage.json");
            base
        }

        fn load_map() -> Result<HashMap<String, String>, io::Error> {
            let path = storage_path();
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
                Err(e) => return Err(e),
            };

            let map = serde_json::from_slice::<HashMap<String, String>>(&bytes).unwrap_or_default();
            Ok(map)
        }

        fn save_map(map: &HashMap<String, String>) -> Result<(), io::Error> {
            let path = storage_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let bytes = serde_json::to_vec_pretty(map).map_err(io::Error::other)?;
            std::fs::write(path, bytes)
        }

        pub fn get_string(key: &str) -> Result<Option<String>, io::Error> {
            let map = load_map()?;
            Ok(map.get(key).cloned())
        }

        pub fn set_string(key: &str, value: &str) -> Result<(), io::Error> {
            let mut map = load_map()?;
            map.insert(key.to_string(), value.to_string());
            save_map(&map)
        }
    }
}

// unified storage keys
const BASE_URL_STORAGE_KEY: &str = "paddock_base_url";
const MAIN_TAB_STORAGE_KEY: &str = "paddock_main_tab";
const SELECTION_STORAGE_KEY: &str = "paddock_selection";
const OPTIONS_STORAGE_KEY: &str = "paddock_chart_options";

// ---------- Base URL config ----------
pub struct UrlConfig;

impl UrlConfig {
    pub fn set_base_url_and_persist(url: String) {
        let clean = paddock_shared::api::normalize_base_url(&url);
        *BASE_URL.write() = clean.clone();
        persist::set_string(BASE_URL_STORAGE_KEY, &clean);
        log::info!("API base set to {clean}");
    }

    pub fn stored_base_url() -> Option<String> {
        persist::get_string(BASE_URL_STORAGE_KEY)
            .map(|s| paddock_shared::api::normalize_base_url(&s))
            .filter(|s| !s.is_empty())
    }

    /// Persisted value, then the build-time `PADDOCK_API_URL`, then the local default.
    pub fn base_http() -> String {
        if let Some(stored) = Self::stored_base_url() {
            return stored;
        }
        let current = BASE_URL.read().clone();
        if !current.is_empty() {
            return current;
        }
        option_env!("PADDOCK_API_URL")
            .map(paddock_shared::api::normalize_base_url)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| paddock_shared::api::DEFAULT_API_BASE.to_string())
    }
}

static BASE_URL: GlobalSignal<String> = Signal::global(String::new);

// ---------- Web vs Native logging ----------
fn console_line(level: log::Level, msg: &str) {
    #[cfg(target_arch = "wasm32")]
    match level {
        log::Level::Error => web_sys::console::error_1(&msg.into()),
        log::Level::Warn => web_sys::console::warn_1(&msg.into()),
        _ => web_sys::console::log_1(&msg.into()),
    }

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{level:<5} {msg}");
}

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            console_line(
                record.level(),
                &format!("[{}] {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Milliseconds on a clock good enough for request timings.
pub(crate) fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

// ---------- Shared dashboard state ----------

/// Provided as context by [`PaddockDashboard`]. The menu edits `draft`;
/// Select copies it into `applied` and bumps `refresh`, which the tabs watch.
#[derive(Clone, Copy)]
pub struct DashboardState {
    pub draft: Signal<FilterSelection>,
    pub applied: Signal<FilterSelection>,
    pub refresh: Signal<u64>,
    pub options: Signal<ChartOptions>,
}

impl DashboardState {
    pub fn apply(&mut self) {
        let sel = self.draft.peek().clone();
        persist::set_json(SELECTION_STORAGE_KEY, &sel);
        self.applied.set(sel);
        let next = *self.refresh.peek() + 1;
        self.refresh.set(next);
    }
}

/// Query for the applied selection; `None` (logged) when nothing can be asked.
pub(crate) fn applied_query(sel: &FilterSelection) -> Option<SessionQuery> {
    match SessionQuery::from_selection(sel) {
        Ok(q) => Some(q),
        Err(e) => {
            log::warn!("skipping fetch: {e}");
            None
        }
    }
}

/// Driver palette for the applied selection, in selection order.
pub(crate) fn palette_for(sel: &FilterSelection) -> DriverPalette {
    match SessionQuery::from_selection(sel) {
        Ok(q) => DriverPalette::assign(q.drivers),
        Err(_) => DriverPalette::default(),
    }
}

/// Colour source for charts rendered from the applied selection.
pub(crate) fn series_colors(sel: &FilterSelection, options: ChartOptions) -> SeriesColors {
    SeriesColors {
        palette: palette_for(sel),
        years: sel.years().to_vec(),
        options,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MainTab {
    Track,
    Braking,
    Telemetry,
}

fn main_tab_to_str(tab: MainTab) -> &'static str {
    match tab {
        MainTab::Track => "track",
        MainTab::Braking => "braking",
        MainTab::Telemetry => "telemetry",
    }
}

fn main_tab_from_str(s: &str) -> MainTab {
    match s {
        "braking" => MainTab::Braking,
        "telemetry" => MainTab::Telemetry,
        _ => MainTab::Track,
    }
}

#[component]
pub fn PaddockDashboard() -> Element {
    let initial_selection: FilterSelection =
        persist::get_json(SELECTION_STORAGE_KEY).unwrap_or_default();
    let initial_options: ChartOptions = persist::get_json(OPTIONS_STORAGE_KEY).unwrap_or_default();

    let draft = use_signal(|| initial_selection.clone());
    let applied = use_signal(|| initial_selection);
    let refresh = use_signal(|| 0_u64);
    let mut options = use_signal(|| initial_options);
    let mut state = use_context_provider(|| DashboardState {
        draft,
        applied,
        refresh,
        options,
    });

    let mut active_main_tab = use_signal(|| {
        persist::get_string(MAIN_TAB_STORAGE_KEY)
            .map(|s| main_tab_from_str(&s))
            .unwrap_or(MainTab::Track)
    });
    let mut menu_open = use_signal(|| false);

    use_effect(move || {
        persist::set_string(MAIN_TAB_STORAGE_KEY, main_tab_to_str(*active_main_tab.read()));
    });
    use_effect(move || {
        persist::set_json(OPTIONS_STORAGE_KEY, &*options.read());
    });

    let tab_style_active = |color: &str| {
        format!(
            "padding:0.4rem 0.8rem; border-radius:0.5rem;\
             border:1px solid {color}; background:#111827;\
             color:{color}; cursor:pointer;"
        )
    };
    let tab_style_inactive = "padding:0.4rem 0.8rem; border-radius:0.5rem;\
                             border:1px solid #4b5563; background:#020617;\
                             color:#e5e7eb; cursor:pointer;";

    let sel = applied.read().clone();
    let palette = palette_for(&sel);
    let opts = *options.read();
    let years_label = sel.years().join(", ");

    // Native-only CONNECT button
    let connect_button: Element = {
        #[cfg(target_arch = "wasm32")]
        {
            rsx! {}
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let nav = dioxus_router::use_navigator();
            rsx! {
                button {
                    style: "{tab_style_inactive}",
                    onclick: move |_| {
                        let _ = nav.push(crate::app::Route::Connect {});
                    },
                    "Connect"
                }
            }
        }
    };

    rsx! {
        div {
            style: "
                min-height:100vh;
                padding:24px;
                color:#e5e7eb;
                font-family:system-ui, -apple-system, BlinkMacSystemFont;
                background:#020617;
                display:flex;
                flex-direction:column;
                gap:12px;
            ",

            // Header row 1
            div {
                style: "display:flex; align-items:center; justify-content:space-between; gap:16px; flex-wrap:wrap;",
                div { style: "display:flex; align-items:center; gap:12px;",
                    button {
                        style: if menu_open() { tab_style_active("#f97316") } else { tab_style_inactive.to_string() },
                        onclick: move |_| menu_open.set(!menu_open()),
                        "Filters"
                    }
                    h1 { style: "color:#f97316; margin:0; font-size:22px; font-weight:800;", "Paddock" }
                    span { style: "color:#94a3b8; font-size:13px;",
                        "{sel.session_name()} · {sel.identifier().label()} · {years_label}"
                    }
                }
                div { style: "display:flex; align-items:center; gap:10px; flex-wrap:wrap;",
                    {connect_button}
                }
            }

            if menu_open() {
                FilterMenu {
                    on_select: move |_| {
                        state.apply();
                        menu_open.set(false);
                    },
                }
            }

            // Header row 2
            div {
                style: "
                    display:flex;
                    align-items:center;
                    justify-content:space-between;
                    gap:12px;
                    padding:0.85rem;
                    border-radius:0.75rem;
                    border:1px solid #4b5563;
                    flex-wrap:wrap;
                ",
                nav { style: "display:flex; gap:0.5rem; flex-wrap:wrap;",
                    button {
                        style: if *active_main_tab.read() == MainTab::Track { tab_style_active("#38bdf8") } else { tab_style_inactive.to_string() },
                        onclick: move |_| active_main_tab.set(MainTab::Track),
                        "Track Dominance"
                    }
                    button {
                        style: if *active_main_tab.read() == MainTab::Braking { tab_style_active("#ef4444") } else { tab_style_inactive.to_string() },
                        onclick: move |_| active_main_tab.set(MainTab::Braking),
                        "Braking"
                    }
                    button {
                        style: if *active_main_tab.read() == MainTab::Telemetry { tab_style_active("#22c55e") } else { tab_style_inactive.to_string() },
                        onclick: move |_| active_main_tab.set(MainTab::Telemetry),
                        "Telemetry"
                    }
                }

                div { style: "display:flex; gap:0.5rem; flex-wrap:wrap; align-items:center; font-size:12px; color:#94a3b8;",
                    span { "Colour" }
                    button {
                        style: if opts.color_mode == ColorMode::DriverYear { tab_style_active("#a78bfa") } else { tab_style_inactive.to_string() },
                        onclick: move |_| { let o = *options.peek(); options.set(o.colored_by(ColorMode::DriverYear)); },
                        "Driver"
                    }
                    button {
                        style: if opts.color_mode == ColorMode::Category { tab_style_active("#a78bfa") } else { tab_style_inactive.to_string() },
                        onclick: move |_| { let o = *options.peek(); options.set(o.colored_by(ColorMode::Category)); },
                        "Series"
                    }
                    span { style: "margin-left:8px;", "Shading" }
                    button {
                        style: if opts.group_by == GroupBy::DriverYear { tab_style_active("#facc15") } else { tab_style_inactive.to_string() },
                        onclick: move |_| { let o = *options.peek(); options.set(o.grouped_by(GroupBy::DriverYear)); },
                        "Per year"
                    }
                    button {
                        style: if opts.group_by == GroupBy::Driver { tab_style_active("#facc15") } else { tab_style_inactive.to_string() },
                        onclick: move |_| { let o = *options.peek(); options.set(o.grouped_by(GroupBy::Driver)); },
                        "Per driver"
                    }
                }
            }

            LegendBar { palette: palette.clone(), years: sel.years().to_vec() }

            div { style: "flex:1; display:flex; flex-direction:column; gap:16px;",
                {
                    match *active_main_tab.read() {
                        MainTab::Track => rsx! { TrackTab {} },
                        MainTab::Braking => rsx! { BrakingTab {} },
                        MainTab::Telemetry => rsx! { TelemetryTab {} },
                    }
                }
            }
        }
    }
}
