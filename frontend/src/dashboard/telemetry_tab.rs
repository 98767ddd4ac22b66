// frontend/src/dashboard/telemetry_tab.rs

use dioxus::prelude::*;
use paddock_shared::schema::{GearSample, Telemetry};
use paddock_shared::transform::telemetry::metric_charts;

use super::charts::gear_map::GearMapChart;
use super::charts::telemetry_line::TelemetryLineChart;
use super::{DashboardState, api, applied_query, series_colors};

#[component]
pub fn TelemetryTab() -> Element {
    let state = use_context::<DashboardState>();

    let mut telemetry = use_signal(Telemetry::default);
    let mut gears = use_signal(Vec::<GearSample>::new);
    let mut gear_title = use_signal(|| "Gear map".to_string());
    let mut telemetry_loading = use_signal(|| false);
    let mut gears_loading = use_signal(|| false);

    use_effect(move || {
        let generation = (state.refresh)();
        let Some(query) = applied_query(&state.applied.peek()) else {
            telemetry.set(Telemetry::default());
            gears.set(Vec::new());
            return;
        };
        log::info!("telemetry tab refresh #{generation}");

        // Gear data is requested for the first selected year and driver only.
        let lap = match (query.years.first(), query.drivers.first()) {
            (Some(year), Some(code)) => format!("Gear map · {} {year}", code.as_str()),
            _ => "Gear map".to_string(),
        };

        spawn(async move {
            telemetry_loading.set(true);
            match api::fetch_telemetry(&query).await {
                Ok(data) => telemetry.set(data),
                Err(e) => log::error!("telemetry: {e}"),
            }
            telemetry_loading.set(false);

            gears_loading.set(true);
            match api::fetch_gear_data(&query).await {
                Ok(samples) => {
                    gears.set(samples);
                    gear_title.set(lap);
                }
                Err(e) => log::error!("gear map: {e}"),
            }
            gears_loading.set(false);
        });
    });

    let colors = series_colors(&state.applied.read(), *state.options.read());
    let charts = metric_charts(&telemetry.read());

    rsx! {
        for chart in charts {
            TelemetryLineChart {
                key: "{chart.metric.label()}",
                chart: chart.clone(),
                colors: colors.clone(),
                loading: telemetry_loading(),
            }
        }
        GearMapChart { samples: gears(), loading: gears_loading(), title: gear_title() }
    }
}
