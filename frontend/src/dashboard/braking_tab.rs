// frontend/src/dashboard/braking_tab.rs

use dioxus::prelude::*;
use paddock_shared::schema::{BrakingComparison, BrakingDistributionPoint};

use super::charts::braking_comparison::{BrakingComparisonChart, comparison_height};
use super::charts::braking_distribution::BrakingDistributionChart;
use super::{DashboardState, api, applied_query, series_colors};

#[component]
pub fn BrakingTab() -> Element {
    let state = use_context::<DashboardState>();

    let mut comparison = use_signal(BrakingComparison::default);
    let mut distribution = use_signal(Vec::<BrakingDistributionPoint>::new);
    let mut comparison_loading = use_signal(|| false);
    let mut distribution_loading = use_signal(|| false);

    use_effect(move || {
        let generation = (state.refresh)();
        let Some(query) = applied_query(&state.applied.peek()) else {
            comparison.set(BrakingComparison::default());
            distribution.set(Vec::new());
            return;
        };
        log::info!("braking tab refresh #{generation}");

        spawn(async move {
            comparison_loading.set(true);
            match api::fetch_braking_comparison(&query).await {
                Ok(data) => comparison.set(data),
                Err(e) => log::error!("braking comparison: {e}"),
            }
            comparison_loading.set(false);

            distribution_loading.set(true);
            match api::fetch_braking_distribution(&query).await {
                Ok(points) => distribution.set(points),
                Err(e) => log::error!("braking distribution: {e}"),
            }
            distribution_loading.set(false);
        });
    });

    let colors = series_colors(&state.applied.read(), *state.options.read());
    // The distribution mirrors the comparison's height so the rows line up.
    let height = comparison_height(&comparison.read());

    rsx! {
        div { style: "display:grid; grid-template-columns:repeat(auto-fit, minmax(420px, 1fr)); gap:16px; align-items:start;",
            BrakingComparisonChart { data: comparison(), colors: colors.clone(), loading: comparison_loading() }
            BrakingDistributionChart { points: distribution(), colors, loading: distribution_loading(), height }
        }
    }
}
