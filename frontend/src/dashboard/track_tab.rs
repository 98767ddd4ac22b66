// frontend/src/dashboard/track_tab.rs

use dioxus::prelude::*;
use paddock_shared::schema::{AvgDiffPoint, LapGapData, TrackDominancePoint};

use super::charts::avg_diffs::AvgDiffsChart;
use super::charts::lap_gap::LapGapEvolutionChart;
use super::charts::track_dominance::TrackDominanceChart;
use super::{DashboardState, api, applied_query, series_colors};

#[component]
pub fn TrackTab() -> Element {
    let state = use_context::<DashboardState>();

    let mut dominance = use_signal(Vec::<TrackDominancePoint>::new);
    let mut diffs = use_signal(Vec::<AvgDiffPoint>::new);
    let mut gaps = use_signal(LapGapData::default);
    let mut dominance_loading = use_signal(|| false);
    let mut diffs_loading = use_signal(|| false);
    let mut gaps_loading = use_signal(|| false);

    // Runs on mount and on every Select.
    use_effect(move || {
        let generation = (state.refresh)();
        let Some(query) = applied_query(&state.applied.peek()) else {
            dominance.set(Vec::new());
            diffs.set(Vec::new());
            gaps.set(LapGapData::default());
            return;
        };
        log::info!("track tab refresh #{generation}");

        spawn(async move {
            dominance_loading.set(true);
            match api::fetch_track_dominance(&query).await {
                Ok(points) => dominance.set(points),
                Err(e) => log::error!("track dominance: {e}"),
            }
            dominance_loading.set(false);

            diffs_loading.set(true);
            match api::fetch_avg_diffs(&query).await {
                Ok(points) => diffs.set(points),
                Err(e) => log::error!("sector time loss: {e}"),
            }
            diffs_loading.set(false);

            gaps_loading.set(true);
            match api::fetch_lap_gap(&query).await {
                Ok(data) => gaps.set(data),
                Err(e) => log::error!("lap gap evolution: {e}"),
            }
            gaps_loading.set(false);
        });
    });

    let colors = series_colors(&state.applied.read(), *state.options.read());
    let diff_colors = {
        let mut c = colors.clone();
        c.options = c.options.with_baseline(false);
        c
    };

    rsx! {
        TrackDominanceChart { points: dominance(), colors: colors.clone(), loading: dominance_loading() }
        AvgDiffsChart { points: diffs(), colors: diff_colors, loading: diffs_loading() }
        LapGapEvolutionChart { data: gaps(), colors, loading: gaps_loading() }
    }
}
