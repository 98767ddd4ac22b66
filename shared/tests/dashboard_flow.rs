// End-to-end flows through selection -> query -> decode -> transform.

use paddock_shared::api::{Endpoint, QueryError, SessionQuery};
use paddock_shared::color::{DriverPalette, GRAY_SENTINEL, legend_entries};
use paddock_shared::filter::{FilterSelection, MAX_DRIVERS, MAX_YEARS, apply_limited};
use paddock_shared::schema::{self, DecodeError};
use paddock_shared::season::SessionIdentifier;
use paddock_shared::transform::{boxplot, braking, minisector, sector_diff};

fn bahrain_2023() -> FilterSelection {
    FilterSelection::new(
        ["2023"],
        "Bahrain Grand Prix",
        SessionIdentifier::from_label("Race").unwrap(),
        ["Max Verstappen", "Lando Norris"],
    )
}

#[test]
fn bahrain_track_dominance_flow() {
    let sel = bahrain_2023();
    assert!(sel.is_ready());

    let query = SessionQuery::from_selection(&sel).unwrap();
    let path = query.path_and_query(Endpoint::TrackDominance);
    assert!(path.starts_with("/track-dominance?"));
    assert!(path.contains("identifier=R"));
    assert!(path.contains("drivers=VER&drivers=NOR"));

    let body = r#"[
        {"x":0,"y":0,"minisector":0,"fastest_driver":"VER_2023"},
        {"x":1,"y":1,"minisector":0,"fastest_driver":"VER_2023"},
        {"x":2,"y":1,"minisector":1,"fastest_driver":"NOR_2023"},
        {"x":3,"y":0,"minisector":1,"fastest_driver":"NOR_2023"},
        {"x":4,"y":-1,"minisector":2,"fastest_driver":"VER_2023"}
    ]"#;
    let points = schema::decode_track_dominance(body).unwrap();
    let runs = minisector::minisector_runs(&points);
    assert_eq!(runs.len(), 3);

    let legend = minisector::dominance_legend(&runs);
    assert_eq!(legend, ["VER_2023", "NOR_2023"]);

    let palette = DriverPalette::assign(query.drivers.iter().cloned());
    let entries = legend_entries(&palette, sel.years());
    assert_eq!(entries.len(), 2);
    for key in &legend {
        assert_ne!(palette.key_color(key, sel.years()), GRAY_SENTINEL);
    }
}

#[test]
fn unmapped_driver_short_circuits_without_panicking() {
    let sel = bahrain_2023().with_drivers(["Nobody Atall"]);
    // not on the 2023 roster, so the selection itself drops it
    assert!(sel.drivers().is_empty());
    assert_eq!(SessionQuery::from_selection(&sel), Err(QueryError::NoDrivers));

    let palette = DriverPalette::assign(Vec::new());
    assert_eq!(palette.key_color("ZZZ_2023", sel.years()), GRAY_SENTINEL);
}

#[test]
fn braking_flow_from_wire_to_rows() {
    let body = r#"{
        "2023_VER":[
            {"distance":0,"ideal_brake":0,"driver_brake":0},
            {"distance":10,"ideal_brake":1,"driver_brake":1},
            {"distance":20,"ideal_brake":1,"driver_brake":1},
            {"distance":30,"ideal_brake":0,"driver_brake":0},
            {"distance":40,"ideal_brake":1,"driver_brake":0},
            {"distance":50,"ideal_brake":0,"driver_brake":0}
        ]
    }"#;
    let cmp = schema::decode_braking_comparison(body).unwrap();
    let rows = braking::braking_rows(&cmp);
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].ideal,
        vec![
            braking::Segment { start: 10.0, end: 20.0 },
            braking::Segment { start: 40.0, end: 40.0 },
        ]
    );
    assert_eq!(rows[0].driver, vec![braking::Segment { start: 10.0, end: 20.0 }]);
}

#[test]
fn braking_error_body_is_not_a_schema_failure() {
    let err = schema::decode_braking_comparison(r#"{"error":"No valid laps found"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::Backend { .. }));
}

#[test]
fn distribution_flow_from_wrapped_body() {
    let values = [10, 12, 14, 16, 18, 20, 22];
    let items: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(lap, d)| {
            format!(r#"{{"braking_distance":{d},"driver":"VER","year":2023,"lap":{lap}}}"#)
        })
        .collect();
    let body = format!(r#"{{"data":[{}]}}"#, items.join(","));

    let points = schema::decode_braking_distribution(&body).unwrap();
    let groups = boxplot::box_plot_groups(&points);
    let s = groups[0].stats;
    assert_eq!((s.q1, s.median, s.q3, s.min, s.max), (13.0, 16.0, 19.0, 10.0, 22.0));
}

#[test]
fn avg_diff_flow_names_baseline() {
    let sel = bahrain_2023().with_years(["2023", "2024"]);
    let query = SessionQuery::from_selection(&sel).unwrap();
    assert!(
        query
            .path_and_query(Endpoint::AvgDiff)
            .contains("session_years=2023&session_years=2024")
    );

    let body = r#"[
        {"DriverYear":"VER_2023","MinisectorLabel":"Slow","Diff_to_Fastest_sec":0.0,"FastestOverallDriver":"VER","FastestOverallYear":2023},
        {"DriverYear":"VER_2024","MinisectorLabel":"Slow","Diff_to_Fastest_sec":0.15,"FastestOverallDriver":"VER","FastestOverallYear":2023},
        {"DriverYear":"NOR_2024","MinisectorLabel":"Straight","Diff_to_Fastest_sec":-0.05,"FastestOverallDriver":"VER","FastestOverallYear":2023}
    ]"#;
    let points = schema::decode_avg_diffs(body).unwrap();
    let chart = sector_diff::sector_diff_chart(&points, false);
    assert_eq!(chart.title, "Average time loss to fastest driver: VER (2023)");
    assert_eq!(chart.keys, ["NOR_2024", "VER_2024"]);
}

#[test]
fn selection_limits_match_the_menu() {
    let years: Vec<String> = ["2021", "2022"].iter().map(|s| s.to_string()).collect();
    let mut requested = years.clone();
    requested.push("2023".into());
    assert_eq!(apply_limited(&years, &requested, MAX_YEARS), ["2022", "2023"]);

    let drivers: Vec<String> = (0..MAX_DRIVERS).map(|i| format!("d{i}")).collect();
    let mut more = drivers.clone();
    more.push("new".into());
    let limited = apply_limited(&drivers, &more, MAX_DRIVERS);
    assert_eq!(limited.len(), MAX_DRIVERS);
    assert!(!limited.contains(&"d0".to_string()));
    assert!(limited.contains(&"new".to_string()));
}
