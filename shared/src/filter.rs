// shared/src/filter.rs
//
// Dashboard filter selection. The selection is an immutable value handed
// top-down; every setter returns a new selection and re-applies the rule that
// session name and drivers must be valid in *all* selected years.

use serde::{Deserialize, Serialize};

use crate::season::{self, SessionIdentifier};

pub const MAX_YEARS: usize = 2;
pub const MAX_DRIVERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSelection")]
pub struct FilterSelection {
    years: Vec<String>,
    session_name: String,
    identifier: SessionIdentifier,
    drivers: Vec<String>,
}

/// Wire form of a persisted selection. It may predate the current season
/// tables or have been edited by hand, so it is rebuilt through the setters.
#[derive(Deserialize)]
struct StoredSelection {
    years: Vec<String>,
    session_name: String,
    identifier: SessionIdentifier,
    drivers: Vec<String>,
}

impl From<StoredSelection> for FilterSelection {
    fn from(raw: StoredSelection) -> Self {
        let years = apply_limited(&[], &raw.years, MAX_YEARS);
        let sel = Self::new(years, &raw.session_name, raw.identifier, raw.drivers);
        let drivers = apply_limited(&[], &sel.drivers, MAX_DRIVERS);
        Self { drivers, ..sel }
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new(
            ["2021", "2022"],
            "Spanish Grand Prix",
            SessionIdentifier::Qualifying,
            ["Max Verstappen", "Charles Leclerc"],
        )
    }
}

impl FilterSelection {
    pub fn new<Y, D>(
        years: impl IntoIterator<Item = Y>,
        session_name: &str,
        identifier: SessionIdentifier,
        drivers: impl IntoIterator<Item = D>,
    ) -> Self
    where
        Y: Into<String>,
        D: Into<String>,
    {
        Self::empty()
            .with_years(years)
            .with_session_name(session_name)
            .with_identifier(identifier)
            .with_drivers(drivers)
    }

    pub fn empty() -> Self {
        Self {
            years: Vec::new(),
            session_name: String::new(),
            identifier: SessionIdentifier::default(),
            drivers: Vec::new(),
        }
    }

    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn identifier(&self) -> SessionIdentifier {
        self.identifier
    }

    pub fn drivers(&self) -> &[String] {
        &self.drivers
    }

    /// Replace the selected years; session name and drivers that are not
    /// valid in every new year are dropped.
    pub fn with_years<Y: Into<String>>(&self, years: impl IntoIterator<Item = Y>) -> Self {
        let years = dedup(years.into_iter().map(Into::into));
        let sessions = common_session_names(&years);
        let drivers_ok = common_driver_names(&years);

        let session_name = if sessions.contains(&self.session_name) {
            self.session_name.clone()
        } else {
            String::new()
        };
        let drivers = self
            .drivers
            .iter()
            .filter(|d| drivers_ok.contains(d))
            .cloned()
            .collect();

        Self {
            years,
            session_name,
            identifier: self.identifier,
            drivers,
        }
    }

    /// Replace the session name. Names not run in every selected year clear it.
    pub fn with_session_name(&self, session_name: &str) -> Self {
        let valid = common_session_names(&self.years);
        let session_name = if valid.iter().any(|s| s == session_name) {
            session_name.to_string()
        } else {
            String::new()
        };
        Self {
            session_name,
            ..self.clone()
        }
    }

    pub fn with_identifier(&self, identifier: SessionIdentifier) -> Self {
        Self {
            identifier,
            ..self.clone()
        }
    }

    /// Replace the driver list; drivers absent from any selected year are dropped.
    pub fn with_drivers<D: Into<String>>(&self, drivers: impl IntoIterator<Item = D>) -> Self {
        let valid = common_driver_names(&self.years);
        let drivers = dedup(drivers.into_iter().map(Into::into))
            .into_iter()
            .filter(|d| valid.contains(d))
            .collect();
        Self {
            drivers,
            ..self.clone()
        }
    }

    /// All four selectors hold a value, so a fetch makes sense.
    pub fn is_ready(&self) -> bool {
        !self.years.is_empty() && !self.session_name.is_empty() && !self.drivers.is_empty()
    }
}

/// Intersection of each year's option list, in the first year's order.
/// No years means no options.
pub fn common_options<'a, F>(years: &[String], table: F) -> Vec<String>
where
    F: Fn(&str) -> &'a [&'a str],
{
    let mut acc: Option<Vec<&'a str>> = None;
    for year in years {
        let current = table(year);
        acc = Some(match acc {
            None => current.to_vec(),
            Some(prev) => prev.into_iter().filter(|o| current.contains(o)).collect(),
        });
    }
    acc.unwrap_or_default()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn common_session_names(years: &[String]) -> Vec<String> {
    common_options(years, season::sessions_for)
}

pub fn common_driver_names(years: &[String]) -> Vec<String> {
    common_options(years, season::drivers_for)
}

/// Apply a multi-select change under a maximum selection count.
///
/// If `requested` fits within `max` it is returned as is. Otherwise the
/// oldest entries of `current` are evicted first and newly added entries are
/// kept; surviving entries stay in `requested` order.
pub fn apply_limited(current: &[String], requested: &[String], max: usize) -> Vec<String> {
    let requested = dedup(requested.iter().cloned());
    if requested.len() <= max {
        return requested;
    }

    let (mut kept, added): (Vec<&String>, Vec<&String>) =
        requested.iter().partition(|r| current.contains(r));

    // oldest existing choice first
    kept.sort_by_key(|k| current.iter().position(|c| c == *k));

    let added_keep = added.len().min(max);
    let added = &added[added.len() - added_keep..];
    let room = max - added_keep;
    let kept = &kept[kept.len().saturating_sub(room)..];

    requested
        .iter()
        .filter(|r| kept.contains(r) || added.contains(r))
        .cloned()
        .collect()
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn no_years_means_no_options() {
        assert!(common_session_names(&[]).is_empty());
        assert!(common_driver_names(&[]).is_empty());
    }

    #[test]
    fn intersection_across_years() {
        let names = common_session_names(&s(&["2021", "2023"]));
        assert!(names.contains(&"Bahrain Grand Prix".to_string()));
        // 2021 only
        assert!(!names.contains(&"Portuguese Grand Prix".to_string()));
        // 2023 only
        assert!(!names.contains(&"Las Vegas Grand Prix".to_string()));

        let drivers = common_driver_names(&s(&["2021", "2024"]));
        assert!(drivers.contains(&"Max Verstappen".to_string()));
        assert!(!drivers.contains(&"Kimi Räikkönen".to_string()));
        assert!(!drivers.contains(&"Oscar Piastri".to_string()));
    }

    #[test]
    fn empty_intersection_stays_empty() {
        let table = |y: &str| -> &'static [&'static str] {
            match y {
                "a" => &["x"],
                "b" => &["y"],
                "c" => &["x", "y"],
                _ => &[],
            }
        };
        assert!(common_options(&s(&["a", "b", "c"]), table).is_empty());
    }

    #[test]
    fn changing_years_prunes_dependents() {
        let sel = FilterSelection::new(
            ["2023"],
            "Las Vegas Grand Prix",
            SessionIdentifier::Race,
            ["Max Verstappen", "Oscar Piastri"],
        );
        assert_eq!(sel.session_name(), "Las Vegas Grand Prix");

        let next = sel.with_years(["2021", "2023"]);
        assert_eq!(next.session_name(), "");
        assert_eq!(next.drivers(), ["Max Verstappen".to_string()]);
        assert!(!next.is_ready());
        // original untouched
        assert_eq!(sel.drivers().len(), 2);
    }

    #[test]
    fn clearing_years_clears_everything_dependent() {
        let sel = FilterSelection::default().with_years(Vec::<String>::new());
        assert!(sel.years().is_empty());
        assert!(sel.session_name().is_empty());
        assert!(sel.drivers().is_empty());
    }

    #[test]
    fn default_selection_is_ready() {
        let sel = FilterSelection::default();
        assert!(sel.is_ready());
        assert_eq!(sel.identifier(), SessionIdentifier::Qualifying);
        assert_eq!(sel.drivers(), s(&["Max Verstappen", "Charles Leclerc"]));
    }

    #[test]
    fn session_name_outside_the_common_set_clears() {
        let sel = FilterSelection::default();
        let next = sel.with_session_name("Las Vegas Grand Prix");
        assert_eq!(next.session_name(), "");
        assert!(!next.is_ready());

        let kept = sel.with_session_name("Bahrain Grand Prix");
        assert_eq!(kept.session_name(), "Bahrain Grand Prix");
    }

    #[test]
    fn stored_selection_is_pruned_on_load() {
        let json = r#"{
            "years": ["2021", "2022", "2023"],
            "session_name": "Las Vegas Grand Prix",
            "identifier": "Race",
            "drivers": ["Oscar Piastri", "Nobody Atall", "Max Verstappen"]
        }"#;
        let sel: FilterSelection = serde_json::from_str(json).unwrap();
        assert_eq!(sel.years(), s(&["2022", "2023"]));
        assert_eq!(sel.session_name(), "");
        assert_eq!(sel.drivers(), s(&["Max Verstappen"]));
        assert_eq!(sel.identifier(), SessionIdentifier::Race);
        assert!(!sel.is_ready());
    }

    #[test]
    fn stored_selection_round_trips_when_valid() {
        let sel = FilterSelection::default();
        let json = serde_json::to_string(&sel).unwrap();
        assert_eq!(serde_json::from_str::<FilterSelection>(&json).unwrap(), sel);
    }

    #[test]
    fn limit_evicts_oldest_existing_choice() {
        let current = s(&["2021", "2022"]);
        let requested = s(&["2021", "2022", "2024"]);
        assert_eq!(apply_limited(&current, &requested, MAX_YEARS), s(&["2022", "2024"]));
    }

    #[test]
    fn limit_is_a_no_op_when_under_max() {
        let current = s(&["2021"]);
        let requested = s(&["2021", "2023"]);
        assert_eq!(apply_limited(&current, &requested, MAX_YEARS), requested);
    }

    #[test]
    fn limit_keeps_latest_additions_when_they_alone_overflow() {
        let requested = s(&["a", "b", "c"]);
        assert_eq!(apply_limited(&[], &requested, 2), s(&["b", "c"]));
    }

    proptest! {
        #[test]
        fn common_options_is_set_intersection(picks in proptest::collection::vec(0usize..5, 0..4)) {
            let years: Vec<String> = picks.iter().map(|i| season::YEARS[*i].to_string()).collect();
            let got = common_driver_names(&years);
            if years.is_empty() {
                prop_assert!(got.is_empty());
            }
            for d in &got {
                for y in &years {
                    prop_assert!(season::drivers_for(y).contains(&d.as_str()));
                }
            }
            if let Some(first) = years.first() {
                for d in season::drivers_for(first) {
                    let everywhere = years.iter().all(|y| season::drivers_for(y).contains(d));
                    prop_assert_eq!(everywhere, got.iter().any(|g| g == d));
                }
            }
        }

        #[test]
        fn limited_selection_never_exceeds_max(
            current in proptest::collection::vec("[a-e]", 0..5),
            requested in proptest::collection::vec("[a-h]", 0..8),
            max in 1usize..4,
        ) {
            let out = apply_limited(&current, &requested, max);
            prop_assert!(out.len() <= max);
            for o in &out {
                prop_assert!(requested.contains(o));
            }
        }
    }
}
