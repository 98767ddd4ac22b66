// shared/src/api.rs
//
// Endpoint catalogue and query-string building for the analytics API.
// Each endpoint parses its multi-valued parameters its own way; see
// `Endpoint::years_encoding` and `Endpoint::drivers_encoding`.

use snafu::{Snafu, ensure};
use std::fmt;
use url::form_urlencoded;

use crate::driver::{DriverCode, name_to_code};
use crate::filter::FilterSelection;
use crate::season::SessionIdentifier;

/// Base URL used when neither persisted nor build-time configuration exists.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

/// How a list parameter is written into the query string.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MultiValue {
    /// `key=a&key=b`
    Repeated,
    /// `key=a,b`
    CommaJoined,
    /// `key=a`; the endpoint accepts a single value.
    FirstOnly,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Endpoint {
    AvgDiff,
    BrakingComparison,
    BrakingDistribution,
    GearData,
    LapGapEvolution,
    Telemetry,
    TrackDominance,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::AvgDiff,
        Endpoint::BrakingComparison,
        Endpoint::BrakingDistribution,
        Endpoint::GearData,
        Endpoint::LapGapEvolution,
        Endpoint::Telemetry,
        Endpoint::TrackDominance,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AvgDiff => "/AvgDiff",
            Endpoint::BrakingComparison => "/braking-comparison",
            Endpoint::BrakingDistribution => "/braking-distribution",
            Endpoint::GearData => "/gear-data",
            Endpoint::LapGapEvolution => "/lap-gap-evolution",
            Endpoint::Telemetry => "/telemetry",
            Endpoint::TrackDominance => "/track-dominance",
        }
    }

    /// Name of the query parameter carrying the session year(s).
    pub fn years_key(&self) -> &'static str {
        match self {
            Endpoint::AvgDiff | Endpoint::LapGapEvolution => "session_years",
            _ => "session_year",
        }
    }

    pub fn years_encoding(&self) -> MultiValue {
        match self {
            Endpoint::AvgDiff | Endpoint::LapGapEvolution => MultiValue::Repeated,
            Endpoint::BrakingComparison | Endpoint::BrakingDistribution | Endpoint::Telemetry => {
                MultiValue::CommaJoined
            }
            Endpoint::GearData | Endpoint::TrackDominance => MultiValue::FirstOnly,
        }
    }

    pub fn drivers_encoding(&self) -> MultiValue {
        match self {
            Endpoint::BrakingComparison => MultiValue::CommaJoined,
            Endpoint::GearData => MultiValue::FirstOnly,
            _ => MultiValue::Repeated,
        }
    }
}

fn append_list<'a>(
    q: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    values: impl IntoIterator<Item = &'a str>,
    encoding: MultiValue,
) {
    match encoding {
        MultiValue::Repeated => {
            for v in values {
                q.append_pair(key, v);
            }
        }
        MultiValue::CommaJoined => {
            let joined: Vec<&str> = values.into_iter().collect();
            if !joined.is_empty() {
                q.append_pair(key, &joined.join(","));
            }
        }
        MultiValue::FirstOnly => {
            if let Some(v) = values.into_iter().next() {
                q.append_pair(key, v);
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[snafu(display("no season year selected"))]
    NoYears,

    #[snafu(display("no Grand Prix selected"))]
    NoSessionName,

    #[snafu(display("none of the selected drivers map to a driver code"))]
    NoDrivers,
}

/// Parameters shared by every endpoint, already translated to API codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub years: Vec<String>,
    pub session_name: String,
    pub identifier: SessionIdentifier,
    pub drivers: Vec<DriverCode>,
}

impl SessionQuery {
    /// Translate a filter selection. Driver names without a code are dropped
    /// with a warning; if none survive the query is not issued.
    pub fn from_selection(sel: &FilterSelection) -> Result<Self, QueryError> {
        ensure!(!sel.years().is_empty(), NoYearsSnafu);
        ensure!(!sel.session_name().is_empty(), NoSessionNameSnafu);

        let drivers = driver_codes(sel.drivers());
        ensure!(!drivers.is_empty(), NoDriversSnafu);

        Ok(Self {
            years: sel.years().to_vec(),
            session_name: sel.session_name().to_string(),
            identifier: sel.identifier(),
            drivers,
        })
    }

    /// `path?query` for `endpoint`. `/gear-data` takes a single year and
    /// driver; the first of each is used, see [`SessionQuery::gear_data_path`].
    pub fn path_and_query(&self, endpoint: Endpoint) -> String {
        if endpoint == Endpoint::GearData
            && let (Some(year), Some(driver)) = (self.years.first(), self.drivers.first())
        {
            return self.gear_data_path(year, driver);
        }

        let mut q = form_urlencoded::Serializer::new(String::new());
        q.append_pair("session_name", &self.session_name);
        q.append_pair("identifier", self.identifier.api_code());
        append_list(
            &mut q,
            endpoint.years_key(),
            self.years.iter().map(String::as_str),
            endpoint.years_encoding(),
        );
        append_list(
            &mut q,
            "drivers",
            self.drivers.iter().map(DriverCode::as_str),
            endpoint.drivers_encoding(),
        );
        format!("{}?{}", endpoint.path(), q.finish())
    }

    pub fn gear_data_path(&self, year: &str, driver: &DriverCode) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("session_year", year)
            .append_pair("session_name", &self.session_name)
            .append_pair("identifier", self.identifier.api_code())
            .append_pair("driver", driver.as_str())
            .finish();
        format!("{}?{}", Endpoint::GearData.path(), query)
    }
}

/// Codes for `names` in order. Unmapped names and names whose code is
/// already taken are dropped with a warning.
fn driver_codes(names: &[String]) -> Vec<DriverCode> {
    let mut codes: Vec<DriverCode> = Vec::new();
    for name in names {
        match name_to_code(name) {
            Some(code) if !codes.contains(&code) => codes.push(code),
            Some(code) => log::warn!("dropping driver {name:?}: code {code} already taken"),
            None => log::warn!("dropping driver {name:?}: no driver code"),
        }
    }
    codes
}

/// Trim whitespace and trailing slashes; an empty result means "not configured".
pub fn normalize_base_url(input: &str) -> String {
    input.trim().trim_end_matches('/').to_string()
}

/// Join a normalized base URL and a `path?query` string.
pub fn join_url(base: &str, path_and_query: &str) -> String {
    let base = normalize_base_url(base);
    if path_and_query.starts_with('/') {
        format!("{base}{path_and_query}")
    } else {
        format!("{base}/{path_and_query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bahrain() -> FilterSelection {
        FilterSelection::new(
            ["2023"],
            "Bahrain Grand Prix",
            SessionIdentifier::Race,
            ["Max Verstappen", "Lando Norris"],
        )
    }

    #[test]
    fn track_dominance_query_uses_codes_and_repeated_keys() {
        let q = SessionQuery::from_selection(&bahrain()).unwrap();
        assert_eq!(
            q.path_and_query(Endpoint::TrackDominance),
            "/track-dominance?session_name=Bahrain+Grand+Prix&identifier=R\
             &session_year=2023&drivers=VER&drivers=NOR"
        );
    }

    fn two_year_pair() -> SessionQuery {
        let sel = FilterSelection::new(
            ["2021", "2022"],
            "Hungarian Grand Prix",
            SessionIdentifier::Qualifying,
            ["Max Verstappen", "Charles Leclerc"],
        );
        SessionQuery::from_selection(&sel).unwrap()
    }

    fn params(path_and_query: &str, key: &str) -> Vec<String> {
        let (_, query) = path_and_query.split_once('?').unwrap();
        form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn avg_diff_and_lap_gap_repeat_both_lists() {
        let q = two_year_pair();
        for endpoint in [Endpoint::AvgDiff, Endpoint::LapGapEvolution] {
            let path = q.path_and_query(endpoint);
            assert_eq!(params(&path, "session_years"), ["2021", "2022"]);
            assert_eq!(params(&path, "drivers"), ["VER", "LEC"]);
            assert!(params(&path, "session_year").is_empty());
        }
    }

    #[test]
    fn braking_comparison_joins_years_and_drivers() {
        let path = two_year_pair().path_and_query(Endpoint::BrakingComparison);
        assert_eq!(params(&path, "session_year"), ["2021,2022"]);
        assert_eq!(params(&path, "drivers"), ["VER,LEC"]);
    }

    #[test]
    fn telemetry_and_distribution_join_years_but_repeat_drivers() {
        let q = two_year_pair();
        for endpoint in [Endpoint::Telemetry, Endpoint::BrakingDistribution] {
            let path = q.path_and_query(endpoint);
            assert_eq!(params(&path, "session_year"), ["2021,2022"]);
            assert_eq!(params(&path, "drivers"), ["VER", "LEC"]);
        }
    }

    #[test]
    fn track_dominance_sends_a_single_year() {
        let path = two_year_pair().path_and_query(Endpoint::TrackDominance);
        assert_eq!(params(&path, "session_year"), ["2021"]);
        assert_eq!(params(&path, "drivers"), ["VER", "LEC"]);
    }

    #[test]
    fn gear_data_sends_first_year_and_driver() {
        let path = two_year_pair().path_and_query(Endpoint::GearData);
        assert_eq!(params(&path, "session_year"), ["2021"]);
        assert_eq!(params(&path, "driver"), ["VER"]);
        assert!(params(&path, "drivers").is_empty());
    }

    #[test]
    fn colliding_codes_keep_the_first_name() {
        let names = vec![
            "Max Verstappen".to_string(),
            "Jos Verstappen".to_string(),
            "???".to_string(),
            "Lando Norris".to_string(),
        ];
        let codes: Vec<String> = driver_codes(&names).iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, ["VER", "NOR"]);
    }

    #[test]
    fn gear_data_takes_one_driver_and_year() {
        let q = SessionQuery::from_selection(&bahrain()).unwrap();
        assert_eq!(
            q.path_and_query(Endpoint::GearData),
            "/gear-data?session_year=2023&session_name=Bahrain+Grand+Prix&identifier=R&driver=VER"
        );
    }

    #[test]
    fn unready_selections_are_rejected() {
        let no_years = bahrain().with_years(Vec::<String>::new());
        assert_eq!(SessionQuery::from_selection(&no_years), Err(QueryError::NoYears));

        let no_drivers = bahrain().with_drivers(Vec::<String>::new());
        assert_eq!(SessionQuery::from_selection(&no_drivers), Err(QueryError::NoDrivers));
    }

    #[test]
    fn special_characters_are_encoded() {
        let sel = FilterSelection::new(
            ["2023"],
            "São Paulo Grand Prix",
            SessionIdentifier::Qualifying,
            ["Sergio Pérez"],
        );
        let q = SessionQuery::from_selection(&sel).unwrap();
        let path = q.path_and_query(Endpoint::BrakingDistribution);
        assert!(path.contains("session_name=S%C3%A3o+Paulo+Grand+Prix"));
        assert!(path.ends_with("identifier=Q&session_year=2023&drivers=PER"));
    }

    #[test]
    fn urls_join_without_double_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/api/v1/", "/telemetry?x=1"),
            "http://localhost:8000/api/v1/telemetry?x=1"
        );
        assert_eq!(normalize_base_url("  http://h:1//  "), "http://h:1");
    }

    #[test]
    fn every_endpoint_has_a_distinct_path() {
        let mut paths: Vec<&str> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), 7);
    }
}
