// shared/src/schema.rs
//
// Typed response bodies for every analytics endpoint plus decode-and-validate
// entry points. Nothing loosely typed leaves this module: a body either
// becomes finite, well-formed records or a `DecodeError`.

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use snafu::{ResultExt, Snafu};
use std::fmt;
use std::marker::PhantomData;

use crate::api::Endpoint;

#[derive(Debug, Snafu)]
pub enum DecodeError {
    #[snafu(display("malformed {endpoint} response: {source}"))]
    Malformed {
        endpoint: Endpoint,
        source: serde_json::Error,
    },

    #[snafu(display("invalid {endpoint} response: {reason}"))]
    Invalid { endpoint: Endpoint, reason: String },

    #[snafu(display("{endpoint} reported: {message}"))]
    Backend { endpoint: Endpoint, message: String },
}

impl DecodeError {
    /// True for bodies that did not match the schema (the "malformed response" kind).
    pub fn is_malformed(&self) -> bool {
        matches!(self, DecodeError::Malformed { .. } | DecodeError::Invalid { .. })
    }
}

/// Post-deserialization checks serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        self.iter()
            .enumerate()
            .try_for_each(|(i, item)| item.validate().map_err(|e| format!("item {i}: {e}")))
    }
}

fn finite(name: &str, v: f64) -> Result<(), String> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} is not a finite number"))
    }
}

fn non_empty(name: &str, v: &str) -> Result<(), String> {
    if v.trim().is_empty() {
        Err(format!("{name} is empty"))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Year labels arrive as numbers or strings depending on the endpoint.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Int(i64),
    Float(f64),
    Str(String),
}

impl NumOrStr {
    fn into_label(self) -> String {
        match self {
            NumOrStr::Int(i) => i.to_string(),
            NumOrStr::Float(f) if f.fract() == 0.0 => format!("{}", f as i64),
            NumOrStr::Float(f) => f.to_string(),
            NumOrStr::Str(s) => s,
        }
    }
}

fn label<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    NumOrStr::deserialize(d).map(NumOrStr::into_label)
}

fn opt_label<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<NumOrStr>::deserialize(d).map(|v| v.map(NumOrStr::into_label))
}

// ---------------------------------------------------------------------------
// Keyed series: JSON object of key -> array, kept in document order.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedSeries<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for KeyedSeries<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> KeyedSeries<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<T> FromIterator<(String, Vec<T>)> for KeyedSeries<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for KeyedSeries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for SeriesVisitor<T> {
            type Value = KeyedSeries<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping series keys to arrays")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut entries: Vec<(String, Vec<T>)> = Vec::new();
                while let Some((key, values)) = map.next_entry::<String, Vec<T>>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(de::Error::custom(format!("duplicate series key {key:?}")));
                    }
                    entries.push((key, values));
                }
                Ok(KeyedSeries { entries })
            }
        }

        deserializer.deserialize_map(SeriesVisitor(PhantomData))
    }
}

impl<T: Validate> Validate for KeyedSeries<T> {
    fn validate(&self) -> Result<(), String> {
        for (key, values) in &self.entries {
            non_empty("series key", key)?;
            values.validate().map_err(|e| format!("series {key}: {e}"))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// /AvgDiff
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgDiffPoint {
    #[serde(rename = "DriverYear")]
    pub driver_year: String,
    #[serde(rename = "MinisectorLabel")]
    pub minisector_label: String,
    #[serde(rename = "Diff_to_Fastest_sec")]
    pub diff_to_fastest_sec: f64,
    #[serde(rename = "FastestOverallDriver", default)]
    pub fastest_overall_driver: Option<String>,
    #[serde(rename = "FastestOverallYear", default, deserialize_with = "opt_label")]
    pub fastest_overall_year: Option<String>,
}

impl Validate for AvgDiffPoint {
    fn validate(&self) -> Result<(), String> {
        non_empty("DriverYear", &self.driver_year)?;
        finite("Diff_to_Fastest_sec", self.diff_to_fastest_sec)
    }
}

// ---------------------------------------------------------------------------
// /braking-comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakingPoint {
    pub distance: f64,
    pub ideal_brake: f64,
    pub driver_brake: f64,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default, deserialize_with = "opt_label")]
    pub year: Option<String>,
}

impl Validate for BrakingPoint {
    fn validate(&self) -> Result<(), String> {
        finite("distance", self.distance)?;
        finite("ideal_brake", self.ideal_brake)?;
        finite("driver_brake", self.driver_brake)
    }
}

pub type BrakingComparison = KeyedSeries<BrakingPoint>;

// ---------------------------------------------------------------------------
// /braking-distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakingDistributionPoint {
    pub braking_distance: f64,
    pub driver: String,
    #[serde(default, deserialize_with = "opt_label")]
    pub year: Option<String>,
    #[serde(default)]
    pub lap: Option<u32>,
}

impl Validate for BrakingDistributionPoint {
    fn validate(&self) -> Result<(), String> {
        non_empty("driver", &self.driver)?;
        finite("braking_distance", self.braking_distance)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DistributionBody {
    Bare(Vec<BrakingDistributionPoint>),
    Wrapped { data: Vec<BrakingDistributionPoint> },
}

// ---------------------------------------------------------------------------
// /gear-data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GearSample {
    pub x: f64,
    pub y: f64,
    pub gear: u8,
}

#[derive(Deserialize)]
struct GearRecord {
    x: f64,
    y: f64,
    gear: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GearBody {
    Columns {
        x: Vec<f64>,
        y: Vec<f64>,
        gear: Vec<f64>,
    },
    Records(Vec<GearRecord>),
}

fn gear_value(g: f64) -> Result<u8, String> {
    if g.is_finite() && (0.0..=9.0).contains(&g) {
        Ok(g.round() as u8)
    } else {
        Err(format!("gear {g} out of range"))
    }
}

impl GearBody {
    fn into_samples(self) -> Result<Vec<GearSample>, String> {
        let records: Vec<(f64, f64, f64)> = match self {
            GearBody::Columns { x, y, gear } => {
                if x.len() != y.len() || x.len() != gear.len() {
                    return Err(format!(
                        "column lengths differ: x={} y={} gear={}",
                        x.len(),
                        y.len(),
                        gear.len()
                    ));
                }
                x.into_iter()
                    .zip(y)
                    .zip(gear)
                    .map(|((x, y), g)| (x, y, g))
                    .collect()
            }
            GearBody::Records(rs) => rs.into_iter().map(|r| (r.x, r.y, r.gear)).collect(),
        };

        records
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, g))| {
                finite("x", x).and(finite("y", y)).map_err(|e| format!("sample {i}: {e}"))?;
                let gear = gear_value(g).map_err(|e| format!("sample {i}: {e}"))?;
                Ok(GearSample { x, y, gear })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// /lap-gap-evolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapGapPoint {
    /// Distance along the lap.
    pub x: f64,
    /// Gap to the reference lap, seconds.
    pub y: f64,
    pub driver: String,
    #[serde(deserialize_with = "label")]
    pub year: String,
}

impl Validate for LapGapPoint {
    fn validate(&self) -> Result<(), String> {
        non_empty("driver", &self.driver)?;
        finite("x", self.x)?;
        finite("y", self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    #[serde(alias = "Number", deserialize_with = "label")]
    pub number: String,
    #[serde(alias = "Distance")]
    pub distance: f64,
}

impl Validate for Corner {
    fn validate(&self) -> Result<(), String> {
        finite("corner distance", self.distance)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LapGapData {
    pub points: Vec<LapGapPoint>,
    pub corners: Vec<Corner>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LapGapBody {
    Bare(Vec<LapGapPoint>),
    WithCorners {
        #[serde(rename = "lapGaps")]
        lap_gaps: Vec<LapGapPoint>,
        #[serde(default)]
        corners: Vec<Corner>,
    },
}

impl Validate for LapGapData {
    fn validate(&self) -> Result<(), String> {
        self.points.validate()?;
        self.corners.validate()
    }
}

// ---------------------------------------------------------------------------
// /telemetry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPoint {
    #[serde(default)]
    pub time: Option<f64>,
    pub distance: f64,
    pub speed: f64,
    #[serde(rename = "RPM")]
    pub rpm: f64,
    #[serde(rename = "nGear")]
    pub n_gear: f64,
    #[serde(rename = "Throttle")]
    pub throttle: f64,
    #[serde(rename = "Brake")]
    pub brake: f64,
    #[serde(rename = "DRS")]
    pub drs: f64,
}

impl Validate for TelemetryPoint {
    fn validate(&self) -> Result<(), String> {
        finite("distance", self.distance)?;
        finite("speed", self.speed)?;
        finite("RPM", self.rpm)?;
        finite("nGear", self.n_gear)?;
        finite("Throttle", self.throttle)?;
        finite("Brake", self.brake)?;
        finite("DRS", self.drs)
    }
}

pub type Telemetry = KeyedSeries<TelemetryPoint>;

// ---------------------------------------------------------------------------
// /track-dominance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDominancePoint {
    pub x: f64,
    pub y: f64,
    pub minisector: i64,
    /// Key of the fastest driver (or driver-year) through this minisector.
    #[serde(alias = "fastest_driver")]
    pub fastest: String,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default, deserialize_with = "opt_label")]
    pub year: Option<String>,
    #[serde(rename = "TimeGainFastest", default)]
    pub time_gain_fastest: Option<f64>,
}

impl Validate for TrackDominancePoint {
    fn validate(&self) -> Result<(), String> {
        non_empty("fastest", &self.fastest)?;
        finite("x", self.x)?;
        finite("y", self.y)?;
        if let Some(gain) = self.time_gain_fastest {
            finite("TimeGainFastest", gain)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// decoding
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ErrorBody {
    error: String,
}

fn parse<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, DecodeError> {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return BackendSnafu {
            endpoint,
            message: err.error,
        }
        .fail();
    }
    serde_json::from_str(body).context(MalformedSnafu { endpoint })
}

fn checked<T: Validate>(endpoint: Endpoint, value: T) -> Result<T, DecodeError> {
    value
        .validate()
        .map_err(|reason| DecodeError::Invalid { endpoint, reason })?;
    Ok(value)
}

pub fn decode_avg_diffs(body: &str) -> Result<Vec<AvgDiffPoint>, DecodeError> {
    let e = Endpoint::AvgDiff;
    checked(e, parse(e, body)?)
}

pub fn decode_braking_comparison(body: &str) -> Result<BrakingComparison, DecodeError> {
    let e = Endpoint::BrakingComparison;
    checked(e, parse(e, body)?)
}

pub fn decode_braking_distribution(
    body: &str,
) -> Result<Vec<BrakingDistributionPoint>, DecodeError> {
    let e = Endpoint::BrakingDistribution;
    let points = match parse::<DistributionBody>(e, body)? {
        DistributionBody::Bare(points) | DistributionBody::Wrapped { data: points } => points,
    };
    checked(e, points)
}

pub fn decode_gear_data(body: &str) -> Result<Vec<GearSample>, DecodeError> {
    let e = Endpoint::GearData;
    parse::<GearBody>(e, body)?
        .into_samples()
        .map_err(|reason| DecodeError::Invalid { endpoint: e, reason })
}

pub fn decode_lap_gap(body: &str) -> Result<LapGapData, DecodeError> {
    let e = Endpoint::LapGapEvolution;
    let data = match parse::<LapGapBody>(e, body)? {
        LapGapBody::Bare(points) => LapGapData {
            points,
            corners: Vec::new(),
        },
        LapGapBody::WithCorners { lap_gaps, corners } => LapGapData {
            points: lap_gaps,
            corners,
        },
    };
    checked(e, data)
}

pub fn decode_telemetry(body: &str) -> Result<Telemetry, DecodeError> {
    let e = Endpoint::Telemetry;
    checked(e, parse(e, body)?)
}

pub fn decode_track_dominance(body: &str) -> Result<Vec<TrackDominancePoint>, DecodeError> {
    let e = Endpoint::TrackDominance;
    checked(e, parse(e, body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avg_diffs_accept_numeric_or_string_years() {
        let body = r#"[
            {"DriverYear":"VER_2023","MinisectorLabel":"Slow","Diff_to_Fastest_sec":0.0,
             "FastestOverallDriver":"VER","FastestOverallYear":2023},
            {"DriverYear":"NOR_2023","MinisectorLabel":"fast","Diff_to_Fastest_sec":0.12,
             "FastestOverallDriver":"VER","FastestOverallYear":"2023"}
        ]"#;
        let points = decode_avg_diffs(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].fastest_overall_year.as_deref(), Some("2023"));
        assert_eq!(points[1].fastest_overall_year.as_deref(), Some("2023"));
    }

    #[test]
    fn avg_diffs_without_fastest_fields_decode() {
        let body = r#"[{"DriverYear":"VER_2023","MinisectorLabel":"Slow","Diff_to_Fastest_sec":0.3}]"#;
        let points = decode_avg_diffs(body).unwrap();
        assert_eq!(points[0].fastest_overall_driver, None);
    }

    #[test]
    fn braking_comparison_keeps_key_order() {
        let body = r#"{
            "2024_NOR":[{"distance":0,"ideal_brake":0,"driver_brake":1,"driver":"NOR","year":2024}],
            "2023_VER":[{"distance":0,"ideal_brake":1,"driver_brake":0.5}]
        }"#;
        let cmp = decode_braking_comparison(body).unwrap();
        assert_eq!(cmp.keys().collect::<Vec<_>>(), ["2024_NOR", "2023_VER"]);
        assert_eq!(cmp.get("2024_NOR").map(|s| s[0].year.clone()), Some(Some("2024".into())));
    }

    #[test]
    fn backend_error_body_is_reported() {
        let err = decode_braking_comparison(r#"{"error":"No valid laps found"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Backend { ref message, .. } if message == "No valid laps found"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn distribution_accepts_bare_and_wrapped() {
        let point = r#"{"braking_distance":42.5,"driver":"VER","year":2023,"lap":7}"#;
        let bare = decode_braking_distribution(&format!("[{point}]")).unwrap();
        let wrapped = decode_braking_distribution(&format!(r#"{{"data":[{point}]}}"#)).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].lap, Some(7));
    }

    #[test]
    fn gear_data_columns_and_records() {
        let cols = decode_gear_data(r#"{"x":[0,1],"y":[5,6],"gear":[3,4]}"#).unwrap();
        let recs =
            decode_gear_data(r#"[{"x":0,"y":5,"gear":3},{"x":1,"y":6,"gear":4}]"#).unwrap();
        assert_eq!(cols, recs);
        assert_eq!(cols[1].gear, 4);
    }

    #[test]
    fn gear_columns_must_line_up() {
        let err = decode_gear_data(r#"{"x":[0,1],"y":[5],"gear":[3,4]}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Invalid { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn lap_gap_variants() {
        let bare = decode_lap_gap(r#"[{"x":10,"y":0.1,"driver":"VER","year":2023}]"#).unwrap();
        assert!(bare.corners.is_empty());

        let rich = decode_lap_gap(
            r#"{"lapGaps":[{"x":10,"y":0.1,"driver":"VER","year":"2023"}],
                "corners":[{"Number":1,"Distance":350.5}]}"#,
        )
        .unwrap();
        assert_eq!(rich.points, bare.points);
        assert_eq!(rich.corners[0].number, "1");
    }

    #[test]
    fn track_dominance_accepts_fastest_driver_alias() {
        let a = decode_track_dominance(r#"[{"x":1,"y":2,"minisector":0,"fastest":"VER"}]"#).unwrap();
        let b =
            decode_track_dominance(r#"[{"x":1,"y":2,"minisector":0,"fastest_driver":"VER"}]"#)
                .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_shapes_are_malformed() {
        let err = decode_track_dominance(r#"[{"x":"left","y":2,"minisector":0,"fastest":"VER"}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));

        let err = decode_telemetry("[1,2,3]").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn empty_series_keys_are_rejected() {
        let err = decode_telemetry(r#"{"":[]}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Invalid { .. }));
    }

    #[test]
    fn telemetry_time_is_optional() {
        let body = r#"{"2023_VER":[
            {"distance":0,"speed":280,"RPM":11000,"nGear":7,"Throttle":100,"Brake":0,"DRS":12},
            {"time":0.25,"distance":20,"speed":282,"RPM":11100,"nGear":7,"Throttle":100,"Brake":0,"DRS":12}
        ]}"#;
        let t = decode_telemetry(body).unwrap();
        let samples = t.get("2023_VER").unwrap_or_default();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].time, None);
        assert_eq!(samples[1].time, Some(0.25));
    }

    #[test]
    fn empty_bodies_are_valid() {
        assert!(decode_track_dominance("[]").unwrap().is_empty());
        assert!(decode_telemetry("{}").unwrap().is_empty());
        assert!(decode_braking_distribution(r#"{"data":[]}"#).unwrap().is_empty());
    }
}
