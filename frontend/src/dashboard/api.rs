// frontend/src/dashboard/api.rs
//
// One fetcher per analytics endpoint. Every fetcher issues a single GET,
// checks the status and hands the body to the shared decoder. Nothing here
// retries or times out.

use paddock_shared::api::join_url;
use paddock_shared::schema::{
    self, AvgDiffPoint, BrakingComparison, BrakingDistributionPoint, GearSample, LapGapData,
    Telemetry, TrackDominancePoint,
};
use paddock_shared::{DecodeError, Endpoint, SessionQuery};
use snafu::Snafu;

use super::{UrlConfig, now_ms};

#[derive(Debug, Snafu)]
pub enum ApiError {
    #[snafu(display("GET {url} failed: {message}"))]
    Transport { url: String, message: String },

    #[snafu(display("GET {url} answered HTTP {status}"))]
    Status { url: String, status: u16 },

    #[snafu(display("{source}"))]
    Malformed { source: DecodeError },

    #[snafu(display("{endpoint} reported: {message}"))]
    Backend { endpoint: Endpoint, message: String },
}

impl From<DecodeError> for ApiError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::Backend { endpoint, message } => ApiError::Backend { endpoint, message },
            other => ApiError::Malformed { source: other },
        }
    }
}

// ---------- HTTP helpers ----------
#[cfg(target_arch = "wasm32")]
pub async fn http_get_text(url: &str) -> Result<String, ApiError> {
    use gloo_net::http::Request;

    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !resp.ok() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    resp.text().await.map_err(|e| ApiError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn http_get_text(url: &str) -> Result<String, ApiError> {
    let resp = reqwest::get(url).await.map_err(|e| ApiError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    resp.text().await.map_err(|e| ApiError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })
}

async fn get_body(query: &SessionQuery, endpoint: Endpoint) -> Result<String, ApiError> {
    let url = join_url(&UrlConfig::base_http(), &query.path_and_query(endpoint));
    let started = now_ms();
    let body = http_get_text(&url).await?;
    log::info!(
        "{endpoint}: {} bytes in {:.0} ms",
        body.len(),
        now_ms() - started
    );
    Ok(body)
}

pub async fn fetch_avg_diffs(query: &SessionQuery) -> Result<Vec<AvgDiffPoint>, ApiError> {
    let body = get_body(query, Endpoint::AvgDiff).await?;
    Ok(schema::decode_avg_diffs(&body)?)
}

pub async fn fetch_braking_comparison(
    query: &SessionQuery,
) -> Result<BrakingComparison, ApiError> {
    let body = get_body(query, Endpoint::BrakingComparison).await?;
    Ok(schema::decode_braking_comparison(&body)?)
}

pub async fn fetch_braking_distribution(
    query: &SessionQuery,
) -> Result<Vec<BrakingDistributionPoint>, ApiError> {
    let body = get_body(query, Endpoint::BrakingDistribution).await?;
    Ok(schema::decode_braking_distribution(&body)?)
}

/// Gear map for the first selected year and driver.
pub async fn fetch_gear_data(query: &SessionQuery) -> Result<Vec<GearSample>, ApiError> {
    let body = get_body(query, Endpoint::GearData).await?;
    Ok(schema::decode_gear_data(&body)?)
}

pub async fn fetch_lap_gap(query: &SessionQuery) -> Result<LapGapData, ApiError> {
    let body = get_body(query, Endpoint::LapGapEvolution).await?;
    Ok(schema::decode_lap_gap(&body)?)
}

pub async fn fetch_telemetry(query: &SessionQuery) -> Result<Telemetry, ApiError> {
    let body = get_body(query, Endpoint::Telemetry).await?;
    Ok(schema::decode_telemetry(&body)?)
}

pub async fn fetch_track_dominance(
    query: &SessionQuery,
) -> Result<Vec<TrackDominancePoint>, ApiError> {
    let body = get_body(query, Endpoint::TrackDominance).await?;
    Ok(schema::decode_track_dominance(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_bodies_stay_distinct_from_schema_failures() {
        let err: ApiError = schema::decode_braking_comparison(r#"{"error":"No valid laps found"}"#)
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Backend { .. }));
        assert!(err.to_string().contains("No valid laps found"));

        let err: ApiError = schema::decode_track_dominance("[{\"x\": 1}]")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Malformed { .. }));
    }
}
