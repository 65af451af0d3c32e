//! Resolve the time zone of an IP address through the geolocation API.

use crate::acquisition::HttpClient;
use crate::error::StageError;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct CityResponse {
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    time_zone: Option<String>,
}

/// Build `<endpoint>/<ip>?demo=1`.
pub fn lookup_url(endpoint: &str, ip: &str) -> Result<Url, StageError> {
    let base = if endpoint.ends_with('/') {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("{endpoint}/"))?
    };
    let mut url = base.join(ip)?;
    url.set_query(Some("demo=1"));
    Ok(url)
}

/// Query the geolocation API and return `location.time_zone`.
pub async fn resolve_time_zone(
    client: &HttpClient,
    endpoint: &str,
    ip: &str,
    bearer: &str,
) -> Result<String, StageError> {
    let url = lookup_url(endpoint, ip)?;
    let authorization = format!("Bearer {bearer}");
    let body = client
        .get(url.as_str(), &[("Authorization", authorization.as_str())])
        .await?
        .expect_status(200)?;
    extract_time_zone(&body)
}

pub fn extract_time_zone(body: &str) -> Result<String, StageError> {
    let parsed: CityResponse = serde_json::from_str(body)?;
    parsed
        .location
        .and_then(|l| l.time_zone)
        .ok_or_else(|| StageError::parse("location.time_zone missing from response"))
}
