use hunt_core::error::{HuntError, Result};
use std::time::Duration;

/// Request timeout for every outbound call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Build a client that identifies itself with the given User-Agent.
/// Nominatim and the OSM tile servers reject anonymous clients.
pub fn build_client(user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| HuntError::network("http client", e))
}

/// Join a base URL and a path without doubling slashes
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Send a GET and fail on non-success status codes
pub async fn get_checked(
    client: &reqwest::Client,
    service: &str,
    url: reqwest::Url,
) -> Result<reqwest::Response> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HuntError::network(service, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HuntError::HttpStatus {
            service: service.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}
