//! HTTP plumbing shared by the provider clients.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::ProviderError;

/// Settings every provider HTTP client is built with.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Sent on every request. MusicBrainz and Discogs reject anonymous clients.
    pub user_agent: String,
    /// Per-request deadline. Abandoned fetches still finish within this.
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Default user agent string
pub const USER_AGENT: &str = concat!(
    "AlbumResolver/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/album-resolver)"
);

pub(crate) fn build_client(settings: &HttpSettings) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|e| ProviderError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Send a request and decode a JSON body.
///
/// 404 maps to `Ok(None)`; other non-success statuses become errors.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<Option<T>, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ProviderError::NotAuthorized(format!("HTTP {}", status)));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api(format!(
            "HTTP {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    response
        .json::<T>()
        .await
        .map(Some)
        .map_err(|e| ProviderError::Parse(e.to_string()))
}

/// Render a provider release date the way the catalog stores them:
/// `DD/MM/YYYY`, `MM/YYYY` or `YYYY`.
pub(crate) fn format_release_date(date: &str) -> Option<String> {
    let parts: Vec<&str> = date.trim().split('-').collect();
    match parts.as_slice() {
        [year] if !year.is_empty() => Some(year.to_string()),
        [year, month] => Some(format!("{:0>2}/{}", month, year)),
        [year, month, day] => Some(format!("{:0>2}/{:0>2}/{}", day, month, year)),
        _ => None,
    }
}

/// Whole minutes from a millisecond total, rounded.
pub(crate) fn millis_to_minutes(total_ms: u64) -> u64 {
    (total_ms + 30_000) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("1997-05-21").as_deref(), Some("21/05/1997"));
        assert_eq!(format_release_date("1997-5").as_deref(), Some("05/1997"));
        assert_eq!(format_release_date("1997").as_deref(), Some("1997"));
        assert_eq!(format_release_date(""), None);
    }

    #[test]
    fn test_millis_to_minutes() {
        assert_eq!(millis_to_minutes(0), 0);
        assert_eq!(millis_to_minutes(29_999), 0);
        assert_eq!(millis_to_minutes(30_000), 1);
        assert_eq!(millis_to_minutes(3_213_000), 54);
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("AlbumResolver/"));
    }
}
