use async_trait::async_trait;
use hunt_core::error::{HuntError, Result};
use hunt_core::ports::StockPhotoSource;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::http::{build_client, endpoint, get_checked};

const SERVICE: &str = "Unsplash";

/// Stock photo source backed by the Unsplash random-photo endpoint
pub struct UnsplashPhotoSource {
    /// Base URL (e.g., "https://api.unsplash.com")
    base_url: String,

    /// Access key; the source is unavailable without one
    access_key: Option<String>,

    client: reqwest::Client,
}

impl UnsplashPhotoSource {
    pub fn new(
        base_url: impl Into<String>,
        access_key: Option<String>,
        user_agent: &str,
    ) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            access_key,
            client: build_client(user_agent)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.access_key.is_some()
    }

    fn random_photo_url(&self, keyword: &str, access_key: &str) -> Result<reqwest::Url> {
        reqwest::Url::parse_with_params(
            &endpoint(&self.base_url, "photos/random"),
            &[("query", keyword), ("client_id", access_key)],
        )
        .map_err(|e| HuntError::ConfigInvalid {
            key: "stock_photo_url".to_string(),
            reason: format!("Invalid URL '{}': {}", self.base_url, e),
        })
    }

    /// Resolve the keyword to the URL of a regular-size photo
    async fn lookup(&self, keyword: &str, access_key: &str) -> Result<Option<String>> {
        let url = self.random_photo_url(keyword, access_key)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HuntError::network(SERVICE, e))?;

        // The random endpoint answers 404 when nothing matches the query
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(HuntError::HttpStatus {
                service: SERVICE.to_string(),
                status: response.status().as_u16(),
            });
        }

        let result: PhotoResult = response
            .json()
            .await
            .map_err(|e| HuntError::decode("Unsplash response", e))?;
        Ok(Some(result.urls.regular))
    }
}

#[async_trait]
impl StockPhotoSource for UnsplashPhotoSource {
    async fn fetch_photo(&self, keyword: &str) -> Result<Option<Vec<u8>>> {
        let Some(access_key) = self.access_key.as_deref() else {
            return Err(HuntError::ServiceUnavailable {
                service: SERVICE.to_string(),
                reason: "no access key configured".to_string(),
                remediation: "set HUNT_UNSPLASH_ACCESS_KEY or unsplash_access_key in hunt.toml"
                    .to_string(),
            });
        };

        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(None);
        }

        let Some(photo_url) = self.lookup(keyword, access_key).await? else {
            tracing::info!("No stock photo found for '{}'", keyword);
            return Ok(None);
        };

        let url = reqwest::Url::parse(&photo_url)
            .map_err(|e| HuntError::decode("Unsplash photo URL", e))?;
        let response = get_checked(&self.client, SERVICE, url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HuntError::network(SERVICE, e))?;

        tracing::debug!(
            "Downloaded {} byte stock photo for '{}'",
            bytes.len(),
            keyword
        );
        Ok(Some(bytes.to_vec()))
    }
}

/// Response from the random-photo endpoint
#[derive(Debug, Deserialize)]
struct PhotoResult {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}
