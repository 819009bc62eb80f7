use async_trait::async_trait;
use hunt_core::error::{HuntError, Result};
use hunt_core::models::HuntLocation;
use hunt_core::ports::Geocoder;
use hunt_geo::is_searchable;
use serde::Deserialize;

use crate::http::{build_client, endpoint, get_checked};

const SERVICE: &str = "Nominatim";

/// Geocoder backed by a Nominatim search endpoint
pub struct NominatimGeocoder {
    /// Base URL (e.g., "https://nominatim.openstreetmap.org")
    base_url: String,

    /// Maximum number of results requested
    limit: u32,

    /// Comma separated ISO 3166-1 alpha-2 codes; empty means worldwide
    country_codes: String,

    /// HTTP client carrying the application's User-Agent
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a new geocoder
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            limit: 10,
            country_codes: String::new(),
            client: build_client(user_agent)?,
        })
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_country_codes(mut self, country_codes: impl Into<String>) -> Self {
        self.country_codes = country_codes.into();
        self
    }

    /// Full request URL for a query
    pub fn search_url(&self, query: &str) -> Result<reqwest::Url> {
        let limit = self.limit.to_string();
        let mut params = vec![("q", query), ("format", "json"), ("limit", limit.as_str())];
        if !self.country_codes.trim().is_empty() {
            params.push(("countrycodes", self.country_codes.trim()));
        }

        reqwest::Url::parse_with_params(&endpoint(&self.base_url, "search"), &params)
            .map_err(|e| HuntError::ConfigInvalid {
                key: "geocoder_url".to_string(),
                reason: format!("Invalid URL '{}': {}", self.base_url, e),
            })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<HuntLocation>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.search_url(query)?;
        tracing::debug!("Geocoding '{}'", query);

        let response = get_checked(&self.client, SERVICE, url).await?;
        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| HuntError::decode("Nominatim response", e))?;

        let locations = map_places(places);
        tracing::info!("Found {} valid locations for '{}'", locations.len(), query);
        Ok(locations)
    }

    fn service_name(&self) -> &str {
        SERVICE
    }
}

/// One row of a Nominatim `format=json` response
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

/// Map response rows to locations, keeping the service's ranking order and
/// dropping rows without usable coordinates
pub fn map_places(places: Vec<NominatimPlace>) -> Vec<HuntLocation> {
    places
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.trim().parse::<f64>().ok();
            let lon = place.lon.trim().parse::<f64>().ok();
            match lat.zip(lon) {
                Some((lat, lon)) if is_searchable(lat, lon) => {
                    Some(HuntLocation::from_display_name(&place.display_name, lat, lon))
                }
                _ => {
                    tracing::warn!("Skipped invalid coords for: {}", place.display_name);
                    None
                }
            }
        })
        .collect()
}
