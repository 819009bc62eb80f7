use crate::error::{HuntError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_STOCK_PHOTO_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_USER_AGENT: &str = concat!("CityChamberHunt/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_COUNTRY_CODES: &str = "ca";
pub const DEFAULT_SNAPSHOT_SPAN_METERS: f64 = 4000.0;
pub const DEFAULT_PRELOAD_PAUSE_MS: u64 = 300;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for City Chamber Hunt
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub geocoder_url: ConfigValue<String>,
    pub user_agent: ConfigValue<String>,
    pub search_limit: ConfigValue<u32>,
    pub country_codes: ConfigValue<String>,
    pub stock_photo_url: ConfigValue<String>,
    pub unsplash_access_key: ConfigValue<Option<String>>,
    pub tile_url: ConfigValue<String>,
    pub snapshot_span_meters: ConfigValue<f64>,
    pub preload_pause_ms: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(default_data_dir(), ConfigSource::Default),
            geocoder_url: ConfigValue::new(DEFAULT_GEOCODER_URL.to_string(), ConfigSource::Default),
            user_agent: ConfigValue::new(DEFAULT_USER_AGENT.to_string(), ConfigSource::Default),
            search_limit: ConfigValue::new(DEFAULT_SEARCH_LIMIT, ConfigSource::Default),
            country_codes: ConfigValue::new(
                DEFAULT_COUNTRY_CODES.to_string(),
                ConfigSource::Default,
            ),
            stock_photo_url: ConfigValue::new(
                DEFAULT_STOCK_PHOTO_URL.to_string(),
                ConfigSource::Default,
            ),
            unsplash_access_key: ConfigValue::new(None, ConfigSource::Default),
            tile_url: ConfigValue::new(DEFAULT_TILE_URL.to_string(), ConfigSource::Default),
            snapshot_span_meters: ConfigValue::new(
                DEFAULT_SNAPSHOT_SPAN_METERS,
                ConfigSource::Default,
            ),
            preload_pause_ms: ConfigValue::new(DEFAULT_PRELOAD_PAUSE_MS, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| HuntError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| HuntError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(url) = file_config.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::File);
        }

        if let Some(user_agent) = file_config.user_agent {
            self.user_agent.update(user_agent, ConfigSource::File);
        }

        if let Some(limit) = file_config.search_limit {
            self.search_limit.update(validate_search_limit(limit)?, ConfigSource::File);
        }

        if let Some(codes) = file_config.country_codes {
            self.country_codes.update(codes, ConfigSource::File);
        }

        if let Some(url) = file_config.stock_photo_url {
            self.stock_photo_url.update(url, ConfigSource::File);
        }

        if let Some(key) = file_config.unsplash_access_key {
            self.unsplash_access_key.update(non_empty(key), ConfigSource::File);
        }

        if let Some(url) = file_config.tile_url {
            self.tile_url.update(url, ConfigSource::File);
        }

        if let Some(span) = file_config.snapshot_span_meters {
            self.snapshot_span_meters.update(validate_span(span)?, ConfigSource::File);
        }

        if let Some(pause) = file_config.preload_pause_ms {
            self.preload_pause_ms.update(pause, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from a TOML file if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!("No config file at {}", path.as_ref().display());
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // HUNT_DATA_DIR
        if let Ok(dir) = env::var("HUNT_DATA_DIR") {
            self.data_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        // HUNT_GEOCODER_URL
        if let Ok(url) = env::var("HUNT_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        // HUNT_USER_AGENT
        if let Ok(user_agent) = env::var("HUNT_USER_AGENT") {
            self.user_agent.update(user_agent, ConfigSource::Environment);
        }

        // HUNT_SEARCH_LIMIT
        if let Ok(limit_str) = env::var("HUNT_SEARCH_LIMIT") {
            match parse_search_limit(&limit_str) {
                Ok(limit) => self.search_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HUNT_SEARCH_LIMIT value '{}': expected integer between 1 and 50",
                    limit_str
                ),
            }
        }

        // HUNT_COUNTRY_CODES
        if let Ok(codes) = env::var("HUNT_COUNTRY_CODES") {
            self.country_codes.update(codes, ConfigSource::Environment);
        }

        // HUNT_STOCK_PHOTO_URL
        if let Ok(url) = env::var("HUNT_STOCK_PHOTO_URL") {
            self.stock_photo_url.update(url, ConfigSource::Environment);
        }

        // HUNT_UNSPLASH_ACCESS_KEY
        if let Ok(key) = env::var("HUNT_UNSPLASH_ACCESS_KEY") {
            self.unsplash_access_key.update(non_empty(key), ConfigSource::Environment);
        }

        // HUNT_TILE_URL
        if let Ok(url) = env::var("HUNT_TILE_URL") {
            self.tile_url.update(url, ConfigSource::Environment);
        }

        // HUNT_SNAPSHOT_SPAN_METERS
        if let Ok(span_str) = env::var("HUNT_SNAPSHOT_SPAN_METERS") {
            let span = span_str.parse::<f64>().ok();
            match span.filter(|span| validate_span(*span).is_ok()) {
                Some(span) => self.snapshot_span_meters.update(span, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid HUNT_SNAPSHOT_SPAN_METERS value '{}': expected positive meters",
                    span_str
                ),
            }
        }

        // HUNT_PRELOAD_PAUSE_MS
        if let Ok(pause_str) = env::var("HUNT_PRELOAD_PAUSE_MS") {
            match pause_str.parse::<u64>() {
                Ok(pause) => self.preload_pause_ms.update(pause, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HUNT_PRELOAD_PAUSE_MS value '{}': expected milliseconds",
                    pause_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(codes) = overrides.country_codes {
            self.country_codes.update(codes, ConfigSource::Cli);
        }

        if let Some(limit) = overrides.search_limit {
            self.search_limit.update(limit, ConfigSource::Cli);
        }

        if let Some(key) = overrides.unsplash_access_key {
            self.unsplash_access_key.update(non_empty(key), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );
        map.insert(
            "geocoder_url".to_string(),
            (self.geocoder_url.value.clone(), self.geocoder_url.source),
        );
        map.insert(
            "user_agent".to_string(),
            (self.user_agent.value.clone(), self.user_agent.source),
        );
        map.insert(
            "search_limit".to_string(),
            (self.search_limit.value.to_string(), self.search_limit.source),
        );
        map.insert(
            "country_codes".to_string(),
            (self.country_codes.value.clone(), self.country_codes.source),
        );
        map.insert(
            "stock_photo_url".to_string(),
            (self.stock_photo_url.value.clone(), self.stock_photo_url.source),
        );

        // Never echo the key itself
        let key_state = match self.unsplash_access_key.value {
            Some(_) => "set",
            None => "not set",
        };
        map.insert(
            "unsplash_access_key".to_string(),
            (key_state.to_string(), self.unsplash_access_key.source),
        );

        map.insert(
            "tile_url".to_string(),
            (self.tile_url.value.clone(), self.tile_url.source),
        );
        map.insert(
            "snapshot_span_meters".to_string(),
            (format!("{}", self.snapshot_span_meters.value), self.snapshot_span_meters.source),
        );
        map.insert(
            "preload_pause_ms".to_string(),
            (self.preload_pause_ms.value.to_string(), self.preload_pause_ms.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    geocoder_url: Option<String>,
    user_agent: Option<String>,
    search_limit: Option<u32>,
    country_codes: Option<String>,
    stock_photo_url: Option<String>,
    unsplash_access_key: Option<String>,
    tile_url: Option<String>,
    snapshot_span_meters: Option<f64>,
    preload_pause_ms: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub country_codes: Option<String>,
    pub search_limit: Option<u32>,
    pub unsplash_access_key: Option<String>,
}

/// Default data directory, `<platform data dir>/city-chamber-hunt`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("city-chamber-hunt")
}

/// Parse a search result limit from string
pub fn parse_search_limit(s: &str) -> Result<u32> {
    let limit = s
        .trim()
        .parse::<u32>()
        .map_err(|e| HuntError::ConfigInvalid {
            key: "search_limit".to_string(),
            reason: format!("Invalid limit '{}': {}", s, e),
        })?;
    validate_search_limit(limit)
}

/// Nominatim caps `limit` at 50
fn validate_search_limit(limit: u32) -> Result<u32> {
    if (1..=50).contains(&limit) {
        Ok(limit)
    } else {
        Err(HuntError::ConfigInvalid {
            key: "search_limit".to_string(),
            reason: format!("Limit must be between 1 and 50, got {}", limit),
        })
    }
}

fn validate_span(span: f64) -> Result<f64> {
    if span.is_finite() && span > 0.0 {
        Ok(span)
    } else {
        Err(HuntError::ConfigInvalid {
            key: "snapshot_span_meters".to_string(),
            reason: format!("Span must be a positive number of meters, got {}", span),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.search_limit.value, 10);
        assert_eq!(config.search_limit.source, ConfigSource::Default);
        assert_eq!(config.country_codes.value, "ca");
        assert_eq!(config.snapshot_span_meters.value, 4000.0);
        assert!(config.unsplash_access_key.value.is_none());
        assert!(config.user_agent.value.starts_with("CityChamberHunt/"));
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
search_limit = 5
country_codes = "ca,us"
unsplash_access_key = "abc123"
snapshot_span_meters = 2500.0
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap();

        assert_eq!(config.search_limit.value, 5);
        assert_eq!(config.search_limit.source, ConfigSource::File);
        assert_eq!(config.country_codes.value, "ca,us");
        assert_eq!(config.unsplash_access_key.value.as_deref(), Some("abc123"));
        assert_eq!(config.snapshot_span_meters.value, 2500.0);
        assert_eq!(config.tile_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_load_from_file_rejects_bad_limit() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "search_limit = 500").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(HuntError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_optional_file_missing_is_ok() {
        let config = LayeredConfig::with_defaults()
            .load_from_optional_file("/nonexistent/hunt.toml")
            .unwrap();
        assert_eq!(config.search_limit.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            data_dir: Some(PathBuf::from("/tmp/hunt")),
            country_codes: Some("us".to_string()),
            search_limit: None,
            unsplash_access_key: Some("   ".to_string()),
        });

        assert_eq!(config.data_dir.value, PathBuf::from("/tmp/hunt"));
        assert_eq!(config.data_dir.source, ConfigSource::Cli);
        assert_eq!(config.country_codes.value, "us");
        assert_eq!(config.search_limit.source, ConfigSource::Default);
        // Blank keys count as unset
        assert!(config.unsplash_access_key.value.is_none());
    }

    #[test]
    fn test_parse_search_limit() {
        assert_eq!(parse_search_limit("10").unwrap(), 10);
        assert_eq!(parse_search_limit(" 3 ").unwrap(), 3);
        assert!(parse_search_limit("0").is_err());
        assert!(parse_search_limit("abc").is_err());
    }

    #[test]
    fn test_inspection_map_hides_key() {
        let mut config = LayeredConfig::with_defaults();
        config
            .unsplash_access_key
            .update(Some("secret".to_string()), ConfigSource::Cli);

        let map = config.to_inspection_map();
        let (value, source) = &map["unsplash_access_key"];
        assert_eq!(value, "set");
        assert_eq!(*source, ConfigSource::Cli);
        assert!(map.contains_key("tile_url"));
    }
}
