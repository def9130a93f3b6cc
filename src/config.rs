use std::{env, path::PathBuf, time::Duration};

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_timeout: Duration,
    /// `None` means the project data directory.
    pub cache_dir: Option<PathBuf>,
    pub cache_version: String,
    pub cache_ttl: Option<Duration>,
    pub facilities_path: Option<PathBuf>,
    pub coordinates_path: Option<PathBuf>,
    pub strict_precision: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            cache_dir: None,
            cache_version: assessment::DEFAULT_CACHE_VERSION.to_string(),
            cache_ttl: None,
            facilities_path: None,
            coordinates_path: None,
            strict_precision: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(api_url) = get("SITE_ASSESSMENT_API_URL") {
            config.api_url = api_url;
        }
        if let Some(raw) = get("SITE_ASSESSMENT_API_TIMEOUT_SECS") {
            config.api_timeout = Duration::from_secs(parse_secs(&raw, "SITE_ASSESSMENT_API_TIMEOUT_SECS")?);
        }
        config.cache_dir = get("SITE_ASSESSMENT_CACHE_DIR").map(PathBuf::from);
        if let Some(version) = get("SITE_ASSESSMENT_CACHE_VERSION") {
            config.cache_version = version;
        }
        if let Some(raw) = get("SITE_ASSESSMENT_CACHE_TTL_SECS") {
            config.cache_ttl = Some(Duration::from_secs(parse_secs(&raw, "SITE_ASSESSMENT_CACHE_TTL_SECS")?));
        }
        config.facilities_path = get("SITE_ASSESSMENT_FACILITIES").map(PathBuf::from);
        config.coordinates_path = get("SITE_ASSESSMENT_COORDINATES").map(PathBuf::from);
        config.strict_precision = get("SITE_ASSESSMENT_STRICT_PRECISION")
            .map(|raw| parse_bool(&raw))
            .unwrap_or(false);

        Ok(config)
    }
}

fn parse_secs(raw: &str, env_name: &str) -> Result<u64> {
    raw.parse::<u64>()
        .with_context(|| format!("{env_name} must be a whole number of seconds"))
}

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}
