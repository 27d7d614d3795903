//! Client configuration resolved from the environment once at startup

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ENV_API_BASE: &str = "MEDLENS_API_BASE";
const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

const ENV_GEO_BASE: &str = "MEDLENS_GEO_BASE_URL";
const DEFAULT_GEO_BASE: &str = "https://nominatim.openstreetmap.org";

const ENV_REQUEST_TIMEOUT_SECS: &str = "MEDLENS_REQUEST_TIMEOUT_SECS";
const ENV_PREFER_MODEL: &str = "MEDLENS_PREFER_MODEL";

const ENV_THEME_PATH: &str = "MEDLENS_THEME_PATH";
const DEFAULT_THEME_PATH: &str = ".medlens-theme";

/// Application configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the advisory API, no trailing slash.
    pub api_base: String,
    /// Base URL of the third-party place-search service, no trailing slash.
    pub geo_base: String,
    /// Per-request timeout. `None` leaves requests without a deadline; a call
    /// that never resolves keeps its controller pending indefinitely.
    pub request_timeout: Option<Duration>,
    /// Prefer model-based symptom extraction on the backend.
    pub prefer_model: bool,
    /// File the theme flag is persisted to.
    pub theme_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            geo_base: DEFAULT_GEO_BASE.to_string(),
            request_timeout: None,
            prefer_model: true,
            theme_path: PathBuf::from(DEFAULT_THEME_PATH),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let api_base = env::var(ENV_API_BASE)
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let geo_base = env::var(ENV_GEO_BASE)
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GEO_BASE.to_string());

        let request_timeout = env::var(ENV_REQUEST_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        let prefer_model = env::var(ENV_PREFER_MODEL)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        let theme_path = env::var(ENV_THEME_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_THEME_PATH));

        Self {
            api_base,
            geo_base,
            request_timeout,
            prefer_model,
            theme_path,
        }
    }
}
