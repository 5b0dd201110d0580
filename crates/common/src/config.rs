use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";

/// All service configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Market data provider
    pub twelvedata_api_key: String,
    pub twelvedata_base_url: String,
    pub http_timeout_secs: u64,

    // HTTP server
    pub port: u16,

    /// Optional TOML file overriding the signal pipeline parameters.
    pub signal_config_path: Option<String>,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        Config {
            twelvedata_api_key: required_env("TWELVEDATA_API_KEY"),
            twelvedata_base_url: optional_env("TWELVEDATA_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http_timeout_secs: optional_env("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            port: optional_env("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5501),
            signal_config_path: optional_env("SIGNAL_CONFIG_PATH"),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
