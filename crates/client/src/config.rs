//! Client configuration loaded from environment variables.

/// Connection settings for the BAMS backend.
///
/// Defaults suit local development; override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Build a configuration, normalizing the base URL.
    pub fn new(base_url: impl Into<String>, request_timeout_secs: u64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            request_timeout_secs,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `BAMS_API_BASE_URL`         | `http://localhost:8080` |
    /// | `BAMS_REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BAMS_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());

        let request_timeout_secs: u64 = std::env::var("BAMS_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("BAMS_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self::new(base_url, request_timeout_secs)
    }
}
