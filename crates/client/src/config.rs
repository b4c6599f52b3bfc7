/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Configured Data API base URL (default: `http://localhost:8001`).
    /// The resolver normalizes and probes this before use.
    pub api_base_url: String,
    /// Service-level fallback API token. Used when the session carries no
    /// token of its own; absent means anonymous (read-only) access.
    pub api_token: Option<String>,
}

/// Default API base when nothing is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8001";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            api_token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `API_BASE_URL` | `http://localhost:8001` |
    /// | `API_TOKEN`    | (unset)                 |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let api_token = std::env::var("API_TOKEN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            api_base_url,
            api_token,
        }
    }
}
