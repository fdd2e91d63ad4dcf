use crate::error::{FetchError, Result};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://ja.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = "wikigraph/0.1 (https://github.com/trapdoorsec/wikigraph)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for a [`crate::WikiClient`]. Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Config pointing at an arbitrary `api.php` endpoint.
    pub fn for_endpoint(api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", api_url, e)))?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                api_url.scheme(),
                api_url
            )));
        }

        Ok(Self {
            api_url,
            ..Self::default()
        })
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// A zero timeout would fail every request, so it is raised to one second.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs.max(1);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // constant, always parses
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
