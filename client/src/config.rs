use crate::common::ClientError;

/// Environment variable naming the dashboard API root,
/// e.g. `http://localhost:8000/api`.
pub const API_URL_ENV: &str = "INVENTRA_API_URL";

/// The single runtime configuration value of the client: the API base URL.
///
/// Resolved once at startup (from the environment or an explicit value) and
/// then shared by cloning; the library never re-reads the environment after
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a config from an explicit base URL. Trailing slashes are
    /// stripped so that [`endpoint`](Self::endpoint) can join paths verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolve the base URL from [`API_URL_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the variable is missing or
    /// empty, and [`ClientError::InvalidBaseUrl`] when it does not parse as
    /// an absolute URL.
    pub fn from_env() -> Result<Self, ClientError> {
        let raw = std::env::var(API_URL_ENV)
            .map_err(|_| ClientError::Configuration(format!("{API_URL_ENV} is not set")))?;
        if raw.trim().is_empty() {
            return Err(ClientError::Configuration(format!("{API_URL_ENV} is empty")));
        }
        reqwest::Url::parse(&raw).map_err(|e| ClientError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(raw))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_paths_onto_base() {
        let config = ApiConfig::new("http://localhost:8000/api");
        assert_eq!(
            config.endpoint("/auth/token"),
            "http://localhost:8000/api/auth/token"
        );
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ApiConfig::new("http://localhost:8000/api///");
        assert_eq!(config.base_url(), "http://localhost:8000/api");
        assert_eq!(config.endpoint("/chat"), "http://localhost:8000/api/chat");
    }
}
