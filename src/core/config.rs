//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,civic_console=debug";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend that `/api/*` is forwarded to
    /// Example: http://localhost:8080/api
    pub backend_url: Option<String>,

    /// Tracing filter directive
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("BACKEND_URL").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(backend_url: Option<String>, log_filter: Option<String>) -> Self {
        Self {
            backend_url: backend_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            log_filter: log_filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Check if a backend is configured
    pub fn has_backend(&self) -> bool {
        self.backend_url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_with_backend() {
        let config = Config::from_vars(
            Some("http://localhost:8080/api/".to_string()),
            Some("warn".to_string()),
        );

        assert_eq!(
            config.backend_url.as_deref(),
            Some("http://localhost:8080/api")
        );
        assert!(config.has_backend());
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_vars(None, None);

        assert!(!config.has_backend());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_vars(Some("   ".to_string()), Some(String::new()));

        assert!(config.backend_url.is_none());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
