use std::{env, path::PathBuf, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7006";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub announcement_api_url: String,
    pub google_client_id: Option<SecretString>,
    pub token_store_path: PathBuf,
    pub accept_invalid_certs: bool,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Self {
            announcement_api_url: env::var("ANNOUNCEMENT_API_URL")
                .unwrap_or_else(|_| format!("{}/api/Announcement", api_base_url)),
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok().map(SecretString::from),
            token_store_path: env::var("TOKEN_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".quick-junction/session.json")),
            accept_invalid_certs: env::var("ACCEPT_INVALID_CERTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            api_base_url,
        }
    }

    /// Rejects URLs the HTTP client could never reach.
    pub fn validate(&self) -> AppResult<()> {
        for (name, url) in [
            ("API_BASE_URL", &self.api_base_url),
            ("ANNOUNCEMENT_API_URL", &self.announcement_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::ConfigError(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        Ok(())
    }

    /// Absolute URL for a path relative to the API base.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://api.test".to_string(),
            announcement_api_url: "http://api.test/api/Announcement".to_string(),
            google_client_id: None,
            token_store_path: PathBuf::from("session-test.json"),
            accept_invalid_certs: false,
            request_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.api_base_url.is_empty());
        assert!(config.announcement_api_url.starts_with("http"));
        assert!(!config.api_base_url.ends_with('/'));
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.api_base_url, "http://api.test");
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_url_joins_paths() {
        let config = Config::test_config();
        assert_eq!(config.api_url("/api/Events"), "http://api.test/api/Events");
        assert_eq!(config.api_url("uploads/a.png"), "http://api.test/uploads/a.png");
    }

    #[test]
    fn test_validate_rejects_non_http_base() {
        let mut config = Config::test_config();
        config.api_base_url = "ftp://files".to_string();

        match config.validate() {
            Err(AppError::ConfigError(msg)) => assert!(msg.contains("API_BASE_URL")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }
}
