//! Configuration structures
//!
//! Populated by `psnlink_infra::config::load` from the environment or a
//! TOML/JSON file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESOURCE_DIR,
    DEFAULT_TOKEN_STORE_PATH, MESSAGING_BASE_URL, PROFILE_BASE_URL, SEARCH_BASE_URL,
    SSO_COOKIE_URL, TOKEN_URL,
};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Credentials and token persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Session handle (NPSSO cookie value). Fetched at startup when absent.
    #[serde(default)]
    pub npsso: Option<String>,
    #[serde(default = "default_token_store_path")]
    pub token_store_path: PathBuf,
}

/// Outbound API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub endpoints: PsnEndpoints,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            endpoints: PsnEndpoints::default(),
        }
    }
}

/// Remote endpoint locations. Production values by default; tests point
/// these at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsnEndpoints {
    pub token_url: String,
    pub sso_cookie_url: String,
    pub profile_base_url: String,
    pub search_base_url: String,
    pub messaging_base_url: String,
}

impl Default for PsnEndpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            sso_cookie_url: SSO_COOKIE_URL.to_string(),
            profile_base_url: PROFILE_BASE_URL.to_string(),
            search_base_url: SEARCH_BASE_URL.to_string(),
            messaging_base_url: MESSAGING_BASE_URL.to_string(),
        }
    }
}

impl PsnEndpoints {
    /// Point every endpoint at a single base (used against mock servers).
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            token_url: format!("{base}/api/authz/v3/oauth/token"),
            sso_cookie_url: format!("{base}/api/v1/ssocookie"),
            profile_base_url: format!("{base}/userProfile"),
            search_base_url: format!("{base}/api/search"),
            messaging_base_url: format!("{base}/api/gamingLoungeGroups"),
        }
    }
}

/// Scratch location for URL-sourced uploads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default = "default_resource_dir")]
    pub temp_dir: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self { temp_dir: default_resource_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, cors_origin: default_cors_origin() }
    }
}

fn default_token_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_TOKEN_STORE_PATH)
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESOURCE_DIR)
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_cors_origin() -> String {
    DEFAULT_CORS_ORIGIN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: AppConfig = parse_json(r#"{ "auth": { "client_id": "abc" } }"#);
        assert_eq!(config.auth.client_id, "abc");
        assert_eq!(config.auth.token_store_path, PathBuf::from(DEFAULT_TOKEN_STORE_PATH));
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.api.endpoints, PsnEndpoints::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origin, "*");
    }

    #[test]
    fn with_base_rewrites_every_endpoint() {
        let endpoints = PsnEndpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(endpoints.token_url, "http://127.0.0.1:9000/api/authz/v3/oauth/token");
        assert_eq!(endpoints.messaging_base_url, "http://127.0.0.1:9000/api/gamingLoungeGroups");
    }

    fn parse_json(raw: &str) -> AppConfig {
        serde_json::from_str(raw).expect("valid config")
    }
}
