#![allow(dead_code)]

//! Shared harness for gateway integration tests
//!
//! Builds the production wiring (token endpoint client, file token store,
//! gateway client) against a wiremock server in a scratch directory.

use std::path::PathBuf;
use std::sync::Arc;

use psnlink_domain::{
    ApiConfig, AppConfig, AuthConfig, PsnEndpoints, ResourceConfig, ServerConfig,
};
use psnlink_infra::{PsnApiClient, PsnAuthService};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/api/authz/v3/oauth/token";

/// Gateway wired against a mock server; keeps its scratch directory alive.
pub struct TestGateway {
    pub server: MockServer,
    pub client: PsnApiClient,
    pub config: AppConfig,
    _dir: TempDir,
}

impl TestGateway {
    pub async fn new(npsso: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("temp dir should be created");
        let config = test_config(&server.uri(), dir.path().to_path_buf(), npsso);

        let auth = PsnAuthService::from_config(&config.auth, &config.api)
            .expect("auth service should build");
        let client = PsnApiClient::new(&config.api, &config.resources, Arc::new(auth))
            .expect("gateway should build");

        Self { server, client, config, _dir: dir }
    }

    /// Token endpoint answers the session-exchange grant with `access`.
    pub async fn mount_acquisition(&self, access: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=sso_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access,
                "expires_in": 3600,
                "refresh_token": "R1",
                "refresh_token_expires_in": 864000,
                "token_type": "bearer",
                "scope": "psn:mobile.v2.core psn:clientapp"
            })))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    pub fn messaging(&self, suffix: &str) -> String {
        format!("/api/gamingLoungeGroups{suffix}")
    }
}

pub fn test_config(base: &str, dir: PathBuf, npsso: Option<&str>) -> AppConfig {
    AppConfig {
        auth: AuthConfig {
            client_id: "test-client".to_string(),
            client_secret: Some("test-secret".to_string()),
            npsso: npsso.map(ToString::to_string),
            token_store_path: dir.join("data").join("psn_tokens.json"),
        },
        api: ApiConfig { request_timeout_secs: 5, endpoints: PsnEndpoints::with_base(base) },
        resources: ResourceConfig { temp_dir: dir.join("resources") },
        server: ServerConfig::default(),
    }
}
