//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `CLIENT_ID` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CLIENT_ID`: OAuth client id (required)
//! - `CLIENT_SECRET`: OAuth client secret
//! - `NPSSO`: Session handle; fetched at startup when unset
//! - `PORT`: Listen port (default 3000)
//! - `CORS_ORIGIN`: Allowed origin (default `*`)
//! - `PSNLINK_TOKEN_STORE`: Token record path
//! - `PSNLINK_RESOURCE_DIR`: Staging directory for URL-sourced uploads
//! - `PSNLINK_REQUEST_TIMEOUT_SECS`: Outbound request timeout in seconds
//! - `PSNLINK_API_BASE_URL`: Point every PSN endpoint at one base URL
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./psnlink.json` or `./psnlink.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use psnlink_domain::constants::DEFAULT_TOKEN_STORE_PATH;
use psnlink_domain::{
    ApiConfig, AppConfig, AuthConfig, PsnEndpoints, PsnError, ResourceConfig, Result,
    ServerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If `CLIENT_ID` is
/// missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PsnError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PsnError::Config` if `CLIENT_ID` is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<AppConfig> {
    let client_id = env_var("CLIENT_ID")?;

    let auth = AuthConfig {
        client_id,
        client_secret: env_opt("CLIENT_SECRET"),
        npsso: env_opt("NPSSO"),
        token_store_path: env_opt("PSNLINK_TOKEN_STORE")
            .map_or_else(|| PathBuf::from(DEFAULT_TOKEN_STORE_PATH), PathBuf::from),
    };

    let mut api = ApiConfig::default();
    if let Some(timeout) = env_parse::<u64>("PSNLINK_REQUEST_TIMEOUT_SECS")? {
        api.request_timeout_secs = timeout;
    }
    if let Some(base) = env_opt("PSNLINK_API_BASE_URL") {
        api.endpoints = PsnEndpoints::with_base(&base);
    }

    let mut resources = ResourceConfig::default();
    if let Some(dir) = env_opt("PSNLINK_RESOURCE_DIR") {
        resources.temp_dir = PathBuf::from(dir);
    }

    let mut server = ServerConfig::default();
    if let Some(port) = env_parse::<u16>("PORT")? {
        server.port = port;
    }
    if let Some(origin) = env_opt("CORS_ORIGIN") {
        server.cors_origin = origin;
    }

    Ok(AppConfig { auth, api, resources, server })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PsnError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PsnError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => discover_config_path().ok_or_else(|| {
            PsnError::Config(
                "CLIENT_ID is not set and no config file was found in the standard locations"
                    .to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PsnError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    if config.auth.client_id.trim().is_empty() {
        return Err(PsnError::Config("auth.client_id must not be empty".to_string()));
    }
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PsnError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PsnError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PsnError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn discover_config_path() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("psnlink.json"),
        dir.join("psnlink.toml"),
    ]
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| PsnError::Config(format!("Missing required environment variable: {}", key)))
}

/// Optional variable; set-but-blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| PsnError::Config(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 9] = [
        "CLIENT_ID",
        "CLIENT_SECRET",
        "NPSSO",
        "PORT",
        "CORS_ORIGIN",
        "PSNLINK_TOKEN_STORE",
        "PSNLINK_RESOURCE_DIR",
        "PSNLINK_REQUEST_TIMEOUT_SECS",
        "PSNLINK_API_BASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        (temp_file, path)
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("CLIENT_ID", "client-123");

        let config = load_from_env().expect("config");

        assert_eq!(config.auth.client_id, "client-123");
        assert_eq!(config.auth.client_secret, None);
        assert_eq!(config.auth.npsso, None);
        assert_eq!(config.auth.token_store_path, PathBuf::from("data/psn_tokens.json"));
        assert_eq!(config.resources.temp_dir, PathBuf::from("data/psnapi/resources"));
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.api.endpoints, PsnEndpoints::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origin, "*");

        clear_env();
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("CLIENT_ID", "client-123");
        std::env::set_var("CLIENT_SECRET", "secret");
        std::env::set_var("NPSSO", "npsso-value");
        std::env::set_var("PORT", "8080");
        std::env::set_var("CORS_ORIGIN", "https://app.example.com");
        std::env::set_var("PSNLINK_TOKEN_STORE", "/tmp/tokens.json");
        std::env::set_var("PSNLINK_RESOURCE_DIR", "/tmp/resources");
        std::env::set_var("PSNLINK_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("PSNLINK_API_BASE_URL", "http://127.0.0.1:9000/");

        let config = load_from_env().expect("config");

        assert_eq!(config.auth.client_secret.as_deref(), Some("secret"));
        assert_eq!(config.auth.npsso.as_deref(), Some("npsso-value"));
        assert_eq!(config.auth.token_store_path, PathBuf::from("/tmp/tokens.json"));
        assert_eq!(config.resources.temp_dir, PathBuf::from("/tmp/resources"));
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(
            config.api.endpoints.token_url,
            "http://127.0.0.1:9000/api/authz/v3/oauth/token"
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origin, "https://app.example.com");

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_client_id() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("CLIENT_ID", "   ");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, PsnError::Config(_)), "Should be a Config error");

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_port() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("CLIENT_ID", "client-123");
        std::env::set_var("PORT", "not-a-port");

        let err = load_from_env().unwrap_err();
        match err {
            PsnError::Config(msg) => assert!(msg.contains("PORT")),
            other => panic!("expected config error, got {:?}", other),
        }

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[auth]
client_id = "file-client"
npsso = "file-npsso"

[api]
request_timeout_secs = 10

[server]
port = 4000
"#;
        let (_temp, path) = write_config(toml_content, "toml");

        let config = load_from_file(Some(path.clone())).expect("config");
        assert_eq!(config.auth.client_id, "file-client");
        assert_eq!(config.auth.npsso.as_deref(), Some("file-npsso"));
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.cors_origin, "*");
        assert_eq!(config.auth.token_store_path, PathBuf::from("data/psn_tokens.json"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "auth": { "client_id": "json-client", "client_secret": "s" },
            "api": { "endpoints": { "token_url": "http://localhost/token" } }
        }"#;
        let (_temp, path) = write_config(json_content, "json");

        let config = load_from_file(Some(path.clone())).expect("config");
        assert_eq!(config.auth.client_id, "json-client");
        assert_eq!(config.api.endpoints.token_url, "http://localhost/token");
        assert_eq!(
            config.api.endpoints.messaging_base_url,
            PsnEndpoints::default().messaging_base_url
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_rejects_blank_client_id() {
        let (_temp, path) = write_config("[auth]\nclient_id = \"\"\n", "toml");

        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert!(matches!(err, PsnError::Config(_)));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(PsnError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_extension() {
        let result = parse_config("client_id: x", Path::new("config.yaml"));
        match result {
            Err(PsnError::Config(msg)) => assert!(msg.contains("yaml")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
