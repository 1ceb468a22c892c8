//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Instant;

use psnlink_core::PsnGateway;
use psnlink_domain::{AppConfig, Result};
use psnlink_infra::{PsnApiClient, PsnAuthService};
use tracing::{debug, info, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: AppConfig,
    pub gateway: Arc<dyn PsnGateway>,
    /// Present only with production wiring; used for startup bootstrap.
    auth: Option<Arc<PsnAuthService>>,
    started_at: Instant,
}

impl AppContext {
    /// Wire the production gateway: token endpoint client, file token
    /// store, and PSN client.
    ///
    /// # Errors
    /// Returns `Config` if the credentials or HTTP clients cannot be built
    pub fn new(config: AppConfig) -> Result<Self> {
        let auth = Arc::new(PsnAuthService::from_config(&config.auth, &config.api)?);
        let gateway = PsnApiClient::new(&config.api, &config.resources, auth.clone())?;

        info!(
            token_store = %config.auth.token_store_path.display(),
            resource_dir = %config.resources.temp_dir.display(),
            "application context initialized"
        );

        Ok(Self {
            config,
            gateway: Arc::new(gateway),
            auth: Some(auth),
            started_at: Instant::now(),
        })
    }

    /// Context around an arbitrary gateway (tests, alternative backends).
    pub fn with_gateway(config: AppConfig, gateway: Arc<dyn PsnGateway>) -> Self {
        Self { config, gateway, auth: None, started_at: Instant::now() }
    }

    /// Fetch a session handle once at startup when none is configured.
    ///
    /// Failure is logged and otherwise ignored; operations then report
    /// `Unauthenticated` until a handle is supplied.
    pub async fn bootstrap_session(&self) {
        let Some(auth) = &self.auth else {
            return;
        };

        match auth.bootstrap_if_missing().await {
            Ok(true) => info!("session handle fetched automatically"),
            Ok(false) => debug!("session handle configured; skipping bootstrap"),
            Err(err) => warn!(
                error = %err,
                "could not fetch a session handle; set NPSSO or send an x-npsso header"
            ),
        }
    }

    /// `true` when the configuration pins the session handle, in which case
    /// per-request handles are ignored.
    #[must_use]
    pub fn has_configured_session(&self) -> bool {
        self.config.auth.npsso.as_deref().is_some_and(|npsso| !npsso.trim().is_empty())
    }

    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
