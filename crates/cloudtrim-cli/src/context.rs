//! Composition root: resolves configuration and wires the services.

use anyhow::{Context, Result};
use cloudtrim_application::{AuthService, DashboardService, DemoFallback, RecommendationService};
use cloudtrim_core::api::{CloudTrimApi, MemoryTokenStore, TokenStore};
use cloudtrim_core::config::{AuthMode, ClientConfig, FallbackMode};
use cloudtrim_core::fallback::{FallbackProvider, NoFallback};
use cloudtrim_core::store::Store;
use cloudtrim_infrastructure::{CloudTrimPaths, ConfigService, FileTokenStore};
use cloudtrim_interaction::HttpApiClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Global command-line flags that override the configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub demo: bool,
    pub no_fallback: bool,
    pub config: Option<PathBuf>,
}

impl Overrides {
    /// Applies the flags on top of an already env-resolved config.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        if self.demo {
            config.auth_mode = AuthMode::Demo;
            config.fallback = FallbackMode::Demo;
        }
        if self.no_fallback {
            config.fallback = FallbackMode::None;
        }
        config
    }
}

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub config: ClientConfig,
    pub store: Arc<Store>,
    pub tokens: Arc<dyn TokenStore>,
    /// Where the token lives, `None` when it is kept in memory.
    pub token_path: Option<PathBuf>,
    pub auth: AuthService,
    pub dashboard: DashboardService,
    pub recommendations: RecommendationService,
}

impl AppContext {
    /// Loads `config.toml`, applies environment and flag overrides.
    pub fn load_config(paths: &CloudTrimPaths, overrides: &Overrides) -> Result<ClientConfig> {
        let service = match &overrides.config {
            Some(path) => ConfigService::with_path(path.clone()),
            None => ConfigService::new(paths).context("Failed to locate config directory")?,
        };
        let config = service
            .resolve()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;
        Ok(overrides.apply(config))
    }

    pub fn build(paths: &CloudTrimPaths, config: ClientConfig) -> Result<Self> {
        let (tokens, token_path): (Arc<dyn TokenStore>, Option<PathBuf>) = match config.auth_mode {
            AuthMode::Demo => (Arc::new(MemoryTokenStore::new()), None),
            AuthMode::Remote => {
                let store = FileTokenStore::new(paths).context("Failed to locate credentials file")?;
                let path = store.path().clone();
                (Arc::new(store), Some(path))
            }
        };

        let api: Arc<dyn CloudTrimApi> = Arc::new(
            HttpApiClient::from_config(&config, tokens.clone())
                .context("Failed to create API client")?,
        );

        let fallback: Arc<dyn FallbackProvider> = match config.fallback {
            FallbackMode::Demo => Arc::new(DemoFallback::new()),
            FallbackMode::None => Arc::new(NoFallback),
        };

        let store = Arc::new(Store::new());
        tracing::debug!(
            "[AppContext] api={} auth={} fallback={:?}",
            config.api_base_url,
            config.auth_mode,
            config.fallback
        );

        Ok(Self {
            auth: AuthService::new(store.clone(), api.clone(), config.auth_mode),
            dashboard: DashboardService::new(store.clone(), api.clone(), fallback),
            recommendations: RecommendationService::new(store.clone(), api),
            store,
            tokens,
            token_path,
            config,
        })
    }
}
