//! Runtime configuration, read from the environment.

use delivery_router::{HistoryMode, RouterConfig};
use url::Url;

use crate::ConfigError;

/// Selects the history mode, `hash` or `memory`.
pub const HISTORY_ENV: &str = "DELIVERY_HISTORY";
/// The path the console is served from, placed before the `#`.
pub const BASE_PATH_ENV: &str = "DELIVERY_BASE_PATH";
/// The document URL the console starts from.
pub const ORIGIN_ENV: &str = "DELIVERY_ORIGIN";
/// A `tracing` filter directive.
pub const LOG_ENV: &str = "DELIVERY_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// How the console is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub history: HistoryMode,
    pub base_path: Option<String>,
    pub origin: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history: HistoryMode::Hash,
            base_path: None,
            origin: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(mode) = var(HISTORY_ENV) {
            config.history = mode.parse()?;
        }
        config.base_path = var(BASE_PATH_ENV);
        if let Some(origin) = var(ORIGIN_ENV) {
            config.set_origin(origin)?;
        }
        if let Some(filter) = var(LOG_ENV) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Use `origin` as the document URL, after checking that it parses.
    pub fn set_origin(&mut self, origin: String) -> Result<(), ConfigError> {
        if let Err(source) = Url::parse(&origin) {
            return Err(ConfigError::InvalidOrigin { origin, source });
        }
        self.origin = Some(origin);
        Ok(())
    }

    /// The router configuration matching this setup.
    pub fn router_config(&self) -> RouterConfig {
        let mut config = RouterConfig::default().history(self.history);
        if let Some(base_path) = &self.base_path {
            config = config.prefix(base_path.clone());
        }
        if let Some(origin) = &self.origin {
            config = config.document_url(origin.clone());
        }
        config
    }
}
