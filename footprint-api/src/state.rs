//! App state: query engine, config.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use footprint_core::constants::DEFAULT_DATA_FILE;
use footprint_core::error::Result;
use footprint_engine::{CacheConfig, QueryEngine};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// GeoJSON file loaded at startup
    pub data_path: PathBuf,
    /// Query cache settings
    pub cache: CacheConfig,
    /// Period of the background expiry sweep; `None` leaves expiry lazy
    pub sweep_interval: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            cache: CacheConfig::default(),
            sweep_interval: None,
        }
    }
}

impl ApiConfig {
    /// Reads `.env` (if any) and the `FOOTPRINT_*` variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let mut cache = defaults.cache;

        if let Some(max_entries) = env_parse("FOOTPRINT_CACHE_MAX_ENTRIES") {
            cache.max_entries = max_entries;
        }
        if let Some(secs) = env_parse("FOOTPRINT_CACHE_TTL_SECS") {
            cache.ttl = Duration::from_secs(secs);
        }
        cache.enabled = std::env::var("ENABLE_CACHE")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            data_path: std::env::var("FOOTPRINT_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            cache,
            sweep_interval: env_parse::<u64>("FOOTPRINT_CACHE_SWEEP_SECS")
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Sets the data file.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    /// Configuration the server was started with
    pub config: ApiConfig,
    /// The query engine
    pub engine: Arc<QueryEngine>,
    pub(crate) started_at: Instant,
}

impl AppState {
    /// Wraps an already-built engine.
    pub fn new(config: ApiConfig, engine: Arc<QueryEngine>) -> Self {
        Self {
            config,
            engine,
            started_at: Instant::now(),
        }
    }

    /// Loads `config.data_path` and builds the engine over it.
    pub async fn load(config: ApiConfig) -> Result<Self> {
        let engine = QueryEngine::load_async(&config.data_path, config.cache.clone()).await?;
        Ok(Self::new(config, Arc::new(engine)))
    }
}
