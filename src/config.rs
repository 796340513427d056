use crate::domain::session::StorageBackend;
use crate::infrastructure::session::{FileStorage, MemoryStorage};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once at startup. Everything has a default so
/// a bare environment still points at a local backend with an in-memory
/// session.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout: Duration,
    /// When set, the session persists here across restarts; when absent it
    /// lives in memory only.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_base_url =
            env::var("NIDUS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let http_timeout = env::var("NIDUS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let session_file = env::var("NIDUS_SESSION_FILE").ok().map(PathBuf::from);

        Self {
            api_base_url,
            http_timeout,
            session_file,
        }
    }

    pub fn session_storage(&self) -> Arc<dyn StorageBackend> {
        match &self.session_file {
            Some(path) => Arc::new(FileStorage::new(path.clone())),
            None => Arc::new(MemoryStorage::default()),
        }
    }
}

/// Installs the fmt subscriber once; safe to call again from tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "nidus=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
