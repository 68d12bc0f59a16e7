use std::fmt;
use std::sync::Arc;

use voicematch_db::memory::MemoryStore;
use voicematch_db::rest::RestStore;
use voicematch_db::DataStore;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// hosted backend credentials, which are required when `STORE_BACKEND=rest`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 100 MiB).
    pub max_upload_bytes: usize,
    /// Which data store the server talks to.
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `104857600`                |
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (100 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            store: StoreConfig::from_env(port),
        }
    }
}

/// Data store selection.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// The hosted backend (REST tables plus object storage).
    Rest { base_url: String, api_key: String },
    /// Process-local tables; data is lost on restart.
    ///
    /// `public_base` prefixes the public object URLs it reports. The server
    /// does not serve those objects.
    Memory { public_base: String },
}

impl StoreConfig {
    /// Read `STORE_BACKEND` (`rest` or `memory`, default `rest`).
    ///
    /// The `rest` backend requires `BACKEND_URL` and `BACKEND_API_KEY`. The
    /// `memory` backend reads `MEMORY_PUBLIC_BASE_URL`, defaulting to
    /// `http://localhost:{port}/storage`.
    pub fn from_env(port: u16) -> Self {
        let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "rest".into());
        match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => Self::Memory {
                public_base: std::env::var("MEMORY_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| format!("http://localhost:{port}/storage")),
            },
            "rest" => Self::Rest {
                base_url: std::env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
                api_key: std::env::var("BACKEND_API_KEY").expect("BACKEND_API_KEY must be set"),
            },
            other => panic!("STORE_BACKEND must be 'rest' or 'memory', got '{other}'"),
        }
    }

    /// Construct the configured store.
    ///
    /// Panics on an invalid base URL so misconfiguration fails at startup.
    pub fn build(&self) -> Arc<dyn DataStore> {
        match self {
            Self::Rest { base_url, api_key } => Arc::new(
                RestStore::new(base_url, api_key.as_str())
                    .unwrap_or_else(|e| panic!("BACKEND_URL is not usable: {e}")),
            ),
            Self::Memory { public_base } => Arc::new(
                MemoryStore::new(public_base)
                    .unwrap_or_else(|e| panic!("MEMORY_PUBLIC_BASE_URL is not usable: {e}")),
            ),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest { base_url, .. } => f
                .debug_struct("Rest")
                .field("base_url", base_url)
                .field("api_key", &"<redacted>")
                .finish(),
            Self::Memory { public_base } => f
                .debug_struct("Memory")
                .field("public_base", public_base)
                .finish(),
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
