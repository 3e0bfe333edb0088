pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Absolute base URL, no trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub dir: PathBuf,
    /// Name of the persisted session entry.
    pub key: String,
}

impl StorageConfig {
    pub fn ensure_directory(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub otp_length: usize,
    /// Artificial delay for the placeholder authenticator.
    pub stub_latency: Duration,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
