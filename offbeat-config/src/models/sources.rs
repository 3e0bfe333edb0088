use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::env;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    #[serde(default)]
    pub log: FileLogConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Humantime string, e.g. `"10s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileStorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub_latency: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Environment-derived configuration values.
///
/// Values are kept raw; parsing happens when the config is composed so a
/// bad value can be reported against its variable name.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_timeout: Option<String>,
    pub storage_dir: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub otp_length: Option<String>,
    pub stub_latency: Option<String>,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            config_path: var(env::CONFIG_PATH).map(PathBuf::from),
            api_url: var(env::API_URL),
            api_timeout: var(env::API_TIMEOUT),
            storage_dir: var(env::STORAGE_DIR).map(PathBuf::from),
            storage_key: var(env::STORAGE_KEY),
            otp_length: var(env::OTP_LENGTH),
            stub_latency: var(env::STUB_LATENCY),
            log_filter: var(env::LOG_FILTER),
        }
    }
}
