use std::time::Duration;

pub use offbeat_core::DEFAULT_CODE_LENGTH as DEFAULT_OTP_LENGTH;
pub use offbeat_core::session::DEFAULT_STORAGE_KEY;

/// Base URL used when nothing is configured. Relative values are resolved
/// against [`DEFAULT_ORIGIN`].
pub const DEFAULT_API_URL: &str = "/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_STUB_LATENCY: Duration = Duration::ZERO;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Longest code the segmented input is configured for.
pub const MAX_OTP_LENGTH: usize = 12;

pub const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["offbeat.toml", "config/offbeat.toml"];

/// Fallback for the session directory when the platform has no data dir.
pub const FALLBACK_STORAGE_DIR: &str = ".offbeat";

pub mod env {
    pub const CONFIG_PATH: &str = "OFFBEAT_CONFIG";
    pub const API_URL: &str = "OFFBEAT_API_URL";
    pub const API_TIMEOUT: &str = "OFFBEAT_API_TIMEOUT";
    pub const STORAGE_DIR: &str = "OFFBEAT_STORAGE_DIR";
    pub const STORAGE_KEY: &str = "OFFBEAT_STORAGE_KEY";
    pub const OTP_LENGTH: &str = "OFFBEAT_OTP_LENGTH";
    pub const STUB_LATENCY: &str = "OFFBEAT_STUB_LATENCY";
    pub const LOG_FILTER: &str = "RUST_LOG";
}
