pub mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_TIMEOUT, DEFAULT_API_URL, DEFAULT_CONFIG_LOCATIONS,
    DEFAULT_LOG_FILTER, DEFAULT_ORIGIN, DEFAULT_OTP_LENGTH,
    DEFAULT_STORAGE_KEY, DEFAULT_STUB_LATENCY, MAX_OTP_LENGTH, env,
};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    ApiConfig, AuthConfig, Config, ConfigMetadata, LogConfig, StorageConfig,
};
use crate::util::{default_storage_dir, normalize_base_url, parse_duration};

pub use error::ConfigLoadError;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// Result of a successful load.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

/// Non-fatal findings collected while composing the config.
#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings {
    items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then compose the config from the file and the process
    /// environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_from(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose the config against an explicit environment, without reading
    /// any `.env` file.
    pub fn load_from(
        &self,
        env_config: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;
        let (config, warnings) =
            compose_config(file_config, env_config, config_path)?;

        tracing::debug!(
            "[Config] Loaded (api: {}, storage: {})",
            config.api.base_url,
            config.storage.dir.display()
        );
        for warning in warnings.iter() {
            tracing::warn!("[Config] {}", warning.message);
        }

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env_config: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No offbeat.toml detected; using defaults and environment variables",
            format!("Create offbeat.toml or set {}", env::CONFIG_PATH),
        );
    }

    let FileConfig {
        api: file_api,
        storage: file_storage,
        auth: file_auth,
        log: file_log,
    } = file_config.unwrap_or_default();

    let raw_url = env_config
        .api_url
        .or(file_api.base_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let base_url =
        normalize_base_url(&raw_url, DEFAULT_ORIGIN).map_err(|source| {
            ConfigLoadError::InvalidApiUrl {
                value: raw_url.clone(),
                source,
            }
        })?;
    if raw_url.trim().starts_with('/') {
        warnings.push(format!(
            "API base URL '{}' resolved against {}",
            raw_url.trim(),
            DEFAULT_ORIGIN
        ));
    }

    let (timeout_key, timeout_raw) = match env_config.api_timeout {
        Some(raw) => (env::API_TIMEOUT, Some(raw)),
        None => ("api.timeout", file_api.timeout),
    };
    let api = ApiConfig {
        base_url,
        timeout: resolve_duration(timeout_key, timeout_raw, DEFAULT_API_TIMEOUT)?,
    };

    let storage = StorageConfig {
        dir: env_config
            .storage_dir
            .or(file_storage.dir)
            .unwrap_or_else(default_storage_dir),
        key: env_config
            .storage_key
            .or(file_storage.key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
    };

    let otp_length = match env_config.otp_length {
        Some(raw) => parse_otp_length(env::OTP_LENGTH, &raw)?,
        None => match file_auth.otp_length {
            Some(length) => {
                check_otp_length("auth.otp_length", length)?;
                length
            }
            None => DEFAULT_OTP_LENGTH,
        },
    };

    let (latency_key, latency_raw) = match env_config.stub_latency {
        Some(raw) => (env::STUB_LATENCY, Some(raw)),
        None => ("auth.stub_latency", file_auth.stub_latency),
    };
    let auth = AuthConfig {
        otp_length,
        stub_latency: resolve_duration(latency_key, latency_raw, DEFAULT_STUB_LATENCY)?,
    };

    let log = LogConfig {
        filter: env_config
            .log_filter
            .or(file_log.filter)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
    };

    let config = Config {
        api,
        storage,
        auth,
        log,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    Ok((config, warnings))
}

fn resolve_duration(
    key: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match raw {
        Some(value) => parse_duration(&value).map_err(|source| {
            ConfigLoadError::InvalidDuration { key, value, source }
        }),
        None => Ok(default),
    }
}

fn parse_otp_length(
    key: &'static str,
    raw: &str,
) -> Result<usize, ConfigLoadError> {
    let length = raw.trim().parse::<usize>().map_err(|_| {
        ConfigLoadError::InvalidOtpLength {
            key,
            value: raw.to_string(),
            max: MAX_OTP_LENGTH,
        }
    })?;
    check_otp_length(key, length)?;
    Ok(length)
}

fn check_otp_length(
    key: &'static str,
    length: usize,
) -> Result<(), ConfigLoadError> {
    if (1..=MAX_OTP_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(ConfigLoadError::InvalidOtpLength {
            key,
            value: length.to_string(),
            max: MAX_OTP_LENGTH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(
        file: Option<FileConfig>,
        env: EnvConfig,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        compose_config(file, env, None)
    }

    #[test]
    fn defaults_apply_without_sources() {
        let (config, warnings) = compose(None, EnvConfig::default()).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout, Duration::from_secs(10));
        assert_eq!(config.storage.key, "app-storage");
        assert_eq!(config.auth.otp_length, 6);
        assert_eq!(config.auth.stub_latency, Duration::ZERO);
        assert_eq!(config.log.filter, "info");
        assert!(!warnings.is_empty());
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = FileConfig::default();
        file.api.base_url = Some("https://file.example.com".into());
        file.auth.otp_length = Some(4);
        let env = EnvConfig {
            api_url: Some("https://env.example.com/".into()),
            ..Default::default()
        };

        let (config, _) = compose(Some(file), env).unwrap();

        assert_eq!(config.api.base_url, "https://env.example.com");
        assert_eq!(config.auth.otp_length, 4);
    }

    #[test]
    fn bad_duration_names_the_key() {
        let env = EnvConfig {
            api_timeout: Some("forever".into()),
            ..Default::default()
        };

        let err = compose(None, env).unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::InvalidDuration {
                key: "OFFBEAT_API_TIMEOUT",
                ..
            }
        ));
    }

    #[test]
    fn bad_file_duration_names_the_file_key() {
        let mut file = FileConfig::default();
        file.api.timeout = Some("forever".into());

        let err = compose(Some(file), EnvConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidDuration {
                key: "api.timeout",
                ..
            }
        ));

        let mut file = FileConfig::default();
        file.auth.stub_latency = Some("soon".into());
        let env = EnvConfig {
            stub_latency: Some("250ms".into()),
            ..Default::default()
        };
        let (config, _) = compose(Some(file), env).unwrap();
        assert_eq!(config.auth.stub_latency, Duration::from_millis(250));

        let mut file = FileConfig::default();
        file.auth.stub_latency = Some("soon".into());
        assert!(matches!(
            compose(Some(file), EnvConfig::default()),
            Err(ConfigLoadError::InvalidDuration {
                key: "auth.stub_latency",
                ..
            })
        ));
    }

    #[test]
    fn otp_length_must_be_in_range() {
        for raw in ["0", "13", "six"] {
            let env = EnvConfig {
                otp_length: Some(raw.into()),
                ..Default::default()
            };
            assert!(matches!(
                compose(None, env),
                Err(ConfigLoadError::InvalidOtpLength { .. })
            ));
        }

        let mut file = FileConfig::default();
        file.auth.otp_length = Some(0);
        assert!(matches!(
            compose(Some(file), EnvConfig::default()),
            Err(ConfigLoadError::InvalidOtpLength {
                key: "auth.otp_length",
                ..
            })
        ));
    }

    #[test]
    fn blank_storage_key_falls_back() {
        let mut file = FileConfig::default();
        file.storage.key = Some("  ".into());

        let (config, _) = compose(Some(file), EnvConfig::default()).unwrap();

        assert_eq!(config.storage.key, "app-storage");
    }

    #[test]
    fn invalid_url_is_reported() {
        let env = EnvConfig {
            api_url: Some("http://exa mple.com".into()),
            ..Default::default()
        };

        assert!(matches!(
            compose(None, env),
            Err(ConfigLoadError::InvalidApiUrl { .. })
        ));
    }
}
