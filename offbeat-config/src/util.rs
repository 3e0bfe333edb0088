use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use url::Url;

use crate::constants::FALLBACK_STORAGE_DIR;

/// Turn a configured API location into an absolute base URL without a
/// trailing slash.
///
/// Full URLs are kept, bare hosts such as `localhost:8080` get `http://`,
/// and paths such as `/api` are resolved against `origin`.
pub fn normalize_base_url(
    raw: &str,
    origin: &str,
) -> Result<String, url::ParseError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let candidate =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else if trimmed.is_empty() || trimmed.starts_with('/') {
            format!("{}{}", origin.trim_end_matches('/'), trimmed)
        } else {
            format!("http://{}", trimmed)
        };

    let parsed = Url::parse(&candidate)?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

pub fn parse_duration(raw: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(raw.trim())
}

/// Platform data directory for the session file.
pub fn default_storage_dir() -> PathBuf {
    ProjectDirs::from("app", "Offbeat", "offbeat")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STORAGE_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:3000";

    #[test]
    fn relative_path_resolves_against_origin() {
        assert_eq!(
            normalize_base_url("/api", ORIGIN).unwrap(),
            "http://localhost:3000/api"
        );
        assert_eq!(
            normalize_base_url("", ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn bare_host_gets_scheme() {
        assert_eq!(
            normalize_base_url("api.example.com/", ORIGIN).unwrap(),
            "http://api.example.com"
        );
    }

    #[test]
    fn absolute_url_is_kept() {
        assert_eq!(
            normalize_base_url(" https://api.example.com/v1/ ", ORIGIN)
                .unwrap(),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn malformed_host_is_rejected() {
        assert!(normalize_base_url("http://exa mple.com", ORIGIN).is_err());
    }

    #[test]
    fn durations_use_humantime() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(
            parse_duration(" 250ms ").unwrap(),
            Duration::from_millis(250)
        );
        assert!(parse_duration("soon").is_err());
    }
}
