//! Host configuration: optional `postlist.ron` plus environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use postlist_core::{CoreConfig, DEFAULT_PAGE_SIZE};
use postlist_engine::ApiSettings;
use serde::Deserialize;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "postlist.ron";
pub const ENV_API_URL: &str = "POSTLIST_API_URL";
pub const ENV_PAGE_SIZE: &str = "POSTLIST_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `None` serves the built-in demo posts instead of a remote API.
    pub api_base_url: Option<String>,
    pub page_size: usize,
    pub debounce_ms: u64,
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        let core = CoreConfig::default();
        Self {
            api_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: core.debounce_delay.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            max_body_bytes: api.max_bytes,
            state_dir: PathBuf::from("."),
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Reads `{dir}/postlist.ron`. A missing file yields the defaults.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        ron::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Applies `POSTLIST_API_URL` and `POSTLIST_PAGE_SIZE` through `lookup`.
    /// Unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            self.api_base_url = Some(url.trim().to_string());
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE).and_then(|raw| raw.trim().parse().ok()) {
            self.page_size = size;
        }
    }

    pub fn core_config(&self) -> CoreConfig {
        CoreConfig {
            debounce_delay: Duration::from_millis(self.debounce_ms),
            page_size: self.page_size.max(1),
        }
    }

    /// Settings for the HTTP client; `None` when no API URL is configured.
    pub fn api_settings(&self) -> Option<ApiSettings> {
        self.api_base_url.as_ref().map(|base_url| ApiSettings {
            base_url: base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(temp.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.debounce_ms, 500);
        assert!(config.api_settings().is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"(api_base_url: Some("http://posts.test/api"), page_size: 25, log_destination: Both)"#,
        )
        .unwrap();

        let config = AppConfig::load_from(temp.path()).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.debounce_ms, 500);

        let api = config.api_settings().unwrap();
        assert_eq!(api.base_url, "http://posts.test/api");
        assert_eq!(api.request_timeout, Duration::from_secs(30));
        assert_eq!(api.max_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "(page_size: \"many\")").unwrap();
        assert!(AppConfig::load_from(temp.path()).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            ENV_API_URL => Some(" http://env.test/api ".to_string()),
            ENV_PAGE_SIZE => Some("7".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base_url.as_deref(), Some("http://env.test/api"));
        assert_eq!(config.core_config().page_size, 7);

        config.apply_overrides(|name| (name == ENV_PAGE_SIZE).then(|| "lots".to_string()));
        assert_eq!(config.page_size, 7);
    }
}
