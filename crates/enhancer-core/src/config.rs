//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

pub const ENV_API_BASE_URL: &str = "ENHANCER_API_BASE_URL";
pub const ENV_DATA_DIR: &str = "ENHANCER_DATA_DIR";
pub const ENV_DOWNLOAD_DIR: &str = "ENHANCER_DOWNLOAD_DIR";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "ENHANCER_REQUEST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the report service
    pub api_base_url: String,
    /// Directory holding the local storage database
    pub data_dir: PathBuf,
    /// Path to the local storage database
    pub database_path: PathBuf,
    /// Where downloaded report PDFs are written
    pub download_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(|| data_dir.join("downloads"));

        Self {
            api_base_url: enhancer_api::DEFAULT_BASE_URL.to_string(),
            database_path: data_dir.join("storage.db"),
            data_dir,
            download_dir,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("pdf-enhancer"))
            .unwrap_or_else(|| PathBuf::from(".pdf-enhancer"))
    }

    /// Defaults overridden by `ENHANCER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_dir = get(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);
        let mut config = Self::new(data_dir);

        if let Some(base_url) = get(ENV_API_BASE_URL) {
            config.api_base_url = base_url;
        }

        if let Some(dir) = get(ENV_DOWNLOAD_DIR) {
            config.download_dir = PathBuf::from(dir);
        }

        if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECS) {
            config.request_timeout_secs = raw.parse().map_err(|_| {
                CoreError::Config(format!("{} must be a number of seconds, got {:?}", ENV_REQUEST_TIMEOUT_SECS, raw))
            })?;
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(ENV_DATA_DIR, "/tmp/enhancer")])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.database_path, PathBuf::from("/tmp/enhancer/storage.db"));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_API_BASE_URL, " https://reports.example.com "),
            (ENV_DATA_DIR, "/data"),
            (ENV_DOWNLOAD_DIR, "/pdfs"),
            (ENV_REQUEST_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://reports.example.com");
        assert_eq!(config.download_dir, PathBuf::from("/pdfs"));
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/data"),
            (ENV_API_BASE_URL, "   "),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
