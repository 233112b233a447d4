use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/awair.db";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub monitors_json: String,
    pub poll_interval_seconds: u64,
    pub http_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let database_url = env::var("AWAIR_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let monitors_json = env::var("AWAIR_MONITORS")
            .or_else(|_| env::var("MONITORS"))
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .context("AWAIR_MONITORS or MONITORS is required")?;

        let poll_interval_seconds = env::var("AWAIR_POLL_INTERVAL_SECONDS")
            .or_else(|_| env::var("DURATION"))
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v != 0)
            .unwrap_or(60);

        let http_timeout_seconds = env::var("AWAIR_HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v != 0)
            .unwrap_or(10);

        Ok(Self {
            database_url,
            monitors_json,
            poll_interval_seconds,
            http_timeout_seconds,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    // Directory holding the database file, for file-backed URLs only.
    pub fn database_dir(&self) -> Option<PathBuf> {
        let path = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        if path.is_empty() || path.starts_with(':') {
            return None;
        }
        let path = path.split('?').next().unwrap_or(path);
        let parent = Path::new(path).parent()?;
        if parent.as_os_str().is_empty() {
            return None;
        }
        Some(parent.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> Config {
        Config {
            database_url: url.to_string(),
            monitors_json: "[]".to_string(),
            poll_interval_seconds: 60,
            http_timeout_seconds: 10,
        }
    }

    #[test]
    fn database_dir_for_file_backed_urls() {
        assert_eq!(
            config_with_url("sqlite://data/awair.db").database_dir(),
            Some(PathBuf::from("data"))
        );
        assert_eq!(
            config_with_url("sqlite:///var/lib/awair/awair.db").database_dir(),
            Some(PathBuf::from("/var/lib/awair"))
        );
        assert_eq!(
            config_with_url("sqlite://data/awair.db?mode=rwc").database_dir(),
            Some(PathBuf::from("data"))
        );
    }

    #[test]
    fn database_dir_skips_memory_and_bare_filenames() {
        assert_eq!(config_with_url("sqlite::memory:").database_dir(), None);
        assert_eq!(config_with_url("sqlite://awair.db").database_dir(), None);
    }

    #[test]
    fn from_env_reads_fallback_names_and_defaults() {
        env::remove_var("AWAIR_MONITORS");
        env::remove_var("MONITORS");
        env::remove_var("AWAIR_DATABASE_URL");
        env::remove_var("DATABASE_URL");
        env::remove_var("AWAIR_POLL_INTERVAL_SECONDS");
        env::remove_var("DURATION");
        env::remove_var("AWAIR_HTTP_TIMEOUT_SECONDS");

        assert!(Config::from_env().is_err());

        env::set_var("MONITORS", r#"[{"name":"attic","address":"http://a.local"}]"#);
        env::set_var("DURATION", "30");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.http_timeout(), Duration::from_secs(10));

        env::remove_var("MONITORS");
        env::remove_var("DURATION");
    }
}
