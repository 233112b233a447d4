use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Monitor {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("monitor list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("monitor list is empty")]
    Empty,
    #[error("monitor has an empty name")]
    EmptyName,
    #[error("duplicate monitor name {0:?}")]
    DuplicateName(String),
}

// Monitor names key the stored rows, so the set is validated as a whole:
// non-empty, no blank names, no duplicates.
#[derive(Clone)]
pub struct MonitorRegistry {
    monitors: Arc<RwLock<Vec<Monitor>>>,
}

impl MonitorRegistry {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let monitors: Vec<Monitor> = serde_json::from_str(raw)?;
        if monitors.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut seen = HashSet::new();
        for monitor in &monitors {
            if monitor.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(monitor.name.as_str()) {
                return Err(ConfigError::DuplicateName(monitor.name.clone()));
            }
        }
        Ok(Self {
            monitors: Arc::new(RwLock::new(monitors)),
        })
    }

    pub async fn snapshot(&self) -> Vec<Monitor> {
        self.monitors.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.monitors.read().await.len()
    }

    #[allow(dead_code)]
    pub async fn add_monitor(&self, monitor: Monitor) -> Result<(), ConfigError> {
        if monitor.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let mut monitors = self.monitors.write().await;
        if monitors.iter().any(|existing| existing.name == monitor.name) {
            return Err(ConfigError::DuplicateName(monitor.name));
        }
        monitors.push(monitor);
        Ok(())
    }
}
