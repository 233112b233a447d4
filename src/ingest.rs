
use crate::reading::{Reading, StoredRow};
use crate::registry::Monitor;
use crate::store::ReadingStore;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("monitor returned {0}")]
    Status(StatusCode),
    #[error("invalid reading payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("insert failed: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct Ingestor {
    client: Client,
    store: ReadingStore,
}

impl Ingestor {
    pub fn new(store: ReadingStore, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, store })
    }

    pub async fn ingest(&self, monitor: &Monitor) -> Result<(), IngestError> {
        let url = format!("{}/air-data/latest", monitor.address.trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IngestError::Status(status));
        }

        let body = response.text().await?;
        let reading: Reading = serde_json::from_str(&body)?;

        self.store
            .insert_if_absent(&StoredRow {
                name: monitor.name.clone(),
                reading,
            })
            .await?;
        Ok(())
    }
}
