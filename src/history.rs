//! Draft history retrieval
//!
//! One-shot fetch at startup. Failures are logged and recovered as an empty
//! history; the operator never sees them.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::error::Result;
use crate::lead::LeadRecord;

#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<LeadRecord>>;

    /// Fetch, falling back to an empty history on any failure
    async fn fetch_or_empty(&self) -> Vec<LeadRecord> {
        match self.fetch().await {
            Ok(records) => {
                info!(count = records.len(), "history fetched");
                records
            }
            Err(err) => {
                warn!("Could not load history: {err}");
                Vec::new()
            }
        }
    }
}

/// `GET /api/history` on the pipeline backend
pub struct HttpHistory {
    client: reqwest::Client,
    url: Url,
}

impl HttpHistory {
    pub fn new(url: Url) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client, url }
    }
}

#[async_trait]
impl HistorySource for HttpHistory {
    async fn fetch(&self) -> Result<Vec<LeadRecord>> {
        let records = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Option<Vec<LeadRecord>>>()
            .await?;
        Ok(records.unwrap_or_default())
    }
}
