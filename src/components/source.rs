//! Card data sources.
//!
//! A [`CardSource`] yields [`CardRecord`]s asynchronously. [`JsonCardSource`]
//! parses a JSON array held in memory, optionally after a simulated delay.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors from fetching cards.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid card data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw data of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// Something that can produce card records.
pub trait CardSource {
    fn fetch_cards(&self) -> impl Future<Output = Result<Vec<CardRecord>, FetchError>>;
}

/// Card source backed by a JSON array string.
#[derive(Debug, Clone)]
pub struct JsonCardSource {
    json: String,
    latency: Option<Duration>,
}

impl JsonCardSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            latency: None,
        }
    }

    /// Serialize `records` into a source.
    pub fn from_records(records: &[CardRecord]) -> Result<Self, FetchError> {
        Ok(Self::new(serde_json::to_string(records)?))
    }

    /// Wait `latency` before answering (builder).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl CardSource for JsonCardSource {
    async fn fetch_cards(&self) -> Result<Vec<CardRecord>, FetchError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let records: Vec<CardRecord> = serde_json::from_str(&self.json)?;
        tracing::debug!(count = records.len(), "cards fetched");
        Ok(records)
    }
}
