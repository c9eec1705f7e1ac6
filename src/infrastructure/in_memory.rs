use crate::domain::ports::{Clipboard, RateSource};
use crate::domain::rates::ExchangeRateTable;
use crate::error::{ConverterError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// A rate source serving a fixed, swappable table.
///
/// Clones share the table and the request counter, so a test can keep a
/// handle while the converter owns a boxed copy.
#[derive(Default, Clone)]
pub struct StaticRateSource {
    table: Arc<RwLock<Option<ExchangeRateTable>>>,
    requests: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl StaticRateSource {
    /// Creates a source that always answers with `table`.
    pub fn new(table: ExchangeRateTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(Some(table))),
            ..Self::default()
        }
    }

    /// Creates a source whose every request fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Holds each response back for `delay`, to simulate a slow network.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_table(&self, table: Option<ExchangeRateTable>) {
        *self.table.write().await = table;
    }

    /// Number of fetches served so far, failed ones included.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn latest_rates(&self) -> Result<ExchangeRateTable> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.table
            .read()
            .await
            .clone()
            .ok_or_else(|| ConverterError::RateFetch("rate source unavailable".to_string()))
    }
}

/// Clipboard that keeps the last written text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
