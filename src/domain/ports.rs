use super::rates::ExchangeRateTable;
use crate::error::Result;
use async_trait::async_trait;

/// Source of current exchange rates with USD as the implicit base.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches a fresh rate table. Implementations must not cache between calls.
    async fn latest_rates(&self) -> Result<ExchangeRateTable>;
}

/// Destination for exported result text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub type RateSourceBox = Box<dyn RateSource>;
pub type ClipboardBox = Box<dyn Clipboard>;
