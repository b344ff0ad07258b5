use async_trait::async_trait;
use chrono::NaiveDate;
use eod_core::bar::EodBar;

use crate::error::ProviderError;

/// Trait for fetching end-of-day price data from an external source.
#[async_trait]
pub trait EodProvider: Send + Sync {
    /// Provider name (for logging/display).
    fn name(&self) -> &str;

    /// Fetch EOD bars for a symbol over an inclusive date range, capped
    /// at `limit` records. Returns bars sorted ascending by date.
    async fn fetch_eod_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        limit: u32,
    ) -> Result<Vec<EodBar>, ProviderError>;
}
