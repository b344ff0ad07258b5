use async_trait::async_trait;
use chrono::NaiveDate;
use eod_core::bar::EodBar;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::provider::EodProvider;

const MARKETSTACK_BASE_URL: &str = "https://api.marketstack.com/v1";

/// Marketstack end-of-day data provider.
/// Authenticates via an `access_key` query parameter.
pub struct MarketstackProvider {
    client: Client,
    access_key: String,
    base_url: String,
}

impl MarketstackProvider {
    /// Create from the `MARKETSTACK_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ProviderError> {
        let access_key = std::env::var("MARKETSTACK_API_KEY")
            .map_err(|_| ProviderError::Config("MARKETSTACK_API_KEY not set".into()))?;

        Ok(Self {
            client: Client::new(),
            access_key,
            base_url: MARKETSTACK_BASE_URL.to_string(),
        })
    }

    /// Create with an explicit credential and optional base URL override.
    pub fn new(access_key: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            access_key,
            base_url: base_url.unwrap_or_else(|| MARKETSTACK_BASE_URL.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketstackEodRecord {
    /// ISO-8601 timestamp, e.g. "2025-10-06T00:00:00+0000"
    date: String,
    /// Closing price
    close: Decimal,
}

impl MarketstackEodRecord {
    fn to_bar(&self) -> EodBar {
        EodBar {
            date: self.date.clone(),
            close: self.close,
        }
    }
}

/// Validate a parsed response payload and extract the day records.
///
/// Any JSON object without a top-level `"data"` key is the error branch,
/// whatever its shape (invalid credential, unknown symbol, rate limit).
/// Marketstack returns records newest first, so the result is sorted
/// ascending by the raw date string before it is returned.
fn parse_payload(payload: Value) -> Result<Vec<EodBar>, ProviderError> {
    let Some(data) = payload.get("data") else {
        return Err(ProviderError::MissingData { payload });
    };

    let records: Vec<MarketstackEodRecord> = serde_json::from_value(data.clone())
        .map_err(|e| ProviderError::Parse(format!("malformed day record: {e}")))?;

    let mut bars: Vec<EodBar> = records.iter().map(|r| r.to_bar()).collect();
    bars.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(bars)
}

#[async_trait]
impl EodProvider for MarketstackProvider {
    fn name(&self) -> &str {
        "marketstack"
    }

    async fn fetch_eod_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        limit: u32,
    ) -> Result<Vec<EodBar>, ProviderError> {
        let date_from = start.to_string();
        let date_to = end.to_string();
        let limit = limit.to_string();

        let response = self
            .client
            .get(format!("{}/eod", self.base_url))
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("symbols", symbol),
                ("date_from", date_from.as_str()),
                ("date_to", date_to.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(format!("response body is not JSON: {e}")))?;

        debug!(
            "raw response payload:\n{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
        );

        parse_payload(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn parse_marketstack_record() {
        let record = MarketstackEodRecord {
            date: "2025-10-06T00:00:00+0000".to_string(),
            close: dec!(185.0),
        };

        let bar = record.to_bar();
        assert_eq!(bar.date, "2025-10-06T00:00:00+0000");
        assert_eq!(bar.close, dec!(185.0));
    }

    #[test]
    fn parse_payload_sorts_reverse_chronological_data() {
        // Marketstack returns newest first; extra fields are ignored.
        let payload = json!({
            "pagination": {"limit": 1000, "offset": 0, "count": 3, "total": 3},
            "data": [
                {"date": "2025-10-08T00:00:00+0000", "open": 189.0, "high": 191.0,
                 "low": 188.5, "close": 190.1, "volume": 1000.0, "symbol": "NVDA",
                 "exchange": "XNAS"},
                {"date": "2025-10-07T00:00:00+0000", "open": 186.2, "high": 189.0,
                 "low": 185.9, "close": 188.4, "volume": 2000.0, "symbol": "NVDA",
                 "exchange": "XNAS"},
                {"date": "2025-10-06T00:00:00+0000", "open": 184.0, "high": 186.0,
                 "low": 183.2, "close": 185.0, "volume": 3000.0, "symbol": "NVDA",
                 "exchange": "XNAS"}
            ]
        });

        let bars = parse_payload(payload).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, "2025-10-06T00:00:00+0000");
        assert_eq!(bars[0].close, dec!(185.0));
        assert_eq!(bars[2].date, "2025-10-08T00:00:00+0000");
        assert_eq!(bars[2].close, dec!(190.1));
    }

    #[test]
    fn parse_payload_empty_data() {
        let payload = json!({"pagination": {"count": 0}, "data": []});
        let bars = parse_payload(payload).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn missing_data_key_carries_full_payload() {
        let payload = json!({"error": "invalid_access_key"});

        let err = parse_payload(payload.clone()).unwrap_err();
        match err {
            ProviderError::MissingData { payload: carried } => {
                assert_eq!(carried, payload);
            }
            other => panic!("expected MissingData, got: {other}"),
        }
    }

    #[test]
    fn missing_data_key_structured_error() {
        // Marketstack's actual error shape is also opaque to us
        let payload = json!({
            "error": {
                "code": "invalid_access_key",
                "message": "You have not supplied a valid API Access Key."
            }
        });

        assert!(matches!(
            parse_payload(payload),
            Err(ProviderError::MissingData { .. })
        ));
    }

    #[test]
    fn malformed_record_is_a_parse_error() {
        let payload = json!({
            "data": [{"date": "2025-10-06T00:00:00+0000", "close": "not a number"}]
        });

        assert!(matches!(
            parse_payload(payload),
            Err(ProviderError::Parse(_))
        ));
    }
}
