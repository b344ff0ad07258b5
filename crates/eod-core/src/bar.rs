use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One end-of-day price record for a single trading day.
///
/// The date is kept as the raw ISO-8601 string the feed returned
/// (fixed-width, with zone offset), so plain string comparison orders
/// records chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EodBar {
    pub date: String,
    pub close: Decimal,
}
