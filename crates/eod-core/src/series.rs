use rust_decimal::Decimal;

use crate::bar::EodBar;

/// The two index-aligned sequences a close-price chart is drawn from:
/// calendar-day strings (first 10 characters of each bar's date) and the
/// corresponding closing prices, ascending by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseSeries {
    pub dates: Vec<String>,
    pub closes: Vec<Decimal>,
}

impl CloseSeries {
    /// Build the chart series from day records in any order.
    ///
    /// Sorts ascending by the raw date string (the feed's fixed-width
    /// ISO-8601 format makes string order chronological order), then
    /// projects each bar into a calendar-day label and a close. The
    /// sort is stable, so identical input always yields identical
    /// output ordering.
    pub fn from_bars(mut bars: Vec<EodBar>) -> Self {
        bars.sort_by(|a, b| a.date.cmp(&b.date));

        let dates = bars
            .iter()
            .map(|b| b.date.chars().take(10).collect())
            .collect();
        let closes = bars.iter().map(|b| b.close).collect();

        Self { dates, closes }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}
