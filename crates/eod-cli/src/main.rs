use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use eod_core::chart::render_close_chart;
use eod_core::series::CloseSeries;
use eod_providers::error::ProviderError;
use eod_providers::marketstack::MarketstackProvider;
use eod_providers::provider::EodProvider;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "eod-chart",
    about = "Fetch end-of-day closing prices and render a line chart"
)]
struct Cli {
    /// Ticker symbol to chart
    #[arg(short, long, default_value = "NVDA")]
    symbol: String,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = "2025-10-06")]
    start: NaiveDate,

    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = "2025-10-10")]
    end: NaiveDate,

    /// Maximum number of day records to request
    #[arg(long, default_value_t = 1000)]
    limit: u32,

    /// Output image path, overwritten on every run
    #[arg(short, long, default_value = "stock_chart_marketstack.png")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let provider =
        MarketstackProvider::from_env().context("failed to create Marketstack provider")?;
    info!("Using provider: {}", provider.name());

    let bars = match provider
        .fetch_eod_bars(&cli.symbol, cli.start, cli.end, cli.limit)
        .await
    {
        Ok(bars) => bars,
        // The API answered without the results key (bad credential,
        // unknown symbol, rate limit). Surface the payload and stop
        // before any chart is produced.
        Err(ProviderError::MissingData { payload }) => {
            println!("Error: {payload}");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to fetch EOD data for {}", cli.symbol));
        }
    };

    info!(
        "{}: {} day record(s) from {} to {}",
        cli.symbol,
        bars.len(),
        cli.start,
        cli.end
    );
    debug!("sorted records: {bars:?}");

    let series = CloseSeries::from_bars(bars);
    render_close_chart(&series, &cli.symbol, &cli.output)
        .with_context(|| format!("failed to render chart to {}", cli.output.display()))?;

    info!("wrote {}", cli.output.display());
    Ok(())
}
