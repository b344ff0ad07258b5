use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no data points to plot")]
    EmptySeries,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("chart rendering failed: {0}")]
    Backend(String),
}
