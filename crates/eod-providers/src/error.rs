use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered, but the payload has no results key. The whole
    /// parsed payload is carried so the caller can surface it verbatim
    /// (no error schema is guaranteed upstream).
    #[error("response has no \"data\" key: {payload}")]
    MissingData { payload: serde_json::Value },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider configuration error: {0}")]
    Config(String),
}
