use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
