use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected body shape: {0}")]
    Shape(&'static str),
}
