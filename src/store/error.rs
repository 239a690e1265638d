use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Remote store is not configured: {0} is missing")]
    NotConfigured(&'static str),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record: {0}")]
    Decode(#[from] serde_json::Error),
}
