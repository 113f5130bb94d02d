use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeeError {
    /// The rate table has no tier containing the given amount. Unreachable
    /// once the table has passed [`FeeConfig::validate`](crate::FeeConfig::validate).
    #[error("no commission tier covers amount ¥{0}")]
    NoMatchingTier(i64),

    /// The configured rate table or bounds are malformed. Raised by the
    /// startup self-check, never during per-request calculation.
    #[error("invalid fee configuration: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeeError>;
