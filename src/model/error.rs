use thiserror::Error;

/// Reasons an uploaded document cannot become records.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed report payload: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error(transparent)]
    MalformedTimestamp(#[from] crate::time::Error),
}
