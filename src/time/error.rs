use thiserror::Error;

/// An error that occurred while reading a report timestamp.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("malformed timestamp '{0}', expected YYYY-MM-DDTHH:MM:SS[.fraction]")]
    MalformedTimestamp(String),
    #[error("timestamp '{0}' is out of range: {1}")]
    OutOfRange(String, String),
}
