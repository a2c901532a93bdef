use thiserror::Error;

/// Failures of the storage gateway.
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend failure: {0}")]
    Backend(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _)
                if code.code == rusqlite::ErrorCode::DatabaseBusy
                    || code.code == rusqlite::ErrorCode::DatabaseLocked
                    || code.code == rusqlite::ErrorCode::CannotOpen =>
            {
                Error::Unavailable(err.to_string())
            }
            _ => Error::Backend(err.to_string()),
        }
    }
}
