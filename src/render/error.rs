use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("chart template error: {0}")]
    Template(#[from] liquid::Error),
    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
}
