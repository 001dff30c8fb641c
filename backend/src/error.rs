use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access travel data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid travel data: {0}")]
    Parse(#[from] serde_json::Error),
}
