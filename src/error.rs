use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a chart from its source.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("chart {chart:?} not found")]
    NotFound { chart: String },
    #[error("chart {chart:?} returned HTTP {status}")]
    Status { chart: String, status: u16 },
    #[error("invalid chart identifier {0:?}")]
    InvalidIdentifier(String),
    #[error("request failed")]
    Http(#[from] attohttpc::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error("couldn't write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't serialize chart")]
    Serialize(#[from] serde_json::Error),
}
