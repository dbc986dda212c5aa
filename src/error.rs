use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole load. Bad cells and nameless rows never end up here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("header row not found: no line mentions both NOME and EMPRESA")]
    HeaderNotFound,
    #[error("failed to read CSV header: {0}")]
    Csv(#[from] csv::Error),
}
