use movie_sync_models::MovieId;
use thiserror::Error;

/// Any failure talking to the catalog backend.
///
/// Callers surface every variant to the user the same way; the distinction
/// only matters for logs.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed: {status} - {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("movie {0} not found")]
    NotFound(MovieId),

    #[error("malformed response: {0}")]
    Malformed(String),
}
