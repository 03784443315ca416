use thiserror::Error;

/// Errors that abort a watch run. No retries, no partial recovery:
/// any of these terminates the run with exit code 1.
#[derive(Debug, Error)]
pub enum WatchError {
    /// HTTP request failed (transport error or non-2xx status).
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A marker literal was not found in the flattened page text.
    /// The end marker only counts when it appears after the start marker.
    #[error("marker {marker:?} not found in page text")]
    MarkerNotFound { marker: String },

    /// The section between the markers is empty after normalization.
    #[error("extracted section is empty")]
    EmptySection,

    /// State directory or state file could not be read/written.
    #[error("state I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;
