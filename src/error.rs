use thiserror::Error;

/// Failure of a single backend request.
///
/// Sub-fetchers keep these to themselves; they never reach the
/// resolution signal of an artist load.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to resolve a query into an artist profile
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no artist found for {query:?}")]
    NotFound { query: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
