/// Errors that can occur while fetching samples.
///
/// All variants are per-entity and recoverable: the monitor engine converts
/// them into an `Unknown` outcome and moves on to the next entity.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An HTTP request to the time-series store failed or timed out.
    #[error("Source: HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success response or an in-band query error.
    #[error("Source: API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    /// The query succeeded but no series exists for the key.
    #[error("Source: no data for key '{key}'")]
    MissingData { key: String },

    /// The response could not be interpreted.
    #[error("Source: malformed response: {0}")]
    Malformed(String),
}

/// Convenience `Result` alias for sample-source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
