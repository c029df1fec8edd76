/// Errors that can occur within the notification subsystem.
///
/// Delivery errors are recoverable from the engine's point of view: the
/// suppression record is committed before dispatch, so a failed send is
/// surfaced to the logs and the cooldown stands.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// An HTTP request to the notification endpoint failed or timed out.
    #[error("Notify: HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success response.
    #[error("Notify: API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    /// The bot identity reported by the endpoint does not match the
    /// configured one; nothing is sent to an unverified endpoint.
    #[error("Notify: bot identity mismatch: expected {expected}, got {actual}")]
    IdentityMismatch { expected: i64, actual: i64 },

    /// The endpoint response could not be interpreted.
    #[error("Notify: malformed response: {0}")]
    Malformed(String),
}

/// Convenience `Result` alias for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
