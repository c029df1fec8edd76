/// Errors that can occur within the alert-state store.
///
/// Read failures are downgraded by the suppression gate to "no prior
/// record"; write failures are surfaced loudly because a lost write breaks
/// the fail-closed guarantee.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An underlying SQLite error.
    #[error("Store: SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Creating the database's parent directory failed.
    #[error("Store: I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored timestamp could not be parsed back.
    #[error("Store: invalid timestamp for scope '{scope_key}': {raw}")]
    Timestamp { scope_key: String, raw: String },
}

/// Convenience `Result` alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
