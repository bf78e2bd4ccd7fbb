//! Error type for the catalog store.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`CatalogStore`](super::CatalogStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be created or opened.
    #[error("store unavailable at {}: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// A write failed and its transaction was rolled back.
    #[error("{0}")]
    Persistence(#[source] rusqlite::Error),

    /// A read query failed.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The connection refused to close cleanly.
    #[error("failed to close store: {0}")]
    Close(#[source] rusqlite::Error),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
