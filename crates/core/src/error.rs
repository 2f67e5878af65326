//! Error types for the Parley domain.
//!
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Failures raised by a [`SystemConfigStore`](crate::SystemConfigStore) backend.
///
/// The prompt resolver never propagates these; they are logged and the
/// lookup is treated as absent.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Lookup failed for {key}: {reason}")]
    LookupFailed { key: String, reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
