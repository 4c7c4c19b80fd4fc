//! Error types for seedreap.

use thiserror::Error;

/// Result type alias for seedreap operations.
pub type Result<T> = std::result::Result<T, SeedreapError>;

/// Errors shared across the seedreap crates.
#[derive(Error, Debug)]
pub enum SeedreapError {
    /// A snapshot payload could not be decoded.
    #[error("Snapshot decode error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
