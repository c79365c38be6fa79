//! Crate-level error types.
//!
//! [`PaiseError`] unifies every error source (split validation, settlement
//! validation, JSON) behind a single enum so callers of the JSON-boundary
//! entry points can match on the variant they care about while still using
//! the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaiseError>;

/// Top-level error type returned by the body-level public APIs.
#[derive(Debug, thiserror::Error)]
pub enum PaiseError {
    /// An expense body failed split validation.
    #[error("split error: {0}")]
    Split(#[from] crate::split::SplitError),

    /// A settlement request failed validation.
    #[error("settlement error: {0}")]
    Settlement(#[from] crate::models::settlement::SettlementError),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
