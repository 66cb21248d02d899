//! # Persistence Error Types
//!
//! Error types for blob I/O and state encode/decode.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                        │
//! │                                                             │
//! │  std::io::Error / serde_json::Error                         │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  StoreError (this module) ← adds the failing stage          │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  caller decides: surface to the user, give up, retry        │
//! │                                                             │
//! │  There is no retry here: a failed save means the in-memory  │
//! │  mutation happened and the blob on disk is stale.           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::CoreError;

/// Persistence layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A core operation failed (lookup came up empty). Nothing was
    /// persisted for the failed operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the blob failed.
    ///
    /// ## When This Occurs
    /// - Unreadable file permissions
    /// - Disk full on save
    /// - Parent directory cannot be created
    #[error("blob I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The aggregate could not be serialized.
    #[error("state encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The persisted blob is not valid JSON at all.
    ///
    /// A blob that parses but has malformed *fields* does not land here;
    /// those fields fall back to defaults individually (see [`crate::decode`]).
    #[error("persisted blob is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let err: StoreError = CoreError::SaleNotFound("s-1".to_string()).into();
        assert_eq!(err.to_string(), "Sale not found: s-1");
    }

    #[test]
    fn test_decode_error_message() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = StoreError::Decode(json_err);
        assert!(err.to_string().starts_with("persisted blob is not valid JSON"));
    }
}
