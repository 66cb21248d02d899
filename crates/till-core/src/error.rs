//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Error Types                           │
//! │                                                             │
//! │  till-core errors (this file)                               │
//! │  └── CoreError   - Lookup failures inside an operation      │
//! │                                                             │
//! │  till-store errors (separate crate)                         │
//! │  └── StoreError  - Blob I/O and encode/decode failures      │
//! │                                                             │
//! │  Flow: CoreError → StoreError → caller                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending id in the message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant corresponds to a lookup that came up empty mid-operation.
/// Operations that fail this way leave the aggregate untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No open sale carries this id.
    ///
    /// ## When This Occurs
    /// - The sale was already completed (completion deletes it)
    /// - The id never existed
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// No product carries this id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No customer carries this id.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
