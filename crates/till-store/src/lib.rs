//! # till-store: Persistence Layer for Till
//!
//! This crate owns the persisted form of the store: one JSON blob holding
//! the whole aggregate, rewritten after every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Till Data Flow                         │
//! │                                                             │
//! │  UI action (add product, scan item, pay, ...)               │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │               till-store (THIS CRATE)               │    │
//! │  │                                                     │    │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────┐  │    │
//! │  │   │   Store    │   │  decode    │   │ BlobStore  │  │    │
//! │  │   │ (store.rs) │──►│ (decode.rs)│   │ (blob.rs)  │  │    │
//! │  │   │            │   │            │   │            │  │    │
//! │  │   │ owns state │   │ per-field  │   │ FileStore  │  │    │
//! │  │   │ saves after│   │ defaulting │   │ MemoryStore│  │    │
//! │  │   │ every op   │   │            │   │            │  │    │
//! │  │   └────────────┘   └────────────┘   └────────────┘  │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  one JSON blob (file on disk, or in memory for tests)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`blob`] - The `BlobStore` gateway trait and its two backends
//! - [`decode`] - Blob encode/decode with per-field defaulting
//! - [`store`] - The `Store` handle wrapping every core operation
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust
//! use till_core::{Money, PaymentMethod};
//! use till_store::Store;
//!
//! // In-memory store: fresh state, nothing touches disk
//! let mut store = Store::in_memory();
//!
//! let pen = store.add_product("Pen", Money::from_cents(250), 10, "Stationery")?;
//! let sale = store.start_sale(None)?;
//! store.add_item_to_sale(&sale.id, &pen.id, 3)?;
//! store.complete_sale(&sale.id, PaymentMethod::Cash, None)?;
//!
//! assert_eq!(store.state().cashbox.balance_cents, 750);
//! # Ok::<(), till_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod decode;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::{BlobStore, FileStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use store::Store;
