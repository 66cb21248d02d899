//! # till-core: Pure Business Logic for Till
//!
//! Till is a single-store point-of-sale record keeper: products, customers,
//! in-progress sales, expenses, and a cashbox. This crate is the in-memory
//! half of the system, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Till Architecture                      │
//! │                                                             │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │              UI layer (out of tree)                 │    │
//! │  │   reads StoreState directly, calls operations       │    │
//! │  └─────────────────────────┬───────────────────────────┘    │
//! │                            │                                │
//! │  ┌─────────────────────────▼───────────────────────────┐    │
//! │  │              ★ till-core (THIS CRATE) ★             │    │
//! │  │                                                     │    │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐  │    │
//! │  │   │  types  │ │  money  │ │  state  │ │dashboard │  │    │
//! │  │   │ Product │ │  Money  │ │StoreState│ │ Totals  │  │    │
//! │  │   │  Sale   │ │ TaxRate │ │mutations│ │ Summary  │  │    │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘  │    │
//! │  │                                                     │    │
//! │  │   NO I/O • NO PERSISTENCE • PURE FUNCTIONS          │    │
//! │  └─────────────────────────┬───────────────────────────┘    │
//! │                            │                                │
//! │  ┌─────────────────────────▼───────────────────────────┐    │
//! │  │              till-store (Persistence)               │    │
//! │  │     blob gateway, save after every mutation         │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Cashbox, Settings, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`state`] - The `StoreState` aggregate and every mutation operation
//! - [`dashboard`] - Derived totals and date-range summaries
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Owned aggregate**: `StoreState` is an explicit value, never a
//!    module-level singleton. Tests build a fresh one per case.
//! 2. **No I/O**: persistence is a capability injected one layer up.
//! 3. **Integer money**: all monetary values are cents (i64).
//! 4. **Explicit errors**: lookup failures are typed, never strings.
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Money, StoreState};
//!
//! let mut state = StoreState::default();
//! let pen = state.add_product("Pen", Money::from_cents(250), 10, "Stationery");
//! let sale = state.start_sale(None);
//!
//! let total = state.add_item_to_sale(&sale.id, &pen.id, 3).unwrap();
//! assert_eq!(total.cents(), 750);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod money;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use dashboard::{DashboardTotals, PeriodSummary};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use state::StoreState;
pub use types::*;
