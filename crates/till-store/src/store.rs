//! # Store Handle
//!
//! `Store` ties the in-memory aggregate to an injected blob backend:
//! every mutation delegates to the core operation, then writes the whole
//! serialized aggregate back through the gateway.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 When Does a Save Happen?                    │
//! │                                                             │
//! │  add_product / start_sale / add_expense /                   │
//! │  add_customer / update_settings ──────────► always          │
//! │                                                             │
//! │  add_item_to_sale / complete_sale ────────► on success only │
//! │    (a failed lookup leaves memory AND blob untouched)       │
//! │                                                             │
//! │  update_product_quantity ─────────────────► only if matched │
//! │                                                             │
//! │  remove_product / remove_customer ────────► always          │
//! │    (an unchanged collection still gets rewritten)           │
//! │                                                             │
//! │  Every save is the FULL aggregate: O(total entity count)    │
//! │  per mutation, fine at one store's working-set size.        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use till_core::{
    Customer, DashboardTotals, Expense, Money, PaymentMethod, PeriodSummary, Product, Sale,
    Settings, StoreState, Transaction,
};

use crate::blob::{BlobStore, MemoryStore};
use crate::decode::{decode_state, encode_state};
use crate::error::StoreResult;

// =============================================================================
// Store
// =============================================================================

/// The state-owning handle the UI layer drives.
///
/// Owns the aggregate plus the gateway it persists through. There is
/// exactly one writer: this value. Two handles opened on the same file
/// race with last-write-wins, which is the documented single-writer
/// contract.
pub struct Store {
    state: StoreState,
    backend: Box<dyn BlobStore>,
}

impl Store {
    /// Opens a store over the given backend.
    ///
    /// An absent blob yields a fully default state; a present one decodes
    /// with per-field defaulting (see [`crate::decode`]).
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = Store::open(Box::new(FileStore::new("./data/till.json")))?;
    /// ```
    pub fn open(backend: Box<dyn BlobStore>) -> StoreResult<Self> {
        let state = match backend.read()? {
            Some(blob) => decode_state(&blob)?,
            None => StoreState::default(),
        };

        info!(
            products = state.products.len(),
            customers = state.customers.len(),
            open_sales = state.sales.len(),
            expenses = state.expenses.len(),
            "Store opened"
        );

        Ok(Store { state, backend })
    }

    /// Creates a store over a fresh [`MemoryStore`]: default state,
    /// nothing touches disk. The standard test constructor.
    pub fn in_memory() -> Self {
        Store {
            state: StoreState::default(),
            backend: Box::new(MemoryStore::new()),
        }
    }

    /// Read access to the aggregate. The UI layer renders straight from
    /// this.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    // =========================================================================
    // Product Operations
    // =========================================================================

    /// Creates a product and persists.
    pub fn add_product(
        &mut self,
        name: &str,
        price: Money,
        quantity: i64,
        category: &str,
    ) -> StoreResult<Product> {
        let product = self.state.add_product(name, price, quantity, category);
        debug!(product_id = %product.id, price = %product.price(), quantity, "Product added");
        self.persist()?;
        Ok(product)
    }

    /// Overwrites a product's quantity and persists; an unknown id is a
    /// no-op that persists nothing. Returns whether a product matched.
    pub fn update_product_quantity(
        &mut self,
        product_id: &str,
        new_quantity: i64,
    ) -> StoreResult<bool> {
        let updated = self.state.update_product_quantity(product_id, new_quantity);
        if updated {
            debug!(product_id, new_quantity, "Product quantity set");
            self.persist()?;
        }
        Ok(updated)
    }

    /// Removes a product and persists (even when nothing matched).
    /// Returns whether a product was removed.
    pub fn remove_product(&mut self, product_id: &str) -> StoreResult<bool> {
        let removed = self.state.remove_product(product_id);
        debug!(product_id, removed, "Product removal");
        self.persist()?;
        Ok(removed)
    }

    // =========================================================================
    // Sale Operations
    // =========================================================================

    /// Opens a new sale and persists. See [`StoreState::start_sale`] for
    /// the customer-snapshot rules.
    pub fn start_sale(&mut self, customer_id: Option<&str>) -> StoreResult<Sale> {
        let sale = self.state.start_sale(customer_id);
        debug!(sale_id = %sale.id, customer_id = ?sale.customer_id, "Sale started");
        self.persist()?;
        Ok(sale)
    }

    /// Adds a quantity of a product to an open sale and persists.
    /// Returns the recomputed sale total.
    ///
    /// A failed lookup persists nothing.
    pub fn add_item_to_sale(
        &mut self,
        sale_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> StoreResult<Money> {
        let total = self.state.add_item_to_sale(sale_id, product_id, quantity)?;
        debug!(sale_id, product_id, quantity, total = %total, "Item added to sale");
        self.persist()?;
        Ok(total)
    }

    /// Completes an open sale and persists: cashbox credited, stock
    /// drawn, sale record deleted. Returns the recorded transaction.
    ///
    /// A failed lookup persists nothing.
    pub fn complete_sale(
        &mut self,
        sale_id: &str,
        payment_method: PaymentMethod,
        notes: Option<&str>,
    ) -> StoreResult<Transaction> {
        let transaction = self.state.complete_sale(sale_id, payment_method, notes)?;
        info!(
            sale_id,
            amount = %transaction.amount(),
            method = ?payment_method,
            balance = %self.state.cashbox.balance(),
            "Sale completed"
        );
        self.persist()?;
        Ok(transaction)
    }

    // =========================================================================
    // Expense & Customer Operations
    // =========================================================================

    /// Records an expense and persists.
    pub fn add_expense(
        &mut self,
        amount: Money,
        category: &str,
        description: &str,
    ) -> StoreResult<Expense> {
        let expense = self.state.add_expense(amount, category, description);
        debug!(expense_id = %expense.id, amount = %expense.amount(), category, "Expense recorded");
        self.persist()?;
        Ok(expense)
    }

    /// Creates a customer and persists.
    pub fn add_customer(&mut self, name: &str, phone: &str) -> StoreResult<Customer> {
        let customer = self.state.add_customer(name, phone);
        debug!(customer_id = %customer.id, "Customer added");
        self.persist()?;
        Ok(customer)
    }

    /// Removes a customer and persists (even when nothing matched).
    /// Returns whether a customer was removed.
    pub fn remove_customer(&mut self, customer_id: &str) -> StoreResult<bool> {
        let removed = self.state.remove_customer(customer_id);
        debug!(customer_id, removed, "Customer removal");
        self.persist()?;
        Ok(removed)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Replaces the settings record and persists.
    pub fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        self.state.update_settings(settings);
        debug!("Settings updated");
        self.persist()
    }

    // =========================================================================
    // Derived Views
    // =========================================================================

    /// The dashboard's headline totals, recomputed on demand.
    pub fn dashboard(&self) -> DashboardTotals {
        DashboardTotals::from(&self.state)
    }

    /// Income/expense summary over `[from, to)`.
    pub fn summary_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> PeriodSummary {
        PeriodSummary::compute(&self.state, from, to)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Serializes the whole aggregate and writes it through the gateway.
    fn persist(&mut self) -> StoreResult<()> {
        let blob = encode_state(&self.state)?;
        self.backend.write(&blob)?;
        debug!(bytes = blob.len(), "State persisted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::FileStore;
    use crate::error::StoreError;
    use std::fs;
    use std::path::PathBuf;
    use till_core::CoreError;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("till-store-test-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_in_memory_store_starts_empty() {
        let store = Store::in_memory();
        assert!(store.state().products.is_empty());
        assert!(store.dashboard().total_sales.is_zero());
    }

    #[test]
    fn test_pen_scenario_end_to_end() {
        let mut store = Store::in_memory();

        let pen = store
            .add_product("Pen", Money::from_cents(250), 10, "Stationery")
            .unwrap();
        let sale = store.start_sale(None).unwrap();

        let total = store.add_item_to_sale(&sale.id, &pen.id, 3).unwrap();
        assert_eq!(total.cents(), 750);

        store
            .complete_sale(&sale.id, PaymentMethod::Cash, Some(""))
            .unwrap();

        let state = store.state();
        assert_eq!(state.cashbox.balance_cents, 750);
        assert_eq!(state.product(&pen.id).unwrap().quantity, 7);
        assert!(state.sale(&sale.id).is_none());
    }

    #[test]
    fn test_reopen_restores_persisted_state() {
        let path = temp_path();

        let pen_id = {
            let mut store = Store::open(Box::new(FileStore::new(&path))).unwrap();
            let pen = store
                .add_product("Pen", Money::from_cents(250), 10, "Stationery")
                .unwrap();
            store.add_customer("Alice", "0500000000").unwrap();
            pen.id
        };

        // A second handle over the same file sees everything
        let store = Store::open(Box::new(FileStore::new(&path))).unwrap();
        assert_eq!(store.state().products.len(), 1);
        assert_eq!(store.state().product(&pen_id).unwrap().name, "Pen");
        assert_eq!(store.state().customers[0].name, "Alice");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_lookups_persist_nothing() {
        let path = temp_path();
        let mut store = Store::open(Box::new(FileStore::new(&path))).unwrap();

        // Opening saves nothing, and neither do failed operations
        let err = store.add_item_to_sale("missing", "missing", 1).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::SaleNotFound(_))));
        let err = store
            .complete_sale("missing", PaymentMethod::Cash, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::SaleNotFound(_))));
        assert!(!path.exists());

        // A successful mutation writes the blob
        store
            .add_product("Pen", Money::from_cents(250), 10, "Stationery")
            .unwrap();
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_quantity_update_persists_only_on_match() {
        let path = temp_path();
        let mut store = Store::open(Box::new(FileStore::new(&path))).unwrap();

        assert!(!store.update_product_quantity("missing", 5).unwrap());
        assert!(!path.exists()); // no match, no save

        // Removal of an unknown id still rewrites the blob
        assert!(!store.remove_product("missing").unwrap());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_update_settings_round_trips() {
        let path = temp_path();

        {
            let mut store = Store::open(Box::new(FileStore::new(&path))).unwrap();
            store
                .update_settings(Settings {
                    currency: "USD".to_string(),
                    store_name: "Corner Shop".to_string(),
                    tax_rate_bps: 825,
                    date_format: "mm/dd/yyyy".to_string(),
                })
                .unwrap();
        }

        let store = Store::open(Box::new(FileStore::new(&path))).unwrap();
        assert_eq!(store.state().settings.store_name, "Corner Shop");
        assert_eq!(store.state().settings.tax_rate_bps, 825);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_dashboard_and_summary_views() {
        let mut store = Store::in_memory();
        let pen = store
            .add_product("Pen", Money::from_cents(250), 10, "Stationery")
            .unwrap();
        let sale = store.start_sale(None).unwrap();
        store.add_item_to_sale(&sale.id, &pen.id, 2).unwrap();
        store
            .add_expense(Money::from_cents(100), "Supplies", "tape")
            .unwrap();

        let totals = store.dashboard();
        assert_eq!(totals.total_sales.cents(), 500);
        assert_eq!(totals.total_expenses.cents(), 100);
        assert_eq!(totals.net_profit.cents(), 400);

        store
            .complete_sale(&sale.id, PaymentMethod::Cash, None)
            .unwrap();

        let now = Utc::now();
        let summary = store.summary_between(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1));
        assert_eq!(summary.income.cents(), 500);
        assert_eq!(summary.expenses.cents(), 100);
        assert_eq!(summary.net.cents(), 400);
    }

    #[test]
    fn test_open_rejects_garbage_blob() {
        let path = temp_path();
        fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            Store::open(Box::new(FileStore::new(&path))),
            Err(StoreError::Decode(_))
        ));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_with_partial_blob_defaults_missing_fields() {
        let path = temp_path();
        fs::write(&path, r#"{"cashbox": {"balance_cents": 1200, "transactions": []}}"#).unwrap();

        let store = Store::open(Box::new(FileStore::new(&path))).unwrap();
        assert_eq!(store.state().cashbox.balance_cents, 1200);
        assert!(store.state().products.is_empty());
        assert_eq!(store.state().settings, Settings::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_memory_backend_blob_is_full_aggregate() {
        // Drive a MemoryStore directly to inspect what a save writes.
        let mut store = Store {
            state: StoreState::default(),
            backend: Box::new(MemoryStore::new()),
        };
        store
            .add_product("Pen", Money::from_cents(250), 10, "Stationery")
            .unwrap();

        let blob = store.backend.read().unwrap().expect("save happened");
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        for field in ["products", "customers", "sales", "expenses", "cashbox", "settings"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }
}
