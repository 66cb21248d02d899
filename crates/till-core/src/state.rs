//! # Store State
//!
//! The single aggregate holding everything the store knows, plus every
//! mutation operation as a method on it.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   StoreState Operations                     │
//! │                                                             │
//! │  UI Action              Operation             State Change  │
//! │  ─────────              ─────────             ────────────  │
//! │                                                             │
//! │  New product ─────────► add_product() ──────► products.push │
//! │  Restock ─────────────► update_product_      │ quantity = n │
//! │                         quantity()                          │
//! │  Delete product ──────► remove_product() ───► retain        │
//! │  New cart ────────────► start_sale() ───────► sales.push    │
//! │  Scan item ───────────► add_item_to_sale() ─► merge/append  │
//! │  Pay ─────────────────► complete_sale() ────► cashbox +,    │
//! │                                               stock -,      │
//! │                                               sale deleted  │
//! │  New expense ─────────► add_expense() ──────► expenses.push │
//! │  New customer ────────► add_customer() ─────► customers.push│
//! │                                                             │
//! │  NOTE: every operation runs to completion on one thread;    │
//! │        the persistence layer saves the whole aggregate      │
//! │        after each successful mutation.                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! `StoreState` is a plain owned value handed to whoever drives it. There
//! is no global; tests construct a fresh aggregate per case and the
//! persistence layer owns exactly one.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    Cashbox, Customer, Expense, PaymentMethod, Product, Sale, Settings, Transaction,
    TransactionKind,
};

// =============================================================================
// Store State
// =============================================================================

/// The root aggregate: all collections, the cashbox, and settings.
///
/// Lookups are linear scans by id. The working set is one store's records,
/// so nothing here needs an index.
///
/// Every field carries `#[serde(default)]`: a persisted blob missing a
/// top-level field decodes with that field at its documented default while
/// the others restore normally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    /// Products available for sale.
    #[serde(default)]
    pub products: Vec<Product>,

    /// Known customers.
    #[serde(default)]
    pub customers: Vec<Customer>,

    /// Open sales only. Completion deletes the record.
    #[serde(default)]
    pub sales: Vec<Sale>,

    /// Recorded expenses (append-only).
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Balance and transaction log.
    #[serde(default)]
    pub cashbox: Cashbox,

    /// Static store configuration.
    #[serde(default)]
    pub settings: Settings,
}

impl StoreState {
    /// Creates an empty aggregate with default settings.
    pub fn new() -> Self {
        StoreState::default()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Finds a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Finds a customer by id.
    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Finds an open sale by id.
    pub fn sale(&self, sale_id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == sale_id)
    }

    // =========================================================================
    // Product Operations
    // =========================================================================

    /// Creates a product and appends it to the catalog.
    ///
    /// Price and quantity are stored as given; sign checks belong to the
    /// input layer.
    pub fn add_product(
        &mut self,
        name: &str,
        price: Money,
        quantity: i64,
        category: &str,
    ) -> Product {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents: price.cents(),
            quantity,
            category: category.to_string(),
            created_at: Utc::now(),
        };

        self.products.push(product.clone());
        product
    }

    /// Overwrites a product's quantity (absolute set, not a delta).
    ///
    /// Returns `false` without touching anything when the id is unknown.
    pub fn update_product_quantity(&mut self, product_id: &str, new_quantity: i64) -> bool {
        match self.products.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.quantity = new_quantity;
                true
            }
            None => false,
        }
    }

    /// Removes a product from the catalog.
    ///
    /// Returns `false` when the id is unknown (collection unchanged). Open
    /// sales holding lines for the product keep their snapshots.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);
        self.products.len() != before
    }

    // =========================================================================
    // Sale Operations
    // =========================================================================

    /// Opens a new sale with no items and a zero total.
    ///
    /// When a customer id is given, the customer's name is frozen onto the
    /// sale at this moment. An id that matches no customer is stored as
    /// given, with no name snapshot.
    pub fn start_sale(&mut self, customer_id: Option<&str>) -> Sale {
        let customer_name = customer_id
            .and_then(|id| self.customer(id))
            .map(|c| c.name.clone());

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.map(str::to_string),
            customer_name,
            items: Vec::new(),
            total_cents: 0,
            created_at: Utc::now(),
        };

        self.sales.push(sale.clone());
        sale
    }

    /// Adds a quantity of a product to an open sale.
    ///
    /// Merges into the existing line when the product is already on the
    /// sale (keeping the unit price frozen at first add), appends a new
    /// line otherwise, then recomputes the sale total.
    ///
    /// No stock-level check happens here; stock is drawn at completion.
    ///
    /// ## Errors
    /// - [`CoreError::SaleNotFound`] when no open sale has the id
    /// - [`CoreError::ProductNotFound`] when no product has the id
    ///
    /// Both leave the aggregate untouched.
    pub fn add_item_to_sale(
        &mut self,
        sale_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> CoreResult<Money> {
        let sale_index = self
            .sales
            .iter()
            .position(|s| s.id == sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

        let product = self
            .product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?
            .clone();

        Ok(self.sales[sale_index].add_item(&product, quantity))
    }

    /// Completes an open sale: the sole terminal transition.
    ///
    /// ## What This Does
    /// 1. Deletes the sale from the open-sales collection
    /// 2. Credits the cashbox by the sale total and appends an income
    ///    transaction carrying the payment method and note
    /// 3. Decrements each referenced product's quantity by the line
    ///    quantity, with no floor at zero; lines whose product has been
    ///    deleted since the add are skipped
    ///
    /// Returns the recorded transaction.
    ///
    /// ## Errors
    /// [`CoreError::SaleNotFound`] when no open sale has the id; nothing
    /// is mutated in that case.
    pub fn complete_sale(
        &mut self,
        sale_id: &str,
        payment_method: PaymentMethod,
        notes: Option<&str>,
    ) -> CoreResult<Transaction> {
        let sale_index = self
            .sales
            .iter()
            .position(|s| s.id == sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

        let sale = self.sales.remove(sale_index);

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: TransactionKind::Income,
            amount_cents: sale.total_cents,
            description: format!("Sale #{}", sale.id),
            payment_method,
            notes: notes.map(str::to_string),
            created_at: Utc::now(),
        };
        self.cashbox.record(transaction.clone());

        for item in &sale.items {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == item.product_id) {
                product.quantity -= item.quantity;
            }
        }

        Ok(transaction)
    }

    // =========================================================================
    // Expense & Customer Operations
    // =========================================================================

    /// Records an expense. The collection is append-only.
    pub fn add_expense(&mut self, amount: Money, category: &str, description: &str) -> Expense {
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            amount_cents: amount.cents(),
            category: category.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };

        self.expenses.push(expense.clone());
        expense
    }

    /// Creates a customer record.
    pub fn add_customer(&mut self, name: &str, phone: &str) -> Customer {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            created_at: Utc::now(),
        };

        self.customers.push(customer.clone());
        customer
    }

    /// Removes a customer.
    ///
    /// Returns `false` when the id is unknown. Sales referencing the
    /// customer keep their frozen name snapshot.
    pub fn remove_customer(&mut self, customer_id: &str) -> bool {
        let before = self.customers.len();
        self.customers.retain(|c| c.id != customer_id);
        self.customers.len() != before
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Replaces the settings record wholesale.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
