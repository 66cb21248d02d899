//! # Domain Types
//!
//! Core domain types for the store aggregate.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Types                           │
//! │                                                             │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
//! │  │   Product    │  │     Sale     │  │   Cashbox    │       │
//! │  │ ──────────── │  │ ──────────── │  │ ──────────── │       │
//! │  │ id (UUID)    │  │ id (UUID)    │  │ balance_cents│       │
//! │  │ price_cents  │  │ items        │  │ transactions │       │
//! │  │ quantity     │  │ total_cents  │  └──────────────┘       │
//! │  └──────────────┘  └──────────────┘                         │
//! │                                                             │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
//! │  │   Customer   │  │   Expense    │  │  Settings    │       │
//! │  └──────────────┘  └──────────────┘  └──────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleItem` freezes the product name and unit price at the moment the
//! item is first added; a `Sale` freezes the customer name at start time.
//! Later edits or deletions of the source entity never propagate into a
//! snapshot, which is what keeps deletion legal while references exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1500 bps = 15%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in tables and frozen into sale items.
    pub name: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units on hand. Sale completion decrements without a floor, so this
    /// can go negative.
    pub quantity: i64,

    /// Free-form category label.
    pub category: String,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record, referenced by id from sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, denormalized onto sales at start time.
    pub name: String,

    /// Contact phone number, stored as given.
    pub phone: String,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in an open sale.
/// Uses the snapshot pattern to freeze product data at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product this line refers to. May dangle after product deletion;
    /// the snapshots below keep the line renderable regardless.
    pub product_id: String,

    /// Product name at time of first add (frozen).
    pub name_snapshot: String,

    /// Unit price in cents at time of first add (frozen). Re-pricing the
    /// product does not touch lines already in a sale.
    pub unit_price_cents: i64,

    /// Quantity on this line. Repeated adds of the same product merge here.
    pub quantity: i64,

    /// Line total (unit_price × quantity), recomputed on every merge.
    pub line_total_cents: i64,
}

impl SaleItem {
    /// Creates a new line from a product, freezing name and unit price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        SaleItem {
            product_id: product.id.clone(),
            name_snapshot: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
            line_total_cents: product.price_cents * quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An in-progress ("open") sale.
///
/// ## Lifecycle
/// ```text
/// start_sale ──► items added/merged ──► complete_sale (record deleted,
///     │              │                   cashbox credited, stock drawn)
///     │              │
///     └──────────────┴──► abandoned: stays in the collection forever
/// ```
/// Completed sales leave no record here; the cashbox transaction they
/// generate is the only durable trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer link, if the sale was started for a known customer.
    pub customer_id: Option<String>,

    /// Customer name at start time (frozen). Later customer edits or
    /// deletion do not propagate.
    pub customer_name: Option<String>,

    /// Line items, one per distinct product.
    pub items: Vec<SaleItem>,

    /// Sum of line totals, recomputed after every item mutation.
    pub total_cents: i64,

    /// When the sale was started.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Adds a product to the sale, merging with an existing line when the
    /// product is already present.
    ///
    /// ## Behavior
    /// - Existing line: quantity incremented in place, line total recomputed
    ///   at the unit price frozen on first add
    /// - New product: a fresh line with current product name and price
    ///
    /// Returns the recomputed sale total.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Money {
        match self.items.iter().position(|i| i.product_id == product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity += quantity;
                item.line_total_cents = item.unit_price_cents * item.quantity;
            }
            None => self.items.push(SaleItem::from_product(product, quantity)),
        }

        self.total_cents = self.items.iter().map(|i| i.line_total_cents).sum();
        self.total()
    }

    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A recorded expense. The collection is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Amount in cents.
    pub amount_cents: i64,

    /// Free-form category label.
    pub category: String,

    /// Free-form description.
    pub description: String,

    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Transactions & Cashbox
// =============================================================================

/// Direction of a cashbox transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money entering the cashbox (sale completion).
    Income,
    /// Money leaving the cashbox.
    Expense,
}

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    ExternalCard,
}

/// An entry in the cashbox's append-only transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Whether the amount entered or left the cashbox.
    pub kind: TransactionKind,

    /// Amount in cents.
    pub amount_cents: i64,

    /// Human-readable description, e.g. `Sale #<id>`.
    pub description: String,

    /// How the counterparty paid.
    pub payment_method: PaymentMethod,

    /// Free-form note captured at completion time.
    pub notes: Option<String>,

    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Running balance plus the transaction log behind it.
///
/// ## Invariant
/// `balance_cents` equals the sum of income amounts minus the sum of
/// expense amounts over `transactions`. `record` is the only mutation,
/// which is what keeps the two in step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cashbox {
    /// Current balance in cents.
    pub balance_cents: i64,

    /// Append-only transaction log.
    pub transactions: Vec<Transaction>,
}

impl Cashbox {
    /// Records a transaction, adjusting the balance by its direction.
    pub fn record(&mut self, transaction: Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.balance_cents += transaction.amount_cents,
            TransactionKind::Expense => self.balance_cents -= transaction.amount_cents,
        }
        self.transactions.push(transaction);
    }

    /// Returns the balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.balance_cents)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Static store configuration. Serialized with the aggregate; replaced
/// wholesale by `update_settings`, never touched by the other operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency code shown next to amounts.
    pub currency: String,

    /// Store name shown in the UI header.
    pub store_name: String,

    /// Tax rate in basis points (1500 = 15%).
    pub tax_rate_bps: u32,

    /// Date format string used by the UI layer.
    pub date_format: String,
}

impl Settings {
    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "SAR".to_string(),
            store_name: "My Store".to_string(),
            tax_rate_bps: 1500, // 15%
            date_format: "dd/mm/yyyy".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            quantity: 10,
            category: "General".to_string(),
            created_at: Utc::now(),
        }
    }

    fn empty_sale() -> Sale {
        Sale {
            id: "s-1".to_string(),
            customer_id: None,
            customer_name: None,
            items: Vec::new(),
            total_cents: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_tax_rate() {
        let rate = TaxRate::from_bps(1500);
        assert_eq!(rate.bps(), 1500);
        assert!((rate.percentage() - 15.0).abs() < 0.001);

        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_sale_add_item_appends_then_merges() {
        let mut sale = empty_sale();
        let product = test_product("p-1", 250);

        let total = sale.add_item(&product, 2);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(total.cents(), 500);

        let total = sale.add_item(&product, 3);
        assert_eq!(sale.items.len(), 1); // still one line
        assert_eq!(sale.items[0].quantity, 5);
        assert_eq!(sale.items[0].line_total_cents, 1250);
        assert_eq!(total.cents(), 1250);
    }

    #[test]
    fn test_sale_merge_keeps_first_add_price() {
        let mut sale = empty_sale();
        let mut product = test_product("p-1", 250);

        sale.add_item(&product, 1);
        product.price_cents = 999; // re-priced after first add

        sale.add_item(&product, 1);
        assert_eq!(sale.items[0].unit_price_cents, 250);
        assert_eq!(sale.total_cents, 500);
    }

    #[test]
    fn test_cashbox_record() {
        let mut cashbox = Cashbox::default();
        assert_eq!(cashbox.balance_cents, 0);

        cashbox.record(Transaction {
            id: "t-1".to_string(),
            kind: TransactionKind::Income,
            amount_cents: 750,
            description: "Sale #s-1".to_string(),
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at: Utc::now(),
        });

        assert_eq!(cashbox.balance_cents, 750);
        assert_eq!(cashbox.transactions.len(), 1);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tax_rate_bps, 1500);
        assert_eq!(settings.date_format, "dd/mm/yyyy");
        assert!((settings.tax_rate().percentage() - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_transaction_kind_serde_shape() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"income\"");

        let method: PaymentMethod = serde_json::from_str("\"external_card\"").unwrap();
        assert_eq!(method, PaymentMethod::ExternalCard);
    }
}
