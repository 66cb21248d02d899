//! # Blob Encode/Decode
//!
//! The persisted blob is a JSON object with one entry per top-level field
//! of the aggregate: `products`, `customers`, `sales`, `expenses`,
//! `cashbox`, `settings`.
//!
//! ## Per-Field Defaulting
//! Each field decodes **independently**: a field that is missing or fails
//! to decode falls back to its default while the rest restore normally.
//! A partially malformed blob therefore yields a mix of restored and
//! default fields rather than an all-or-nothing failure. Only a blob that
//! is not JSON at all is an error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use till_core::StoreState;

use crate::error::{StoreError, StoreResult};

/// Serializes the aggregate to the persisted form.
pub fn encode_state(state: &StoreState) -> StoreResult<String> {
    serde_json::to_string_pretty(state).map_err(StoreError::Encode)
}

/// Decodes a blob into an aggregate, defaulting each top-level field
/// independently.
///
/// ## Errors
/// [`StoreError::Decode`] when the blob is not valid JSON.
pub fn decode_state(blob: &str) -> StoreResult<StoreState> {
    let root: Value = serde_json::from_str(blob).map_err(StoreError::Decode)?;

    Ok(StoreState {
        products: field(&root, "products"),
        customers: field(&root, "customers"),
        sales: field(&root, "sales"),
        expenses: field(&root, "expenses"),
        cashbox: field(&root, "cashbox"),
        settings: field(&root, "settings"),
    })
}

/// Extracts one top-level field, falling back to its default when absent
/// or malformed.
fn field<T: DeserializeOwned + Default>(root: &Value, name: &str) -> T {
    match root.get(name) {
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(field = name, %err, "Persisted field failed to decode, using default");
                T::default()
            }
        },
        None => T::default(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Money, Settings};

    #[test]
    fn test_round_trip_reconstructs_state() {
        let mut state = StoreState::new();
        let pen = state.add_product("Pen", Money::from_cents(250), 10, "Stationery");
        let customer = state.add_customer("Alice", "0500000000");
        let sale = state.start_sale(Some(&customer.id));
        state.add_item_to_sale(&sale.id, &pen.id, 3).unwrap();
        state.add_expense(Money::from_cents(300), "Supplies", "bags");

        let blob = encode_state(&state).unwrap();
        let restored = decode_state(&blob).unwrap();

        assert_eq!(restored.products.len(), 1);
        assert_eq!(restored.products[0].id, pen.id);
        assert_eq!(restored.products[0].price_cents, 250);
        assert_eq!(restored.customers[0].name, "Alice");
        assert_eq!(restored.sales[0].total_cents, 750);
        assert_eq!(restored.sales[0].items[0].quantity, 3);
        assert_eq!(restored.expenses[0].amount_cents, 300);
        assert_eq!(restored.settings, state.settings);
    }

    #[test]
    fn test_missing_fields_default_independently() {
        // Only products present: everything else at its documented default
        let state = decode_state(r#"{"products": []}"#).unwrap();

        assert!(state.products.is_empty());
        assert!(state.customers.is_empty());
        assert!(state.sales.is_empty());
        assert!(state.expenses.is_empty());
        assert_eq!(state.cashbox.balance_cents, 0);
        assert!(state.cashbox.transactions.is_empty());
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn test_malformed_field_defaults_while_others_restore() {
        // customers is garbage; cashbox is fine. The mix decodes.
        let blob = r#"{
            "customers": 42,
            "cashbox": {"balance_cents": 900, "transactions": []}
        }"#;
        let state = decode_state(blob).unwrap();

        assert!(state.customers.is_empty());
        assert_eq!(state.cashbox.balance_cents, 900);
    }

    #[test]
    fn test_non_json_blob_is_an_error() {
        assert!(matches!(
            decode_state("not json at all"),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_object_is_full_default_state() {
        let state = decode_state("{}").unwrap();
        assert!(state.products.is_empty());
        assert_eq!(state.settings, Settings::default());
    }
}
