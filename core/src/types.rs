//! Inventory record types.
//!
//! [`Item`] is the only persisted entity. It serializes with [`serde`] so the
//! CLI can emit it as JSON and the store can hand it across crate
//! boundaries without conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column order of the CSV interchange format and of the `list` table.
pub const ITEM_COLUMNS: [&str; 4] = ["sku", "name", "quantity", "price"];

/// A single inventory record.
///
/// The `sku` is immutable once the item exists; every other field may be
/// changed through a partial update. `quantity` and `price` are signed at
/// the type level so that negative input can be represented and rejected
/// by validation rather than silently wrapped.
///
/// # Examples
///
/// ```
/// use stockroom_core::Item;
///
/// let item = Item::new("A100", "Apple", 50, 150.0);
/// assert_eq!(item.sku, "A100");
/// assert!(item.same_fields(&Item::new("A100", "Apple", 50, 150.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stock-keeping unit, unique and case-sensitive.
    pub sku: String,
    /// Human-readable label.
    pub name: String,
    /// Units in stock, never negative.
    pub quantity: i64,
    /// Unit price, never negative.
    pub price: f64,
    /// Time of the last mutation, maintained by the store.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates an item stamped with the current time.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
            price,
            updated_at: Utc::now(),
        }
    }

    /// Compares the user-visible fields, ignoring `updated_at`.
    pub fn same_fields(&self, other: &Item) -> bool {
        self.sku == other.sku
            && self.name == other.name
            && self.quantity == other.quantity
            && self.price == other.price
    }

    /// Applies the supplied fields of a patch in place.
    ///
    /// No validation happens here; callers run
    /// [`validate_patch`](crate::validate_patch) first.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

/// Fields supplied to a partial update.
///
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ItemPatch {
    /// Returns `true` when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.price.is_none()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}
