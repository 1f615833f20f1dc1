//! Inventory records keyed by SKU

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Records with a quantity strictly below this threshold count as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// A stocked item in a warehouse, keyed by SKU.
///
/// `qty` is never negative. Outside of corrective field patches it is
/// mutated only through the transaction processor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub sku: String,
    pub name: String,
    pub qty: i64,
    pub unit_of_measure: String,
    pub warehouse: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an inventory record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryInput {
    pub sku: String,
    pub name: String,
    pub qty: i64,
    pub unit_of_measure: String,
    pub warehouse: String,
    pub location: Option<String>,
    pub image_ref: Option<String>,
    pub expiry: Option<NaiveDate>,
}

/// Partial field patch for an inventory record.
///
/// Patching `qty` here is a corrective edit: it bypasses the movement
/// log and leaves no transaction record behind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub qty: Option<i64>,
    pub unit_of_measure: Option<String>,
    pub warehouse: Option<String>,
    pub location: Option<String>,
    pub image_ref: Option<String>,
    pub expiry: Option<NaiveDate>,
}

impl InventoryPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.qty.is_none()
            && self.unit_of_measure.is_none()
            && self.warehouse.is_none()
            && self.location.is_none()
            && self.image_ref.is_none()
            && self.expiry.is_none()
    }
}
