//! Validation helpers for warehouse records
//!
//! Boundary checks run before any store mutation, so a failed
//! validation never leaves partial state behind.

use crate::models::{CreateInventoryInput, InventoryPatch};

/// Validate a SKU is present and non-blank.
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.trim().is_empty() {
        return Err("sku is required");
    }
    Ok(())
}

/// Validate a warehouse code is present and non-blank.
pub fn validate_warehouse(warehouse: &str) -> Result<(), &'static str> {
    if warehouse.trim().is_empty() {
        return Err("warehouse is required");
    }
    Ok(())
}

/// Validate a movement quantity is a positive integer.
pub fn validate_movement_qty(qty: i64) -> Result<(), &'static str> {
    if qty <= 0 {
        return Err("qty must be a positive integer");
    }
    Ok(())
}

/// Validate a stocked quantity is non-negative.
pub fn validate_stock_qty(qty: i64) -> Result<(), &'static str> {
    if qty < 0 {
        return Err("qty cannot be negative");
    }
    Ok(())
}

/// Validate the full set of required fields for an inventory create.
pub fn validate_inventory_create(input: &CreateInventoryInput) -> Result<(), &'static str> {
    validate_sku(&input.sku)?;
    if input.name.trim().is_empty() {
        return Err("name is required");
    }
    if input.unit_of_measure.trim().is_empty() {
        return Err("unitOfMeasure is required");
    }
    validate_warehouse(&input.warehouse)?;
    validate_stock_qty(input.qty)
}

/// Validate the fields an inventory patch does carry.
pub fn validate_inventory_patch(patch: &InventoryPatch) -> Result<(), &'static str> {
    if patch.is_empty() {
        return Err("patch must contain at least one field");
    }
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err("name cannot be blank");
        }
    }
    if let Some(warehouse) = &patch.warehouse {
        validate_warehouse(warehouse)?;
    }
    if let Some(qty) = patch.qty {
        validate_stock_qty(qty)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(sku: &str, qty: i64) -> CreateInventoryInput {
        CreateInventoryInput {
            sku: sku.to_string(),
            name: "Widget".to_string(),
            qty,
            unit_of_measure: "EA".to_string(),
            warehouse: "WH01".to_string(),
            location: None,
            image_ref: None,
            expiry: None,
        }
    }

    #[test]
    fn blank_sku_rejected() {
        assert!(validate_sku("  ").is_err());
        assert!(validate_sku("SP001").is_ok());
    }

    #[test]
    fn movement_qty_must_be_positive() {
        assert!(validate_movement_qty(0).is_err());
        assert!(validate_movement_qty(-3).is_err());
        assert!(validate_movement_qty(1).is_ok());
    }

    #[test]
    fn create_rejects_negative_stock() {
        assert!(validate_inventory_create(&create_input("SP001", -1)).is_err());
        assert!(validate_inventory_create(&create_input("SP001", 0)).is_ok());
    }

    #[test]
    fn empty_patch_rejected() {
        assert!(validate_inventory_patch(&InventoryPatch::default()).is_err());
        let patch = InventoryPatch {
            qty: Some(5),
            ..Default::default()
        };
        assert!(validate_inventory_patch(&patch).is_ok());
    }

    proptest::proptest! {
        #[test]
        fn prop_qty_boundaries(qty in proptest::prelude::any::<i64>()) {
            proptest::prop_assert_eq!(validate_movement_qty(qty).is_ok(), qty > 0);
            proptest::prop_assert_eq!(validate_stock_qty(qty).is_ok(), qty >= 0);
        }
    }
}
