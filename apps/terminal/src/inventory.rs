//! # Inventory Management
//!
//! Product CRUD and the barcode-keyed stock adjustment dialog. Every
//! operation validates its typed form first, then issues the owner-scoped
//! store call.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use caja_core::types::Product;
use caja_core::validation::{validate_quantity, ProductForm};
use caja_remote::session::Session;
use caja_remote::store::RemoteStore;

use crate::error::{TerminalError, TerminalResult};

// =============================================================================
// Products
// =============================================================================

/// Creates a product from a validated form.
///
/// Barcode uniqueness per owner is enforced by the store; the duplicate
/// surfaces as a unique-violation error.
pub async fn add_product(
    store: &dyn RemoteStore,
    session: &Session,
    form: &ProductForm,
) -> TerminalResult<Product> {
    form.validate()?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        owner_id: session.user_id.clone(),
        barcode: form.barcode.trim().to_string(),
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        stock: form.stock,
        category: form.category.trim().to_string(),
        branch: form.branch.trim().to_string(),
        tax_rate_pct: form.tax_rate_pct,
        price_cost: form.price_cost,
        price_sale: form.price_sale,
        created_at: now,
        updated_at: now,
    };

    store.insert_product(&product).await?;
    info!(id = %product.id, barcode = %product.barcode, "product added");
    Ok(product)
}

/// Applies a validated form to an existing product.
pub async fn update_product(
    store: &dyn RemoteStore,
    session: &Session,
    product_id: &str,
    form: &ProductForm,
) -> TerminalResult<Product> {
    form.validate()?;

    let existing = store
        .list_products(&session.user_id)
        .await?
        .into_iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| caja_remote::error::StoreError::not_found("Product", product_id))?;

    let updated = Product {
        barcode: form.barcode.trim().to_string(),
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        stock: form.stock,
        category: form.category.trim().to_string(),
        branch: form.branch.trim().to_string(),
        tax_rate_pct: form.tax_rate_pct,
        price_cost: form.price_cost,
        price_sale: form.price_sale,
        updated_at: Utc::now(),
        ..existing
    };

    store.update_product(&updated).await?;
    Ok(updated)
}

/// Deletes a product. Sales that already snapshotted it are unaffected.
pub async fn delete_product(
    store: &dyn RemoteStore,
    session: &Session,
    product_id: &str,
) -> TerminalResult<()> {
    store.delete_product(&session.user_id, product_id).await?;
    info!(id = %product_id, "product deleted");
    Ok(())
}

// =============================================================================
// Stock Adjustment
// =============================================================================

/// Direction of a manual stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOperation {
    /// Goods received.
    Add,
    /// Shrinkage, breakage, corrections.
    Remove,
}

/// Adjusts stock for the product with the given barcode.
///
/// Rejects removals that would drive stock below zero; the store itself
/// does not enforce that floor.
pub async fn adjust_stock(
    store: &dyn RemoteStore,
    session: &Session,
    barcode: &str,
    operation: StockOperation,
    quantity: i64,
) -> TerminalResult<Product> {
    validate_quantity(quantity)?;

    let mut product = store
        .find_product_by_barcode(&session.user_id, barcode)
        .await?
        .ok_or_else(|| TerminalError::ProductNotFound {
            barcode: barcode.to_string(),
        })?;

    let new_stock = match operation {
        StockOperation::Add => product.stock + quantity,
        StockOperation::Remove => product.stock - quantity,
    };
    if new_stock < 0 {
        return Err(TerminalError::InsufficientStock {
            name: product.name.clone(),
        });
    }

    store
        .update_stock(&session.user_id, &product.id, new_stock)
        .await?;
    info!(barcode = %barcode, from = product.stock, to = new_stock, "stock adjusted");

    product.stock = new_stock;
    product.updated_at = Utc::now();
    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================
