//! # Cart
//!
//! The in-progress sale: an ordered collection of lines with per-line stock
//! ceilings.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  Operator Action           Cart Method             State Change         │
//! │  ───────────────           ───────────             ────────────         │
//! │                                                                         │
//! │  Scan / pick product ────► add_line() ───────────► push or qty += 1    │
//! │                                                                         │
//! │  +/- buttons ────────────► change_quantity() ────► qty += delta        │
//! │                                                                         │
//! │  Delete button ──────────► remove_line() ────────► line dropped        │
//! │                                                                         │
//! │  Finalize / cancel ──────► clear() ──────────────► empty cart          │
//! │                                                                         │
//! │  Every mutation checks the stock ceiling CAPTURED WHEN THE LINE WAS     │
//! │  ADDED - never a live re-read. Two terminals can race the same stock.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CartError;
use crate::types::{LineSnapshot, Product};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the in-progress sale.
///
/// ## Price and Stock Freezing
/// Price and stock ceiling are captured from the catalog cache at the moment
/// the line is added. If the product changes remotely afterwards, this line
/// keeps displaying (and validating against) the captured values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Local line identifier, generated when the line is added.
    pub line_id: String,

    /// Product ID (UUID).
    pub product_id: String,

    /// Barcode at time of adding (frozen).
    pub barcode: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Branch the product belongs to.
    pub branch: String,

    /// Sale price at time of adding (frozen).
    pub unit_price: f64,

    /// Stock recorded in the catalog cache when this line was created.
    /// All quantity checks in this cart use this ceiling.
    pub stock_ceiling: i64,

    /// Quantity in the cart (always >= 1).
    pub quantity: i64,
}

impl CartLine {
    /// Creates a line with quantity 1 from a cached product.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            line_id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            branch: product.branch.clone(),
            unit_price: product.price_sale,
            stock_ceiling: product.stock,
            quantity: 1,
        }
    }

    /// unit_price × quantity.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Freezes this line for persistence on a bill/sale record.
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            product_id: self.product_id.clone(),
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
            line_total: self.line_total(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The mutable ordered collection of lines for one sale.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   increments its quantity)
/// - `1 <= quantity <= stock_ceiling` for every line
/// - Lines keep insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart, or increments its existing line.
    ///
    /// ## Behavior
    /// - Cached stock of zero: rejected, cart unchanged
    /// - Product already in cart: quantity + 1 unless that would exceed the
    ///   line's stock ceiling, in which case the add is rejected
    /// - Otherwise: a new line with quantity 1 is appended
    pub fn add_line(&mut self, product: &Product) -> Result<(), CartError> {
        if product.stock <= 0 {
            return Err(CartError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= line.stock_ceiling {
                return Err(CartError::InsufficientStock {
                    name: line.name.clone(),
                    available: line.stock_ceiling,
                    requested: line.quantity + 1,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(CartLine::from_product(product));
        Ok(())
    }

    /// Applies a delta to a line's quantity.
    ///
    /// ## Behavior
    /// - Result above the line's stock ceiling: rejected, quantity unchanged
    /// - Result of zero or below: silent no-op - the line is NOT removed,
    ///   the explicit delete button is the only way to drop a line
    /// - Unknown line id: error
    pub fn change_quantity(&mut self, line_id: &str, delta: i64) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound {
                line_id: line_id.to_string(),
            })?;

        let new_quantity = line.quantity + delta;
        if new_quantity > line.stock_ceiling {
            return Err(CartError::InsufficientStock {
                name: line.name.clone(),
                available: line.stock_ceiling,
                requested: new_quantity,
            });
        }
        if new_quantity > 0 {
            line.quantity = new_quantity;
        }
        Ok(())
    }

    /// Removes a line unconditionally. Unknown ids are a silent no-op.
    pub fn remove_line(&mut self, line_id: &str) {
        self.lines.retain(|l| l.line_id != line_id);
    }

    /// Clears all lines (sale finalized or cancelled).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Freezes every line for persistence and document rendering.
    pub fn snapshot(&self) -> Vec<LineSnapshot> {
        self.lines.iter().map(CartLine::snapshot).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, stock: i64, price_sale: f64) -> Product {
        Product {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            barcode: format!("779{}", id),
            name: format!("Product {}", id),
            description: String::new(),
            stock,
            category: "General".to_string(),
            branch: "Centro".to_string(),
            tax_rate_pct: 21.0,
            price_cost: price_sale / 2.0,
            price_sale,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_line_appends_with_quantity_one() {
        let mut cart = Cart::new();
        let product = test_product("1", 10, 100.0);

        cart.add_line(&product).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].unit_price, 100.0);
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 10, 100.0);

        cart.add_line(&product).unwrap();
        cart.add_line(&product).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_zero_stock_product_never_succeeds() {
        let mut cart = Cart::new();
        let product = test_product("1", 0, 100.0);

        let err = cart.add_line(&product).unwrap_err();

        assert!(matches!(err, CartError::OutOfStock { .. }));
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_add_beyond_ceiling_is_rejected() {
        let mut cart = Cart::new();
        let product = test_product("1", 2, 100.0);

        cart.add_line(&product).unwrap();
        cart.add_line(&product).unwrap();
        let err = cart.add_line(&product).unwrap_err();

        assert!(matches!(err, CartError::InsufficientStock { .. }));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_change_quantity_beyond_ceiling_leaves_quantity_unchanged() {
        let mut cart = Cart::new();
        let product = test_product("1", 3, 100.0);
        cart.add_line(&product).unwrap();
        let line_id = cart.lines()[0].line_id.clone();

        cart.change_quantity(&line_id, 2).unwrap();
        assert_eq!(cart.lines()[0].quantity, 3);

        let err = cart.change_quantity(&line_id, 1).unwrap_err();
        assert!(matches!(err, CartError::InsufficientStock { .. }));
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_change_quantity_to_zero_is_a_noop() {
        let mut cart = Cart::new();
        let product = test_product("1", 5, 100.0);
        cart.add_line(&product).unwrap();
        let line_id = cart.lines()[0].line_id.clone();

        // Going to zero or below keeps the line at its current quantity.
        cart.change_quantity(&line_id, -1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.len(), 1);

        cart.change_quantity(&line_id, -5).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_change_quantity_unknown_line() {
        let mut cart = Cart::new();
        let err = cart.change_quantity("missing", 1).unwrap_err();
        assert!(matches!(err, CartError::LineNotFound { .. }));
    }

    #[test]
    fn test_remove_line_leaves_other_lines_untouched() {
        let mut cart = Cart::new();
        let first = test_product("1", 5, 100.0);
        let second = test_product("2", 5, 200.0);
        let third = test_product("3", 5, 300.0);
        cart.add_line(&first).unwrap();
        cart.add_line(&second).unwrap();
        cart.add_line(&third).unwrap();

        let target = cart.lines()[1].line_id.clone();
        cart.remove_line(&target);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].product_id, "1");
        assert_eq!(cart.lines()[1].product_id, "3");
    }

    #[test]
    fn test_remove_unknown_line_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 5, 100.0)).unwrap();

        cart.remove_line("missing");

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_ceiling_uses_stock_captured_at_add_time() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 2, 100.0);
        cart.add_line(&product).unwrap();

        // Remote stock grows after the line was added; the cached ceiling
        // still governs this cart.
        product.stock = 10;
        let line_id = cart.lines()[0].line_id.clone();
        let err = cart.change_quantity(&line_id, 5).unwrap_err();
        assert!(matches!(
            err,
            CartError::InsufficientStock { available: 2, .. }
        ));
    }

    #[test]
    fn test_snapshot_freezes_lines() {
        let mut cart = Cart::new();
        let product = test_product("1", 5, 150.0);
        cart.add_line(&product).unwrap();
        cart.add_line(&product).unwrap();

        let snapshot = cart.snapshot();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].quantity, 2);
        assert_eq!(snapshot[0].line_total, 300.0);
    }
}
