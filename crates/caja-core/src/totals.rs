//! # Totals
//!
//! Subtotal / tax / total arithmetic for a set of line items.
//!
//! ## Precision
//! Amounts are full-precision `f64` end to end; two-decimal rounding happens
//! only when a document is rendered. Computed and displayed values can
//! drift at the cent level - a documented property of this system, not
//! something this module papers over.

use serde::{Deserialize, Serialize};

use crate::types::LineSnapshot;

// =============================================================================
// Totals
// =============================================================================

/// The computed money summary of a sale or quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Σ(unit_price × quantity) across all lines.
    pub subtotal: f64,
    /// IVA percentage the tax amount was computed from.
    pub tax_rate_pct: f64,
    /// subtotal × rate / 100.
    pub tax_amount: f64,
    /// subtotal + tax_amount.
    pub total: f64,
}

/// Computes totals for a set of frozen lines at the given IVA percentage.
///
/// Pure function: does not look at live product data, only at the snapshots.
///
/// ## Example
/// ```rust
/// use caja_core::totals::compute_totals;
/// use caja_core::types::LineSnapshot;
///
/// let lines = vec![LineSnapshot {
///     product_id: "p".into(),
///     barcode: "779".into(),
///     name: "Yerba 1kg".into(),
///     unit_price: 100.0,
///     quantity: 2,
///     line_total: 200.0,
/// }];
/// let totals = compute_totals(&lines, 21.0);
/// assert!((totals.total - 242.0).abs() < 1e-9);
/// ```
pub fn compute_totals(lines: &[LineSnapshot], tax_rate_pct: f64) -> Totals {
    let subtotal: f64 = lines
        .iter()
        .map(|l| l.unit_price * l.quantity as f64)
        .sum();
    let tax_amount = subtotal * (tax_rate_pct / 100.0);
    Totals {
        subtotal,
        tax_rate_pct,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Formats an amount with the two decimals used on every document.
#[inline]
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
