//! # Domain Types
//!
//! Core domain records used throughout Caja.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Bill       │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  barcode        │   │  number         │   │  bill_id (FK)   │       │
//! │  │  stock          │   │  items snapshot │   │  items snapshot │       │
//! │  │  price_sale     │   │  total          │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │    Company      │   │ PaymentMethod   │       │
//! │  │  upserted by    │   │  one per owner  │   │  Cash/Card/...  │       │
//! │  │  email          │   │  CUIT, address  │   │  + free-form    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Every persisted record carries an `owner_id` (the authenticated profile);
//! every remote operation is scoped by it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Mutated by inventory edits and by the stock decrement during sale
/// finalization; never deleted automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Profile this product belongs to.
    pub owner_id: String,

    /// Barcode - unique per owner, used by the scanner flow.
    pub barcode: String,

    /// Display name shown on the screen and on documents.
    pub name: String,

    /// Optional free-form description.
    pub description: String,

    /// Current stock level (never negative).
    pub stock: i64,

    /// Category label.
    pub category: String,

    /// Branch (business location) this product is sold at.
    pub branch: String,

    /// IVA percentage applied when this product is quoted on its own.
    pub tax_rate_pct: f64,

    /// Cost price (what the business pays).
    pub price_cost: f64,

    /// Sale price (what the client pays).
    pub price_sale: f64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether any quantity can still be sold from cached stock.
    #[inline]
    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client of the business.
///
/// Upserted by email during sale finalization; editable and deletable from
/// client management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    /// Unique per owner; the upsert key during finalization.
    pub email: String,
    pub branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Company
// =============================================================================

/// The single company record owned by a profile.
/// Read-only during a sale; edited from company settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    /// Tax identifier (CUIT) printed on every document.
    pub tax_id: String,
    pub email: String,
    /// The branch the company currently operates from; preselected on the
    /// point-of-sale screen.
    pub branch: String,
}

// =============================================================================
// Profile
// =============================================================================

/// The authenticated business owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub business_name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// The four fixed variants are the defaults offered on the point-of-sale
/// screen; `Other` carries methods the operator adds at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Transfer,
    Other(String),
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Efectivo"),
            PaymentMethod::CreditCard => write!(f, "Tarjeta de Crédito"),
            PaymentMethod::DebitCard => write!(f, "Tarjeta de Débito"),
            PaymentMethod::Transfer => write!(f, "Transferencia"),
            PaymentMethod::Other(name) => write!(f, "{}", name),
        }
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status recorded on bill and sale rows.
///
/// This workflow only ever writes completed records; there is no edit or
/// void operation once a sale is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStatus::Completed => write!(f, "completed"),
        }
    }
}

// =============================================================================
// Line Snapshot
// =============================================================================

/// A line item frozen at commit time.
///
/// Uses the snapshot pattern: product name and price are copied so the
/// persisted document stays stable even if the product is edited later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub product_id: String,
    pub barcode: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit sale price at time of sale (frozen).
    pub unit_price: f64,
    pub quantity: i64,
    /// unit_price × quantity, precomputed for document rendering.
    pub line_total: f64,
}

// =============================================================================
// Bill
// =============================================================================

/// The persisted invoice record of a completed sale.
///
/// Created once during finalization, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub owner_id: String,
    /// Date stamp + 3-digit random suffix; not guaranteed unique.
    pub number: String,
    pub client_name: String,
    pub client_email: String,
    /// Serialized line items as sold.
    pub items: Vec<LineSnapshot>,
    pub subtotal: f64,
    /// IVA percentage applied to this sale.
    pub tax_rate_pct: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub branch: String,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    /// File name of the rendered invoice document.
    pub document_ref: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Record
// =============================================================================

/// The sales-ledger row written alongside the bill.
///
/// Mirrors the bill's snapshot and references it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub owner_id: String,
    pub number: String,
    pub client_name: String,
    pub client_email: String,
    pub items: Vec<LineSnapshot>,
    pub total: f64,
    /// The bill this sale belongs to.
    pub bill_id: String,
    pub branch: String,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub document_ref: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
