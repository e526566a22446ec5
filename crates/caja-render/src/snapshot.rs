//! # Document Snapshot
//!
//! The frozen input both renderers consume: company data, client data,
//! line items, computed totals, payment method, timestamp and bill number,
//! captured once at render time. Uses the same snapshot pattern as the
//! persisted bill rows - later edits to products or company settings never
//! change an already-rendered document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caja_core::totals::Totals;
use caja_core::types::{Company, LineSnapshot};
use caja_core::WALK_IN_CLIENT;

// =============================================================================
// Company Snapshot
// =============================================================================

/// Company header data as printed on every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub name: String,
    pub address: String,
    pub tax_id: String,
    pub email: String,
}

impl From<&Company> for CompanySnapshot {
    fn from(company: &Company) -> Self {
        CompanySnapshot {
            name: company.name.clone(),
            address: company.address.clone(),
            tax_id: company.tax_id.clone(),
            email: company.email.clone(),
        }
    }
}

// =============================================================================
// Client Snapshot
// =============================================================================

/// Client block data. Invoices carry name/email; quotes additionally carry
/// address, phone and CIF/NIF when the operator entered them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub tax_code: Option<String>,
}

impl ClientSnapshot {
    /// Snapshot for a sale: name/email, falling back to the walk-in label.
    pub fn for_sale(name: &str, email: &str) -> Self {
        let name = name.trim();
        ClientSnapshot {
            name: if name.is_empty() {
                WALK_IN_CLIENT.to_string()
            } else {
                name.to_string()
            },
            email: email.trim().to_string(),
            address: None,
            phone: None,
            tax_code: None,
        }
    }
}

// =============================================================================
// Document Snapshot
// =============================================================================

/// Everything a renderer needs, frozen. Renderers take `&DocumentSnapshot`
/// and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Bill number (or a quote reference for quote documents).
    pub number: String,
    /// Timestamp printed on the document.
    pub issued_at: DateTime<Utc>,
    pub company: CompanySnapshot,
    pub client: ClientSnapshot,
    pub lines: Vec<LineSnapshot>,
    pub totals: Totals,
    /// Display name of the payment method ("Efectivo", ...).
    pub payment_method: String,
}

// =============================================================================
// Quote Terms
// =============================================================================

/// The commercial terms block printed at the bottom of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTerms {
    pub payment_conditions: String,
    pub validity_days: u32,
    pub notes: String,
}

impl Default for QuoteTerms {
    fn default() -> Self {
        QuoteTerms {
            payment_conditions: "Transferencia bancaria, tarjeta de crédito o efectivo"
                .to_string(),
            validity_days: 30,
            notes: String::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
