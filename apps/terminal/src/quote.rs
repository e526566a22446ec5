//! # Quote Builder
//!
//! Builds a PRESUPUESTO document without touching stock or persisting
//! anything: quote lines carry no stock ceiling (a quote can offer more
//! units than are currently on the shelf), and generating the PDF is the
//! only output.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use caja_core::error::CartError;
use caja_core::totals::compute_totals;
use caja_core::types::{Company, LineSnapshot, Product};
use caja_core::validation::validate_required;
use caja_core::DEFAULT_TAX_RATE_PCT;
use caja_render::snapshot::{ClientSnapshot, CompanySnapshot, DocumentSnapshot, QuoteTerms};

use crate::error::TerminalError;
use crate::storage::InvoiceStorage;

// =============================================================================
// Quote Line
// =============================================================================

/// One line of a quote. Same snapshot shape as a cart line, minus the
/// stock ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub line_id: String,
    pub product_id: String,
    pub barcode: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl QuoteLine {
    fn from_product(product: &Product) -> Self {
        QuoteLine {
            line_id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            unit_price: product.price_sale,
            quantity: 1,
        }
    }

    fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            product_id: self.product_id.clone(),
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
            line_total: self.unit_price * self.quantity as f64,
        }
    }
}

// =============================================================================
// Quote Client
// =============================================================================

/// Client details entered on the quote form. Name and address are required
/// to generate the document; phone and CIF/NIF are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteClient {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub tax_code: String,
}

// =============================================================================
// Quote Builder
// =============================================================================

/// The in-progress quote.
#[derive(Debug, Default)]
pub struct QuoteBuilder {
    lines: Vec<QuoteLine>,
    pub client: QuoteClient,
    pub tax_rate_pct: f64,
    pub terms: QuoteTerms,
}

impl QuoteBuilder {
    pub fn new() -> Self {
        QuoteBuilder {
            lines: Vec::new(),
            client: QuoteClient::default(),
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            terms: QuoteTerms::default(),
        }
    }

    /// Adds a product, or increments its existing line. No stock check:
    /// quotes may offer quantities beyond current stock.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(QuoteLine::from_product(product));
    }

    /// Applies a delta to a line's quantity; a result of zero or below is a
    /// silent no-op, like the cart.
    pub fn change_quantity(&mut self, line_id: &str, delta: i64) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound {
                line_id: line_id.to_string(),
            })?;
        let new_quantity = line.quantity + delta;
        if new_quantity > 0 {
            line.quantity = new_quantity;
        }
        Ok(())
    }

    /// Removes a line unconditionally.
    pub fn remove_line(&mut self, line_id: &str) {
        self.lines.retain(|l| l.line_id != line_id);
    }

    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn snapshot_lines(&self) -> Vec<LineSnapshot> {
        self.lines.iter().map(QuoteLine::snapshot).collect()
    }

    /// Renders the quote PDF into the documents folder.
    ///
    /// ## Requirements
    /// - company data configured
    /// - at least one line
    /// - client name and address filled in
    ///
    /// The builder keeps its lines afterwards; a quote can be exported
    /// repeatedly while the operator tweaks it.
    pub fn export_pdf(
        &self,
        company: Option<&Company>,
        documents: &InvoiceStorage,
        issued_at: DateTime<Utc>,
    ) -> Result<PathBuf, TerminalError> {
        let company = company.ok_or(TerminalError::MissingCompany)?;
        if self.is_empty() {
            return Err(TerminalError::EmptyCart);
        }
        validate_required("client name", &self.client.name)?;
        validate_required("client address", &self.client.address)?;

        let lines = self.snapshot_lines();
        let totals = compute_totals(&lines, self.tax_rate_pct);
        let file_name = format!("presupuesto_{}.pdf", issued_at.format("%Y%m%d_%H%M%S"));

        let snapshot = DocumentSnapshot {
            number: file_name.trim_end_matches(".pdf").to_string(),
            issued_at,
            company: CompanySnapshot::from(company),
            client: ClientSnapshot {
                name: self.client.name.trim().to_string(),
                email: String::new(),
                address: Some(self.client.address.trim().to_string()),
                phone: optional(&self.client.phone),
                tax_code: optional(&self.client.tax_code),
            },
            lines,
            totals,
            payment_method: String::new(),
        };

        let bytes = caja_render::quote_pdf(&snapshot, &self.terms)?;
        let path = documents.write_document(&file_name, &bytes)?;
        info!(path = %path.display(), total = totals.total, "quote exported");
        Ok(path)
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
