//! # caja-render: Document Rendering for Caja
//!
//! Builds the printable/exportable documents of a sale or quote from a
//! frozen [`DocumentSnapshot`]: the wide A4 invoice and quote for PDF
//! export, and the narrow 80 mm ticket for the thermal printer.
//!
//! ## Two renderers, one snapshot
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Document Rendering                                  │
//! │                                                                         │
//! │                    DocumentSnapshot (immutable)                         │
//! │                    company · client · lines · totals                    │
//! │                       │                    │                            │
//! │            ┌──────────┘                    └──────────┐                 │
//! │            ▼                                          ▼                 │
//! │   invoice::invoice_rows()                  ticket::ticket_lines()       │
//! │   A4, Helvetica, two columns               80 mm, Courier, 32 cols      │
//! │            │                                          │                 │
//! │            ▼                                          ▼                 │
//! │   pdf::render_pdf(A4)                      pdf::render_pdf(Roll80)      │
//! │   "factura-<nro>.pdf"                      printer payload / ticket PDF │
//! │                                                                         │
//! │  Renderers never mutate the snapshot; same snapshot, same content.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod pdf;
pub mod snapshot;
pub mod ticket;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{RenderError, RenderResult};
pub use snapshot::{ClientSnapshot, CompanySnapshot, DocumentSnapshot, QuoteTerms};

/// Placeholder row rendered instead of line items when the cart is empty.
pub const EMPTY_CART_PLACEHOLDER: &str = "No hay productos agregados";

// =============================================================================
// Convenience entry points
// =============================================================================

/// Renders the A4 invoice document as paginated PDF bytes.
pub fn invoice_pdf(snapshot: &DocumentSnapshot) -> RenderResult<Vec<u8>> {
    let rows = invoice::invoice_rows(snapshot);
    pdf::render_pdf(&format!("Factura {}", snapshot.number), &rows, pdf::Paper::A4)
}

/// Renders the A4 quote document as paginated PDF bytes.
pub fn quote_pdf(snapshot: &DocumentSnapshot, terms: &QuoteTerms) -> RenderResult<Vec<u8>> {
    let rows = invoice::quote_rows(snapshot, terms);
    pdf::render_pdf("Presupuesto", &rows, pdf::Paper::A4)
}

/// Renders the 80 mm thermal ticket as PDF bytes.
pub fn ticket_pdf(snapshot: &DocumentSnapshot) -> RenderResult<Vec<u8>> {
    let rows = ticket::ticket_rows(snapshot);
    pdf::render_pdf(&format!("Ticket {}", snapshot.number), &rows, pdf::Paper::Roll80)
}

/// Renders the ticket as the plain-text payload sent to the printer.
pub fn ticket_text(snapshot: &DocumentSnapshot) -> String {
    ticket::ticket_lines(snapshot).join("\n")
}
