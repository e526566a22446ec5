//! # Sale Finalization
//!
//! The state machine that turns an in-progress cart into a committed sale.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Sale Finalizer State Machine                          │
//! │                                                                         │
//! │  Idle ──► Validating ──► Persisting ──► Documenting ──► Printing ──►   │
//! │              │               │               │              │    Done  │
//! │              │               │               │              │          │
//! │              ▼               ▼               ▼              ▼          │
//! │           Error           Error          warning        warning        │
//! │        (no writes)   (writes 1..N-1    (sale stays    (sale stays      │
//! │                       stay committed)   completed)     completed)      │
//! │                                                                         │
//! │  Persisting issues, in order, one remote write each:                   │
//! │    1. upsert client by email (skipped for walk-in sales)               │
//! │    2. insert bill                                                      │
//! │    3. insert sale (references the bill id)                             │
//! │    4. one stock-decrement update per cart line                         │
//! │                                                                         │
//! │  There is NO multi-row transaction and NO compensating rollback: a     │
//! │  failure at step N leaves steps 1..N-1 committed. The backend offers   │
//! │  no transaction surface, and this workflow does not pretend otherwise. │
//! │                                                                         │
//! │  Stock decrements are read-then-write against the CACHED stock value;  │
//! │  a concurrent sale from another window or device can race them.        │
//! │                                                                         │
//! │  No cancellation once Persisting begins.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use caja_core::billnum;
use caja_core::cart::Cart;
use caja_core::totals::compute_totals;
use caja_core::types::{Bill, PaymentMethod, SaleRecord, SaleStatus};
use caja_core::validation::ClientForm;
use caja_core::DEFAULT_TAX_RATE_PCT;
use caja_remote::session::Session;
use caja_remote::store::RemoteStore;
use caja_render::snapshot::{ClientSnapshot, DocumentSnapshot};

use crate::catalog::CatalogCache;
use crate::error::TerminalError;
use crate::printer::{select_printer, TicketPrinter};
use crate::storage::InvoiceStorage;

// =============================================================================
// Phases
// =============================================================================

/// Where the finalizer is (or was, when it failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizePhase {
    Idle,
    Validating,
    Persisting,
    Documenting,
    Printing,
    Done,
}

impl fmt::Display for FinalizePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FinalizePhase::Idle => "idle",
            FinalizePhase::Validating => "validating",
            FinalizePhase::Persisting => "persisting",
            FinalizePhase::Documenting => "documenting",
            FinalizePhase::Printing => "printing",
            FinalizePhase::Done => "done",
        };
        write!(f, "{}", label)
    }
}

/// A finalization failure, attributed to the phase that raised it.
///
/// Failures in `Validating` guarantee no remote write happened. Failures in
/// `Persisting` leave every earlier write committed.
#[derive(Debug, Error)]
#[error("sale failed while {phase}: {source}")]
pub struct FinalizeError {
    pub phase: FinalizePhase,
    pub source: TerminalError,
}

impl FinalizeError {
    fn at(phase: FinalizePhase, source: impl Into<TerminalError>) -> Self {
        FinalizeError {
            phase,
            source: source.into(),
        }
    }
}

// =============================================================================
// Checkout State
// =============================================================================

/// The point-of-sale form state: cart, client fields, payment selection and
/// the IVA rate chosen for this sale.
#[derive(Debug, Default)]
pub struct Checkout {
    pub cart: Cart,
    pub client: ClientForm,
    pub payment_method: Option<PaymentMethod>,
    pub tax_rate_pct: f64,
    pub branch: String,
}

impl Checkout {
    /// Fresh form for a branch, IVA preset to the default rate.
    pub fn new(branch: impl Into<String>) -> Self {
        Checkout {
            cart: Cart::new(),
            client: ClientForm::default(),
            payment_method: None,
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            branch: branch.into(),
        }
    }

    /// Clears everything except the selected branch (post-sale reset).
    pub fn reset(&mut self) {
        self.cart.clear();
        self.client = ClientForm::default();
        self.payment_method = None;
        self.tax_rate_pct = DEFAULT_TAX_RATE_PCT;
    }
}

/// The collaborators the finalizer drives besides the store.
pub struct Peripherals<'a> {
    pub printer: &'a dyn TicketPrinter,
    pub documents: &'a InvoiceStorage,
    /// Case-insensitive substring matched against installed printer names.
    pub preferred_printer: &'a str,
}

/// What a completed finalization reports back to the screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeOutcome {
    pub bill_id: String,
    pub bill_number: String,
    pub total: f64,
    /// Where the invoice PDF landed, when the Documenting step succeeded.
    pub invoice_path: Option<PathBuf>,
    /// Whether the ticket was accepted by a printer.
    pub printed: bool,
    /// Document/print problems on an otherwise completed sale.
    pub warnings: Vec<String>,
}

// =============================================================================
// Finalizer
// =============================================================================

/// Runs the full finalization sequence for the current checkout state.
///
/// On success the cart and client fields are cleared and the catalog cache
/// is refreshed. On a `Validating` error nothing was written; on a
/// `Persisting` error earlier writes remain committed (see module docs).
pub async fn finalize_sale(
    store: &dyn RemoteStore,
    session: &Session,
    peripherals: &Peripherals<'_>,
    catalog: &mut CatalogCache,
    checkout: &mut Checkout,
) -> Result<FinalizeOutcome, FinalizeError> {
    // ---- Validating -------------------------------------------------------
    let phase = FinalizePhase::Validating;
    debug!("validating sale");

    if checkout.cart.is_empty() {
        return Err(FinalizeError::at(phase, TerminalError::EmptyCart));
    }
    let payment_method = checkout
        .payment_method
        .clone()
        .ok_or_else(|| FinalizeError::at(phase, TerminalError::MissingPaymentMethod))?;

    // Re-check every line against the stock currently in the cache. The
    // cache may have been refreshed since the line was added, so this can
    // catch a sale from another session - within the staleness window.
    for line in checkout.cart.lines() {
        let current_stock = catalog.product(&line.product_id).map(|p| p.stock);
        match current_stock {
            Some(stock) if line.quantity <= stock => {}
            _ => {
                return Err(FinalizeError::at(
                    phase,
                    TerminalError::InsufficientStock {
                        name: line.name.clone(),
                    },
                ));
            }
        }
    }

    // ---- Persisting -------------------------------------------------------
    let phase = FinalizePhase::Persisting;
    let number = billnum::generate();
    let now = Utc::now();
    let items = checkout.cart.snapshot();
    let totals = compute_totals(&items, checkout.tax_rate_pct);
    let client = ClientSnapshot::for_sale(&checkout.client.name, &checkout.client.email);
    let document_ref = format!("factura-{}.pdf", number);

    info!(bill = %number, total = totals.total, items = items.len(), "persisting sale");

    if !checkout.client.is_walk_in() {
        checkout
            .client
            .validate()
            .map_err(|e| FinalizeError::at(phase, e))?;
        store
            .upsert_client_by_email(
                &session.user_id,
                checkout.client.name.trim(),
                checkout.client.email.trim(),
                &checkout.branch,
            )
            .await
            .map_err(|e| FinalizeError::at(phase, e))?;
    }

    let bill = Bill {
        id: Uuid::new_v4().to_string(),
        owner_id: session.user_id.clone(),
        number: number.clone(),
        client_name: client.name.clone(),
        client_email: client.email.clone(),
        items: items.clone(),
        subtotal: totals.subtotal,
        tax_rate_pct: totals.tax_rate_pct,
        tax_amount: totals.tax_amount,
        total: totals.total,
        branch: checkout.branch.clone(),
        payment_method: payment_method.clone(),
        status: SaleStatus::Completed,
        document_ref: document_ref.clone(),
        created_at: now,
    };
    store
        .insert_bill(&bill)
        .await
        .map_err(|e| FinalizeError::at(phase, e))?;

    let sale = SaleRecord {
        id: Uuid::new_v4().to_string(),
        owner_id: session.user_id.clone(),
        number: number.clone(),
        client_name: client.name.clone(),
        client_email: client.email.clone(),
        items: items.clone(),
        total: totals.total,
        bill_id: bill.id.clone(),
        branch: checkout.branch.clone(),
        payment_method: payment_method.clone(),
        status: SaleStatus::Completed,
        document_ref: document_ref.clone(),
        created_at: now,
    };
    store
        .insert_sale(&sale)
        .await
        .map_err(|e| FinalizeError::at(phase, e))?;

    // One plain write per line: cached stock minus quantity sold.
    for line in checkout.cart.lines() {
        let cached_stock = catalog
            .product(&line.product_id)
            .map(|p| p.stock)
            .unwrap_or(line.stock_ceiling);
        store
            .update_stock(
                &session.user_id,
                &line.product_id,
                cached_stock - line.quantity,
            )
            .await
            .map_err(|e| FinalizeError::at(phase, e))?;
    }

    // From here on the sale IS completed; document and print problems are
    // surfaced as warnings, never as a rollback.
    let mut warnings = Vec::new();

    // ---- Documenting ------------------------------------------------------
    debug!(bill = %number, "rendering invoice document");
    let snapshot = DocumentSnapshot {
        number: number.clone(),
        issued_at: now,
        company: catalog.company_snapshot(),
        client,
        lines: items,
        totals,
        payment_method: payment_method.to_string(),
    };

    let invoice_path = match caja_render::invoice_pdf(&snapshot) {
        Ok(bytes) => match peripherals.documents.write_document(&document_ref, &bytes) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(bill = %number, error = %e, "invoice could not be saved");
                warnings.push(format!("The invoice could not be saved: {}", e));
                None
            }
        },
        Err(e) => {
            warn!(bill = %number, error = %e, "invoice could not be rendered");
            warnings.push(format!("The invoice could not be rendered: {}", e));
            None
        }
    };

    // ---- Printing ---------------------------------------------------------
    let payload = caja_render::ticket_text(&snapshot);
    let printer_name = select_printer(
        &peripherals.printer.list_printers(),
        peripherals.preferred_printer,
    );
    let printed = match peripherals
        .printer
        .print(printer_name.as_deref(), payload.as_bytes())
    {
        Ok(()) => true,
        Err(e) => {
            warn!(bill = %number, error = %e, "ticket could not be printed");
            warnings.push(format!("The ticket could not be printed: {}", e));
            false
        }
    };

    // ---- Done -------------------------------------------------------------
    checkout.reset();
    if let Err(e) = catalog.refresh(store, &session.user_id).await {
        warn!(error = %e, "catalog refresh after sale failed");
        warnings.push(format!("The product list could not be refreshed: {}", e));
    }

    info!(bill = %number, total = totals.total, printed, "sale completed");

    Ok(FinalizeOutcome {
        bill_id: bill.id,
        bill_number: number,
        total: totals.total,
        invoice_path,
        printed,
        warnings,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
// End-to-end coverage (happy path, partial failure, print failure) lives in
// tests/sale_flow.rs; these cover the precondition edge of the machine.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::LogPrinter;
    use caja_remote::memory::MemoryStore;
    use caja_remote::store::{BillStore, SaleStore};

    fn session() -> Session {
        Session {
            user_id: "owner-1".to_string(),
            email: "dueño@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_cart_issues_no_remote_write() {
        let store = MemoryStore::new();
        let mut catalog = CatalogCache::load(&store, "owner-1").await.unwrap();
        let mut checkout = Checkout::new("Centro");
        checkout.payment_method = Some(PaymentMethod::Cash);

        let printer = LogPrinter::default();
        let dir = tempfile::tempdir().unwrap();
        let documents = InvoiceStorage::at(dir.path());
        let peripherals = Peripherals {
            printer: &printer,
            documents: &documents,
            preferred_printer: "xprinter",
        };

        let err = finalize_sale(&store, &session(), &peripherals, &mut catalog, &mut checkout)
            .await
            .unwrap_err();

        assert_eq!(err.phase, FinalizePhase::Validating);
        assert!(matches!(err.source, TerminalError::EmptyCart));
        assert!(store.list_bills("owner-1").await.unwrap().is_empty());
        assert!(store.list_sales("owner-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_payment_method_aborts_before_writes() {
        use caja_core::types::Product;
        use caja_remote::store::ProductStore;
        use chrono::Utc;

        let store = MemoryStore::new();
        let now = Utc::now();
        let product = Product {
            id: "p1".to_string(),
            owner_id: "owner-1".to_string(),
            barcode: "111".to_string(),
            name: "Yerba".to_string(),
            description: String::new(),
            stock: 5,
            category: "General".to_string(),
            branch: "Centro".to_string(),
            tax_rate_pct: 21.0,
            price_cost: 10.0,
            price_sale: 20.0,
            created_at: now,
            updated_at: now,
        };
        store.insert_product(&product).await.unwrap();

        let mut catalog = CatalogCache::load(&store, "owner-1").await.unwrap();
        let mut checkout = Checkout::new("Centro");
        checkout.cart.add_line(&product).unwrap();

        let printer = LogPrinter::default();
        let dir = tempfile::tempdir().unwrap();
        let documents = InvoiceStorage::at(dir.path());
        let peripherals = Peripherals {
            printer: &printer,
            documents: &documents,
            preferred_printer: "xprinter",
        };

        let err = finalize_sale(&store, &session(), &peripherals, &mut catalog, &mut checkout)
            .await
            .unwrap_err();

        assert_eq!(err.phase, FinalizePhase::Validating);
        assert!(matches!(err.source, TerminalError::MissingPaymentMethod));
        assert!(store.list_bills("owner-1").await.unwrap().is_empty());
        // The cart survives a validation failure.
        assert_eq!(checkout.cart.len(), 1);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(FinalizePhase::Persisting.to_string(), "persisting");
        let err = FinalizeError::at(FinalizePhase::Validating, TerminalError::EmptyCart);
        assert_eq!(
            err.to_string(),
            "sale failed while validating: Add products before continuing"
        );
    }
}
