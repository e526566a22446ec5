//! # caja-terminal: The POS Workflow Layer
//!
//! Wires the pure logic (`caja-core`), the remote collaborators
//! (`caja-remote`) and the document layer (`caja-render`) into the
//! point-of-sale workflows: selling, quoting, and managing products,
//! clients and the company record.
//!
//! ## Module Organization
//! ```text
//! caja_terminal/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── catalog.rs      ◄─── Catalog cache loaded at page load
//! ├── checkout.rs     ◄─── Sale finalizer state machine
//! ├── quote.rs        ◄─── Quote builder (no persistence)
//! ├── inventory.rs    ◄─── Product CRUD + stock adjustment
//! ├── directory.rs    ◄─── Clients, company, owner registration
//! ├── printer.rs      ◄─── Ticket printer collaborator
//! ├── storage.rs      ◄─── "Facturas" folder resolution + writes
//! └── error.rs        ◄─── TerminalError
//! ```
//!
//! ## One workflow at a time
//! A terminal runs a single active workflow per window: remote round trips
//! are awaited sequentially and the triggering control is expected to stay
//! disabled until the workflow returns. Nothing here prevents a second
//! window or device from racing the same product's stock - see the notes
//! on `checkout`.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod directory;
pub mod error;
pub mod inventory;
pub mod printer;
pub mod quote;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogCache;
pub use checkout::{
    finalize_sale, Checkout, FinalizeError, FinalizeOutcome, FinalizePhase, Peripherals,
};
pub use error::TerminalError;
pub use printer::{LogPrinter, PrintError, PrinterInfo, TicketPrinter};
pub use quote::QuoteBuilder;
pub use storage::InvoiceStorage;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - `RUST_LOG=caja=trace` - trace for caja crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,caja=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
