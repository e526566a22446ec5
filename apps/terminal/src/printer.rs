//! # Ticket Printer Collaborator
//!
//! The desktop shell owns the actual print spooling; this module models what
//! the workflow needs from it: "list available printers" and "print these
//! bytes on printer X", answered with an accepted/rejected acknowledgment
//! and a reason string. Dispatch is fire-and-forget beyond that - nobody
//! waits for paper to come out.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Printer name the thermal ticket is routed to when present.
/// Matching is a case-insensitive substring test against installed printers.
pub const DEFAULT_THERMAL_PRINTER: &str = "xprinter";

// =============================================================================
// Types
// =============================================================================

/// An installed printer as reported by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterInfo {
    pub name: String,
}

/// A rejected or failed print dispatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrintError {
    #[error("printer is not available: {name}")]
    Unavailable { name: String },

    #[error("print job rejected: {reason}")]
    Rejected { reason: String },
}

/// The printer collaborator.
pub trait TicketPrinter: Send + Sync {
    /// Installed printers, possibly empty.
    fn list_printers(&self) -> Vec<PrinterInfo>;

    /// Dispatches the payload to the named printer, or to the system
    /// default when `printer` is `None`. Returns once the job is accepted
    /// or rejected; physical completion is not awaited.
    fn print(&self, printer: Option<&str>, payload: &[u8]) -> Result<(), PrintError>;
}

/// Picks the first installed printer whose name contains `preferred`
/// (case-insensitive). `None` falls back to the system default.
pub fn select_printer(printers: &[PrinterInfo], preferred: &str) -> Option<String> {
    let preferred = preferred.to_lowercase();
    printers
        .iter()
        .find(|p| p.name.to_lowercase().contains(&preferred))
        .map(|p| p.name.clone())
}

// =============================================================================
// Log Printer
// =============================================================================

/// A printer that accepts every job and logs it; used by the demo binary
/// and anywhere a physical device is absent.
#[derive(Debug, Clone, Default)]
pub struct LogPrinter {
    names: Vec<String>,
}

impl LogPrinter {
    pub fn new(names: Vec<String>) -> Self {
        LogPrinter { names }
    }
}

impl TicketPrinter for LogPrinter {
    fn list_printers(&self) -> Vec<PrinterInfo> {
        self.names
            .iter()
            .map(|name| PrinterInfo { name: name.clone() })
            .collect()
    }

    fn print(&self, printer: Option<&str>, payload: &[u8]) -> Result<(), PrintError> {
        info!(
            printer = printer.unwrap_or("<system default>"),
            bytes = payload.len(),
            "ticket dispatched"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
