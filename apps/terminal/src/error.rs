//! # Terminal Error Type
//!
//! Unified error for the workflow layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in Caja                                 │
//! │                                                                         │
//! │  caja-core         CartError / ValidationError ──┐                     │
//! │  caja-remote       StoreError / AuthError ───────┤                     │
//! │  caja-render       RenderError ──────────────────┼──► TerminalError    │
//! │  collaborators     PrintError / io::Error ───────┘         │           │
//! │                                                            ▼           │
//! │  Workflow preconditions (EmptyCart, MissingPaymentMethod, ...)         │
//! │  are raised directly as TerminalError variants.                        │
//! │                                                                         │
//! │  Everything renders as a human-readable string; there is no            │
//! │  structured error-code surface.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use caja_core::error::{CartError, ValidationError};
use caja_remote::error::{AuthError, StoreError};
use caja_render::error::RenderError;

use crate::printer::PrintError;

/// What the workflow layer surfaces to the operator.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Barcode lookup found nothing in the catalog cache.
    #[error("Product not found: {barcode}")]
    ProductNotFound { barcode: String },

    /// The scanned product exists but belongs to another branch.
    #[error("{name} belongs to another branch")]
    WrongBranch { name: String },

    /// A document was requested before company data was configured.
    #[error("Company data is not configured")]
    MissingCompany,

    /// Finalization was triggered with an empty cart.
    #[error("Add products before continuing")]
    EmptyCart,

    /// Finalization was triggered without a payment method.
    #[error("Select a payment method")]
    MissingPaymentMethod,

    /// A line asks for more units than the cached stock allows.
    #[error("Insufficient stock for {name}")]
    InsufficientStock { name: String },
}

/// Convenience alias for terminal results.
pub type TerminalResult<T> = Result<T, TerminalError>;

// =============================================================================
// Unit Tests
// =============================================================================
