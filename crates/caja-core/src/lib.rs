//! # caja-core: Pure Business Logic for Caja
//!
//! This crate is the heart of the Caja point-of-sale system. It contains all
//! business logic as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Caja Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/terminal                                │   │
//! │  │   Catalog Cache ──► Cart ──► Finalizer ──► Documents/Printer   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ caja-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │  totals   │  │ validation│  │   │
//! │  │   │  Product  │  │   Cart    │  │ subtotal  │  │   forms   │  │   │
//! │  │   │   Bill    │  │ CartLine  │  │ tax/total │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO REMOTE STORE • NO PRINTER • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            caja-remote / caja-render (I/O layers)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, Client, Bill, Sale, ...)
//! - [`cart`] - The in-progress sale: lines with stock ceilings
//! - [`totals`] - Subtotal / tax / total arithmetic
//! - [`billnum`] - Bill-number composition
//! - [`validation`] - Typed form records with validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: remote store, filesystem and printer access is FORBIDDEN here
//! 3. **Explicit Errors**: all failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billnum;
pub mod cart;
pub mod error;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caja_core::Cart` instead of
// `use caja_core::cart::Cart`

pub use cart::{Cart, CartLine};
pub use error::{CartError, CoreError, ValidationError};
pub use totals::Totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default IVA percentage preselected for a new sale or quote.
///
/// The point-of-sale form starts at the general Argentine IVA rate and the
/// operator can override it per sale (0-100).
pub const DEFAULT_TAX_RATE_PCT: f64 = 21.0;

/// Client name recorded on a bill when no client details were entered.
pub const WALK_IN_CLIENT: &str = "Consumidor Final";
