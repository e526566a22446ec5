//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  caja-core errors (this file)                                          │
//! │  ├── CartError        - Stock-ceiling and line-lookup failures         │
//! │  ├── ValidationError  - Form input validation failures                 │
//! │  └── CoreError        - Umbrella over both                             │
//! │                                                                         │
//! │  caja-remote errors (separate crate)                                   │
//! │  └── StoreError       - Remote collection operation failures           │
//! │                                                                         │
//! │  apps/terminal errors                                                  │
//! │  └── TerminalError    - What the workflow layer surfaces               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Failures raised by cart operations.
///
/// Every variant corresponds to a user-visible condition on the
/// point-of-sale screen; none of them mutate the cart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// The product's cached stock is zero, nothing can be added.
    #[error("No stock available for {name}")]
    OutOfStock { name: String },

    /// The requested quantity would exceed the stock captured in the
    /// catalog cache when the line was added.
    #[error("Not enough stock for {name}: {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// No cart line carries the given identifier.
    #[error("Line not in cart: {line_id}")]
    LineNotFound { line_id: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a typed form record doesn't meet requirements.
/// Used for early validation before any remote write runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (bad barcode charset, malformed email, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for the core crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
