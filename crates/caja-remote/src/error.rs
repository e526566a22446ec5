//! # Remote Error Types
//!
//! Failures surfaced by the store and auth collaborators.
//!
//! Every remote error carries a human-readable message; the workflow layer
//! surfaces these to the operator as-is (there is no structured error-code
//! protocol with the backend).

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// A failed operation against a remote entity collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No row matched the id within the owner's scope.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A unique field already holds this value within the owner's scope.
    #[error("{field} '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// The backend rejected or failed the call; message passed through.
    #[error("remote store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        StoreError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a unique-violation error.
    pub fn unique(field: &str, value: &str) -> Self {
        StoreError::UniqueViolation {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Auth Error
// =============================================================================

/// A failed operation against the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account already exists for {email}")]
    EmailTaken { email: String },

    #[error("no active session")]
    NotSignedIn,

    #[error("auth error: {0}")]
    Backend(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
