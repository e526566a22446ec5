//! # Session & Auth
//!
//! The authentication collaborator and the explicit session object.
//!
//! ## No ambient auth state
//! Nothing in this system reads a global "current user". The [`AuthClient`]
//! hands out [`Session`] values and components receive the session they
//! should operate as; interested parties subscribe to a watch channel for
//! sign-in/sign-out notifications instead of polling a global.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                                  │
//! │                                                                         │
//! │  sign_in(email, pwd) ──► Session { user_id, email } ──► passed to      │
//! │                               │                          catalog load, │
//! │                               │ watch channel            finalizer,    │
//! │                               ▼                          CRUD helpers  │
//! │  subscribers see Some(session) ... then None after sign_out            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::AuthError;

// =============================================================================
// Session
// =============================================================================

/// The authenticated owner's identity, passed explicitly to every component
/// that issues owner-scoped calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Profile id - the owner scope on every remote call.
    pub user_id: String,
    /// Email the account was created with.
    pub email: String,
}

// =============================================================================
// Auth Client
// =============================================================================

/// The authentication collaborator.
///
/// The core only consumes the current user's identifier and email; token
/// handling, refresh and storage are the collaborator's business.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Creates an account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Signs an existing account in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The session currently signed in, if any.
    fn current_session(&self) -> Option<Session>;

    /// Change-notification stream: yields the new session state on every
    /// sign-in and sign-out.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
