//! # caja-remote: Remote Collaborators for Caja
//!
//! This crate defines how Caja talks to its hosted backend: per-entity
//! collections scoped by the owning profile, and the authentication
//! collaborator that produces the session those calls are scoped with.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caja Data Flow                                   │
//! │                                                                         │
//! │  apps/terminal (catalog load, sale finalization, CRUD)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    caja-remote (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RemoteStore  │    │  AuthClient   │    │ MemoryStore  │  │   │
//! │  │   │  (store.rs)   │    │ (session.rs)  │    │ (memory.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ products      │    │ sign in/out   │    │ in-process   │  │   │
//! │  │   │ clients       │    │ Session       │    │ backend for  │  │   │
//! │  │   │ bills/sales   │    │ watch stream  │    │ tests/demo   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Hosted row store (per-entity collections, owner-scoped)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No transactions
//! The backend exposes plain row operations only. Multi-step workflows
//! (sale finalization) issue each write separately, and a failure partway
//! leaves earlier writes committed. That property belongs to the system and
//! is preserved here rather than hidden behind invented guarantees.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AuthError, StoreError, StoreResult};
pub use memory::{MemoryAuth, MemoryStore};
pub use session::{AuthClient, Session};
pub use store::{
    BillStore, ClientStore, CompanyStore, ProductStore, ProfileStore, RemoteStore, SaleStore,
};
