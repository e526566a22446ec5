//! # Store Traits
//!
//! The hosted backend exposes per-entity row collections (`products`,
//! `clients`, `companys`, `bill`, `sales`, `profiles`). These traits model
//! the operations the application needs - filtered select, insert, update,
//! delete and upsert-by-unique-field - with every call scoped by the owning
//! profile id.
//!
//! ## Why one trait per collection?
//! Each workflow only touches the collections it needs; the umbrella
//! [`RemoteStore`] exists for components (catalog load, finalizer) that walk
//! several collections in sequence.
//!
//! ## Stock updates are plain writes
//! `update_stock` overwrites the stock column with a client-computed value.
//! There is no optimistic-concurrency token and no server-side atomic
//! decrement; two terminals selling the same product concurrently can race.
//! The workflow layer documents and accepts this.

use async_trait::async_trait;

use caja_core::types::{Bill, Client, Company, Product, Profile, SaleRecord};

use crate::error::StoreResult;

// =============================================================================
// Products
// =============================================================================

/// Owner-scoped access to the `products` collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products owned by the profile.
    async fn list_products(&self, owner_id: &str) -> StoreResult<Vec<Product>>;

    /// Looks a product up by its barcode within the owner's scope.
    async fn find_product_by_barcode(
        &self,
        owner_id: &str,
        barcode: &str,
    ) -> StoreResult<Option<Product>>;

    /// Inserts a new product. Fails on a duplicate barcode for the owner.
    async fn insert_product(&self, product: &Product) -> StoreResult<()>;

    /// Overwrites an existing product row.
    async fn update_product(&self, product: &Product) -> StoreResult<()>;

    /// Overwrites the stock column with a client-computed value.
    async fn update_stock(&self, owner_id: &str, product_id: &str, stock: i64) -> StoreResult<()>;

    /// Deletes a product row.
    async fn delete_product(&self, owner_id: &str, product_id: &str) -> StoreResult<()>;
}

// =============================================================================
// Clients
// =============================================================================

/// Owner-scoped access to the `clients` collection.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// All clients owned by the profile.
    async fn list_clients(&self, owner_id: &str) -> StoreResult<Vec<Client>>;

    /// Upserts a client by email match.
    ///
    /// An existing row (same owner + email) gets its name and branch
    /// updated; otherwise a new client row is created. Returns the stored
    /// client either way.
    async fn upsert_client_by_email(
        &self,
        owner_id: &str,
        name: &str,
        email: &str,
        branch: &str,
    ) -> StoreResult<Client>;

    /// Overwrites an existing client row.
    async fn update_client(&self, client: &Client) -> StoreResult<()>;

    /// Deletes a client row.
    async fn delete_client(&self, owner_id: &str, client_id: &str) -> StoreResult<()>;
}

// =============================================================================
// Company
// =============================================================================

/// Owner-scoped access to the `companys` collection (one row per owner).
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// The owner's company record, if configured.
    async fn fetch_company(&self, owner_id: &str) -> StoreResult<Option<Company>>;

    /// Inserts or replaces the owner's company record.
    async fn upsert_company(&self, company: &Company) -> StoreResult<()>;
}

// =============================================================================
// Bills & Sales
// =============================================================================

/// Owner-scoped access to the `bill` collection.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Inserts a completed bill. Bills are immutable once written.
    async fn insert_bill(&self, bill: &Bill) -> StoreResult<()>;

    /// All bills owned by the profile, newest first.
    async fn list_bills(&self, owner_id: &str) -> StoreResult<Vec<Bill>>;
}

/// Owner-scoped access to the `sales` collection.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Inserts a completed sale row referencing its bill.
    async fn insert_sale(&self, sale: &SaleRecord) -> StoreResult<()>;

    /// All sales owned by the profile, newest first.
    async fn list_sales(&self, owner_id: &str) -> StoreResult<Vec<SaleRecord>>;
}

// =============================================================================
// Profiles
// =============================================================================

/// Access to the `profiles` collection.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Inserts the profile row created at sign-up.
    async fn insert_profile(&self, profile: &Profile) -> StoreResult<()>;

    /// Fetches a profile by id.
    async fn fetch_profile(&self, profile_id: &str) -> StoreResult<Option<Profile>>;
}

// =============================================================================
// Umbrella
// =============================================================================

/// Everything the application layer needs from the backend, in one object.
pub trait RemoteStore:
    ProductStore + ClientStore + CompanyStore + BillStore + SaleStore + ProfileStore
{
}

/// Any type implementing all entity traits is a [`RemoteStore`].
impl<T> RemoteStore for T where
    T: ProductStore + ClientStore + CompanyStore + BillStore + SaleStore + ProfileStore
{
}
