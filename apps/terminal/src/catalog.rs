//! # Catalog Cache
//!
//! The client-held snapshot of products, clients, branches and company data,
//! fetched from the remote store when the point-of-sale screen loads.
//! Search and barcode lookup run against this cache, never against the
//! remote store.
//!
//! ## Staleness window
//! Stock values in this cache are as fresh as the last load/refresh. Every
//! cart ceiling and the pre-write validation use these cached values, so a
//! sale committed from another terminal between refreshes is invisible
//! here. The finalizer refreshes the cache after each completed sale.

use tracing::debug;

use caja_core::types::{Client, Company, Product};
use caja_remote::error::StoreResult;
use caja_remote::store::RemoteStore;
use caja_render::snapshot::CompanySnapshot;

use crate::error::TerminalError;

/// Snapshot of the owner's catalog, loaded at page load.
#[derive(Debug, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
    clients: Vec<Client>,
    branches: Vec<String>,
    company: Option<Company>,
}

impl CatalogCache {
    /// Loads products, clients and company data for the owner.
    pub async fn load(store: &dyn RemoteStore, owner_id: &str) -> StoreResult<Self> {
        let products = store.list_products(owner_id).await?;
        let clients = store.list_clients(owner_id).await?;
        let company = store.fetch_company(owner_id).await?;
        let branches = distinct_branches(&products);

        debug!(
            products = products.len(),
            clients = clients.len(),
            branches = branches.len(),
            "catalog loaded"
        );

        Ok(CatalogCache {
            products,
            clients,
            branches,
            company,
        })
    }

    /// Re-reads products from the store (after a completed sale or an
    /// inventory edit). Clients and company data keep their loaded values.
    pub async fn refresh(&mut self, store: &dyn RemoteStore, owner_id: &str) -> StoreResult<()> {
        self.products = store.list_products(owner_id).await?;
        self.branches = distinct_branches(&self.products);
        debug!(products = self.products.len(), "catalog refreshed");
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Distinct branch names derived from the product list, load order.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    /// The branch preselected on screen: the one the company operates from.
    pub fn default_branch(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.branch.as_str())
    }

    /// Company header block for documents; empty fields when the company
    /// record was never configured.
    pub fn company_snapshot(&self) -> CompanySnapshot {
        self.company
            .as_ref()
            .map(CompanySnapshot::from)
            .unwrap_or_default()
    }

    /// Cached product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Client-side filtered search within a branch: case-insensitive name
    /// match or exact barcode match.
    pub fn search(&self, query: &str, branch: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.branch == branch)
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.barcode == query.trim()
            })
            .collect()
    }

    /// Barcode lookup for the scanner flow. Products from another branch
    /// are rejected rather than silently sold out of the wrong location.
    pub fn find_by_barcode(&self, barcode: &str, branch: &str) -> Result<&Product, TerminalError> {
        let product = self
            .products
            .iter()
            .find(|p| p.barcode == barcode)
            .ok_or_else(|| TerminalError::ProductNotFound {
                barcode: barcode.to_string(),
            })?;
        if product.branch != branch {
            return Err(TerminalError::WrongBranch {
                name: product.name.clone(),
            });
        }
        Ok(product)
    }
}

fn distinct_branches(products: &[Product]) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();
    for product in products {
        if !branches.contains(&product.branch) {
            branches.push(product.branch.clone());
        }
    }
    branches
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caja_remote::memory::MemoryStore;
    use caja_remote::store::{CompanyStore, ProductStore};
    use chrono::Utc;

    fn product(id: &str, barcode: &str, name: &str, branch: &str, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            barcode: barcode.to_string(),
            name: name.to_string(),
            description: String::new(),
            stock,
            category: "General".to_string(),
            branch: branch.to_string(),
            tax_rate_pct: 21.0,
            price_cost: 10.0,
            price_sale: 20.0,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_product(&product("p1", "111", "Yerba Mate 1kg", "Centro", 10))
            .await
            .unwrap();
        store
            .insert_product(&product("p2", "222", "Fernet 750ml", "Centro", 3))
            .await
            .unwrap();
        store
            .insert_product(&product("p3", "333", "Yerba Suave 500g", "Norte", 5))
            .await
            .unwrap();
        store
            .upsert_company(&Company {
                id: "c1".to_string(),
                owner_id: "owner-1".to_string(),
                name: "Almacén Basile".to_string(),
                address: "Avellaneda 123".to_string(),
                tax_id: "30-12345678-9".to_string(),
                email: "basile@example.com".to_string(),
                branch: "Centro".to_string(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_load_collects_distinct_branches() {
        let store = seeded_store().await;
        let catalog = CatalogCache::load(&store, "owner-1").await.unwrap();

        assert_eq!(catalog.products().len(), 3);
        assert_eq!(catalog.branches(), ["Centro", "Norte"]);
        assert_eq!(catalog.default_branch(), Some("Centro"));
    }

    #[tokio::test]
    async fn test_search_filters_by_branch_and_name() {
        let store = seeded_store().await;
        let catalog = CatalogCache::load(&store, "owner-1").await.unwrap();

        let hits = catalog.search("yerba", "Centro");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");

        // Barcode match works too.
        let hits = catalog.search("222", "Centro");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p2");

        // Empty query lists the whole branch.
        assert_eq!(catalog.search("", "Centro").len(), 2);
    }

    #[tokio::test]
    async fn test_barcode_lookup_rejects_other_branch() {
        let store = seeded_store().await;
        let catalog = CatalogCache::load(&store, "owner-1").await.unwrap();

        assert!(catalog.find_by_barcode("111", "Centro").is_ok());

        let err = catalog.find_by_barcode("333", "Centro").unwrap_err();
        assert!(matches!(err, TerminalError::WrongBranch { .. }));

        let err = catalog.find_by_barcode("999", "Centro").unwrap_err();
        assert!(matches!(err, TerminalError::ProductNotFound { .. }));
    }

    #[tokio::test]
    async fn test_refresh_rereads_products() {
        let store = seeded_store().await;
        let mut catalog = CatalogCache::load(&store, "owner-1").await.unwrap();

        store.update_stock("owner-1", "p1", 1).await.unwrap();
        assert_eq!(catalog.product("p1").unwrap().stock, 10);

        catalog.refresh(&store, "owner-1").await.unwrap();
        assert_eq!(catalog.product("p1").unwrap().stock, 1);
    }
}
