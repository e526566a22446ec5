//! # In-Process Backend
//!
//! `Mutex`-backed implementations of the store and auth traits, used by unit
//! and integration tests and by the demo binary. Behaves like the hosted
//! backend where it matters:
//!
//! - every operation is scoped by owner id
//! - barcode is unique per owner, client email is the upsert key
//! - `update_stock` is a plain overwrite with NO floor check - the
//!   stock-never-negative invariant is enforced client-side, and two
//!   concurrent writers can race exactly like against the real service

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use caja_core::types::{Bill, Client, Company, Product, Profile, SaleRecord};

use crate::error::{AuthError, StoreError, StoreResult};
use crate::session::{AuthClient, Session};
use crate::store::{
    BillStore, ClientStore, CompanyStore, ProductStore, ProfileStore, SaleStore,
};

// =============================================================================
// Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    clients: Vec<Client>,
    companys: Vec<Company>,
    bills: Vec<Bill>,
    sales: Vec<SaleRecord>,
    profiles: Vec<Profile>,
}

/// In-process row store mirroring the hosted per-entity collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_stock_updates: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: makes every subsequent `update_stock` call fail, to
    /// exercise the partial-failure path of sale finalization.
    pub fn fail_stock_updates(&self, fail: bool) {
        self.fail_stock_updates.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store mutex poisoned")
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self, owner_id: &str) -> StoreResult<Vec<Product>> {
        let tables = self.lock();
        Ok(tables
            .products
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_product_by_barcode(
        &self,
        owner_id: &str,
        barcode: &str,
    ) -> StoreResult<Option<Product>> {
        let tables = self.lock();
        Ok(tables
            .products
            .iter()
            .find(|p| p.owner_id == owner_id && p.barcode == barcode)
            .cloned())
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        let mut tables = self.lock();
        let duplicate = tables
            .products
            .iter()
            .any(|p| p.owner_id == product.owner_id && p.barcode == product.barcode);
        if duplicate {
            return Err(StoreError::unique("barcode", &product.barcode));
        }
        debug!(id = %product.id, barcode = %product.barcode, "inserting product");
        tables.products.push(product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        let mut tables = self.lock();
        let row = tables
            .products
            .iter_mut()
            .find(|p| p.owner_id == product.owner_id && p.id == product.id)
            .ok_or_else(|| StoreError::not_found("Product", &product.id))?;
        *row = product.clone();
        Ok(())
    }

    async fn update_stock(&self, owner_id: &str, product_id: &str, stock: i64) -> StoreResult<()> {
        if self.fail_stock_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("stock update rejected".to_string()));
        }
        let mut tables = self.lock();
        let row = tables
            .products
            .iter_mut()
            .find(|p| p.owner_id == owner_id && p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;
        row.stock = stock;
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_product(&self, owner_id: &str, product_id: &str) -> StoreResult<()> {
        let mut tables = self.lock();
        let before = tables.products.len();
        tables
            .products
            .retain(|p| !(p.owner_id == owner_id && p.id == product_id));
        if tables.products.len() == before {
            return Err(StoreError::not_found("Product", product_id));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn list_clients(&self, owner_id: &str) -> StoreResult<Vec<Client>> {
        let tables = self.lock();
        Ok(tables
            .clients
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn upsert_client_by_email(
        &self,
        owner_id: &str,
        name: &str,
        email: &str,
        branch: &str,
    ) -> StoreResult<Client> {
        let mut tables = self.lock();
        if let Some(existing) = tables
            .clients
            .iter_mut()
            .find(|c| c.owner_id == owner_id && c.email == email)
        {
            existing.name = name.to_string();
            existing.branch = branch.to_string();
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            branch: branch.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn update_client(&self, client: &Client) -> StoreResult<()> {
        let mut tables = self.lock();
        let row = tables
            .clients
            .iter_mut()
            .find(|c| c.owner_id == client.owner_id && c.id == client.id)
            .ok_or_else(|| StoreError::not_found("Client", &client.id))?;
        *row = client.clone();
        Ok(())
    }

    async fn delete_client(&self, owner_id: &str, client_id: &str) -> StoreResult<()> {
        let mut tables = self.lock();
        let before = tables.clients.len();
        tables
            .clients
            .retain(|c| !(c.owner_id == owner_id && c.id == client_id));
        if tables.clients.len() == before {
            return Err(StoreError::not_found("Client", client_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn fetch_company(&self, owner_id: &str) -> StoreResult<Option<Company>> {
        let tables = self.lock();
        Ok(tables
            .companys
            .iter()
            .find(|c| c.owner_id == owner_id)
            .cloned())
    }

    async fn upsert_company(&self, company: &Company) -> StoreResult<()> {
        let mut tables = self.lock();
        if let Some(existing) = tables
            .companys
            .iter_mut()
            .find(|c| c.owner_id == company.owner_id)
        {
            *existing = company.clone();
        } else {
            tables.companys.push(company.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl BillStore for MemoryStore {
    async fn insert_bill(&self, bill: &Bill) -> StoreResult<()> {
        debug!(number = %bill.number, total = bill.total, "inserting bill");
        self.lock().bills.push(bill.clone());
        Ok(())
    }

    async fn list_bills(&self, owner_id: &str) -> StoreResult<Vec<Bill>> {
        let tables = self.lock();
        let mut bills: Vec<Bill> = tables
            .bills
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect();
        bills.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bills)
    }
}

#[async_trait]
impl SaleStore for MemoryStore {
    async fn insert_sale(&self, sale: &SaleRecord) -> StoreResult<()> {
        debug!(number = %sale.number, bill_id = %sale.bill_id, "inserting sale");
        self.lock().sales.push(sale.clone());
        Ok(())
    }

    async fn list_sales(&self, owner_id: &str) -> StoreResult<Vec<SaleRecord>> {
        let tables = self.lock();
        let mut sales: Vec<SaleRecord> = tables
            .sales
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sales)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn insert_profile(&self, profile: &Profile) -> StoreResult<()> {
        let mut tables = self.lock();
        if tables.profiles.iter().any(|p| p.id == profile.id) {
            return Err(StoreError::unique("profile id", &profile.id));
        }
        tables.profiles.push(profile.clone());
        Ok(())
    }

    async fn fetch_profile(&self, profile_id: &str) -> StoreResult<Option<Profile>> {
        let tables = self.lock();
        Ok(tables.profiles.iter().find(|p| p.id == profile_id).cloned())
    }
}

// =============================================================================
// Memory Auth
// =============================================================================

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    password: String,
}

/// In-process [`AuthClient`] for tests and the demo binary.
#[derive(Debug)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    tx: watch::Sender<Option<Session>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        MemoryAuth {
            accounts: Mutex::new(HashMap::new()),
            tx,
        }
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClient for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut accounts = self.accounts.lock().expect("auth mutex poisoned");
        if accounts.contains_key(email) {
            return Err(AuthError::EmailTaken {
                email: email.to_string(),
            });
        }
        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            password: password.to_string(),
        };
        let session = Session {
            user_id: account.user_id.clone(),
            email: email.to_string(),
        };
        accounts.insert(email.to_string(), account);
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self.accounts.lock().expect("auth mutex poisoned");
        let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;
        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        let session = Session {
            user_id: account.user_id.clone(),
            email: email.to_string(),
        };
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.tx.borrow().is_none() {
            return Err(AuthError::NotSignedIn);
        }
        self.tx.send_replace(None);
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caja_core::types::{PaymentMethod, SaleStatus};

    fn product(owner: &str, id: &str, barcode: &str, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            owner_id: owner.to_string(),
            barcode: barcode.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            stock,
            category: "General".to_string(),
            branch: "Centro".to_string(),
            tax_rate_pct: 21.0,
            price_cost: 10.0,
            price_sale: 20.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_products_are_owner_scoped() {
        let store = MemoryStore::new();
        store.insert_product(&product("a", "p1", "111", 5)).await.unwrap();
        store.insert_product(&product("b", "p2", "222", 5)).await.unwrap();

        let mine = store.list_products("a").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "p1");
        assert!(store
            .find_product_by_barcode("a", "222")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_barcode_unique_per_owner() {
        let store = MemoryStore::new();
        store.insert_product(&product("a", "p1", "111", 5)).await.unwrap();

        let err = store
            .insert_product(&product("a", "p2", "111", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        // Same barcode under another owner is fine.
        store.insert_product(&product("b", "p3", "111", 5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_stock_is_a_plain_overwrite() {
        let store = MemoryStore::new();
        store.insert_product(&product("a", "p1", "111", 5)).await.unwrap();

        store.update_stock("a", "p1", 3).await.unwrap();
        let row = store
            .find_product_by_barcode("a", "111")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.stock, 3);

        // No floor check here: the invariant lives client-side.
        store.update_stock("a", "p1", -2).await.unwrap();
        let row = store
            .find_product_by_barcode("a", "111")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.stock, -2);
    }

    #[tokio::test]
    async fn test_stock_fault_injection() {
        let store = MemoryStore::new();
        store.insert_product(&product("a", "p1", "111", 5)).await.unwrap();

        store.fail_stock_updates(true);
        assert!(store.update_stock("a", "p1", 4).await.is_err());

        store.fail_stock_updates(false);
        assert!(store.update_stock("a", "p1", 4).await.is_ok());
    }

    #[tokio::test]
    async fn test_client_upsert_by_email() {
        let store = MemoryStore::new();

        let created = store
            .upsert_client_by_email("a", "Ana", "ana@example.com", "Centro")
            .await
            .unwrap();
        let updated = store
            .upsert_client_by_email("a", "Ana María", "ana@example.com", "Norte")
            .await
            .unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.branch, "Norte");
        assert_eq!(store.list_clients("a").await.unwrap().len(), 1);

        // Different email creates a second row.
        store
            .upsert_client_by_email("a", "Bruno", "bruno@example.com", "Centro")
            .await
            .unwrap();
        assert_eq!(store.list_clients("a").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bills_listed_newest_first() {
        let store = MemoryStore::new();
        for (i, number) in ["20260101001", "20260102002"].iter().enumerate() {
            let bill = Bill {
                id: format!("b{}", i),
                owner_id: "a".to_string(),
                number: number.to_string(),
                client_name: "Consumidor Final".to_string(),
                client_email: String::new(),
                items: vec![],
                subtotal: 100.0,
                tax_rate_pct: 21.0,
                tax_amount: 21.0,
                total: 121.0,
                branch: "Centro".to_string(),
                payment_method: PaymentMethod::Cash,
                status: SaleStatus::Completed,
                document_ref: format!("factura-{}.pdf", number),
                created_at: Utc::now() + chrono::Duration::seconds(i as i64),
            };
            store.insert_bill(&bill).await.unwrap();
        }

        let bills = store.list_bills("a").await.unwrap();
        assert_eq!(bills[0].number, "20260102002");
    }

    #[tokio::test]
    async fn test_auth_flow_and_notifications() {
        let auth = MemoryAuth::new();
        let mut rx = auth.subscribe();
        assert!(auth.current_session().is_none());

        let session = auth.sign_up("dueño@example.com", "secreto").await.unwrap();
        assert_eq!(auth.current_session(), Some(session.clone()));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref(), Some(&session));

        auth.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(matches!(auth.sign_out().await, Err(AuthError::NotSignedIn)));

        let again = auth.sign_in("dueño@example.com", "secreto").await.unwrap();
        assert_eq!(again.user_id, session.user_id);
        assert!(matches!(
            auth.sign_in("dueño@example.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_up("dueño@example.com", "x".repeat(8).as_str()).await,
            Err(AuthError::EmailTaken { .. })
        ));
    }
}
