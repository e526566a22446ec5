//! # Clients, Company & Owner Registration
//!
//! The management screens around the sale itself: the client list, the
//! company settings dialog, and the sign-up path that creates the owner's
//! profile record.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use caja_core::types::{Client, Company, Profile};
use caja_core::validation::{ClientForm, CompanyForm, SignUpForm};
use caja_remote::error::StoreError;
use caja_remote::session::{AuthClient, Session};
use caja_remote::store::RemoteStore;

use crate::error::TerminalResult;

// =============================================================================
// Clients
// =============================================================================

/// All clients of the owner.
pub async fn list_clients(
    store: &dyn RemoteStore,
    session: &Session,
) -> TerminalResult<Vec<Client>> {
    Ok(store.list_clients(&session.user_id).await?)
}

/// Applies an edited form to an existing client.
pub async fn update_client(
    store: &dyn RemoteStore,
    session: &Session,
    client_id: &str,
    form: &ClientForm,
    branch: &str,
) -> TerminalResult<Client> {
    form.validate()?;

    let existing = store
        .list_clients(&session.user_id)
        .await?
        .into_iter()
        .find(|c| c.id == client_id)
        .ok_or_else(|| StoreError::not_found("Client", client_id))?;

    let updated = Client {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        branch: branch.to_string(),
        updated_at: Utc::now(),
        ..existing
    };
    store.update_client(&updated).await?;
    Ok(updated)
}

/// Deletes a client. Bills keep their snapshotted client data.
pub async fn delete_client(
    store: &dyn RemoteStore,
    session: &Session,
    client_id: &str,
) -> TerminalResult<()> {
    store.delete_client(&session.user_id, client_id).await?;
    info!(id = %client_id, "client deleted");
    Ok(())
}

// =============================================================================
// Company
// =============================================================================

/// The owner's company record, if configured.
pub async fn fetch_company(
    store: &dyn RemoteStore,
    session: &Session,
) -> TerminalResult<Option<Company>> {
    Ok(store.fetch_company(&session.user_id).await?)
}

/// Creates or replaces the owner's company record from the settings form.
pub async fn save_company(
    store: &dyn RemoteStore,
    session: &Session,
    form: &CompanyForm,
) -> TerminalResult<Company> {
    form.validate()?;

    let existing = store.fetch_company(&session.user_id).await?;
    let company = Company {
        id: existing
            .map(|c| c.id)
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        owner_id: session.user_id.clone(),
        name: form.name.trim().to_string(),
        address: form.address.trim().to_string(),
        tax_id: form.tax_id.trim().to_string(),
        email: form.email.trim().to_string(),
        branch: form.branch.trim().to_string(),
    };

    store.upsert_company(&company).await?;
    info!(name = %company.name, "company saved");
    Ok(company)
}

// =============================================================================
// Owner Registration
// =============================================================================

/// Signs a new owner up and writes their profile record.
///
/// Two separate remote calls, like everything else here: a profile-insert
/// failure after a successful sign-up leaves the account without a profile
/// row and is surfaced as-is.
pub async fn register_owner(
    auth: &dyn AuthClient,
    store: &dyn RemoteStore,
    form: &SignUpForm,
) -> TerminalResult<Session> {
    form.validate()?;

    let session = auth.sign_up(form.email.trim(), &form.password).await?;
    let profile = Profile {
        id: session.user_id.clone(),
        email: session.email.clone(),
        business_name: form.business_name.trim().to_string(),
        created_at: Utc::now(),
    };
    store.insert_profile(&profile).await?;

    info!(user = %session.user_id, "owner registered");
    Ok(session)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caja_remote::memory::{MemoryAuth, MemoryStore};
    use caja_remote::store::{ClientStore, ProfileStore};

    fn session() -> Session {
        Session {
            user_id: "owner-1".to_string(),
            email: "dueño@example.com".to_string(),
        }
    }

    fn company_form() -> CompanyForm {
        CompanyForm {
            name: "Almacén Basile".to_string(),
            address: "Avellaneda 123".to_string(),
            tax_id: "30-12345678-9".to_string(),
            email: "basile@example.com".to_string(),
            branch: "Centro".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_company_upserts_single_record() {
        let store = MemoryStore::new();

        let first = save_company(&store, &session(), &company_form())
            .await
            .unwrap();

        let mut changed = company_form();
        changed.address = "Mitre 900".to_string();
        let second = save_company(&store, &session(), &changed).await.unwrap();

        // Same record, updated in place.
        assert_eq!(first.id, second.id);
        assert_eq!(second.address, "Mitre 900");
        assert_eq!(
            fetch_company(&store, &session()).await.unwrap().unwrap().id,
            first.id
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_client() {
        let store = MemoryStore::new();
        let created = store
            .upsert_client_by_email("owner-1", "Ana", "ana@example.com", "Centro")
            .await
            .unwrap();

        let form = ClientForm {
            name: "Ana María".to_string(),
            email: "ana@example.com".to_string(),
        };
        let updated = update_client(&store, &session(), &created.id, &form, "Norte")
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.branch, "Norte");

        delete_client(&store, &session(), &created.id).await.unwrap();
        assert!(list_clients(&store, &session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_owner_creates_profile_row() {
        let store = MemoryStore::new();
        let auth = MemoryAuth::new();
        let form = SignUpForm {
            email: "dueño@example.com".to_string(),
            password: "secreto".to_string(),
            business_name: "Almacén Basile".to_string(),
        };

        let session = register_owner(&auth, &store, &form).await.unwrap();

        let profile = store
            .fetch_profile(&session.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.business_name, "Almacén Basile");
        assert_eq!(profile.email, "dueño@example.com");
    }

    #[tokio::test]
    async fn test_register_owner_rejects_invalid_form() {
        let store = MemoryStore::new();
        let auth = MemoryAuth::new();
        let form = SignUpForm {
            email: "not-an-email".to_string(),
            password: "secreto".to_string(),
            business_name: "Almacén".to_string(),
        };

        assert!(register_owner(&auth, &store, &form).await.is_err());
        assert!(auth.current_session().is_none());
    }
}
