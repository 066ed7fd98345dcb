//! Client registry rules: first client created becomes the default,
//! electing a new default unsets the previous one, deleting the default
//! promotes a survivor, and an empty registry falls back to a fixed
//! synthesized identity.

use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::PortalError;
use crate::model::Client;
use crate::store::Store;

/// Identity used when no client record exists at all.
pub const FALLBACK_CLIENT_NAME: &str = "Newchecks Solutions Pvt. Ltd";
pub const FALLBACK_CLIENT_ADDRESS: &str =
    "#428, 2nd floor 8th block Koramangala, Bangalore, Karnataka- 560095";

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClient {
    #[schema(example = "Newchecks Solutions Pvt. Ltd")]
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub is_default: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_default: Option<bool>,
}

pub fn fallback_client() -> Client {
    let now = Utc::now().naive_utc();
    Client {
        id: Uuid::new_v4().to_string(),
        name: FALLBACK_CLIENT_NAME.to_string(),
        address: FALLBACK_CLIENT_ADDRESS.to_string(),
        contact_person: String::new(),
        email: String::new(),
        phone: String::new(),
        is_default: true,
        created_at: now,
        updated_at: now,
    }
}

/// Seed the fixed default client when the registry is empty, so the admin
/// screen always has at least one selectable client.
pub async fn seed_default_if_empty<S: Store>(store: &S) -> Result<(), PortalError> {
    if store.count_clients().await? == 0 {
        store.insert_client(&fallback_client()).await?;
    }
    Ok(())
}

pub async fn create_client<S: Store>(
    store: &S,
    mut input: NewClient,
) -> Result<Client, PortalError> {
    if input.name.trim().is_empty() {
        return Err(PortalError::Validation("Client name is required".into()));
    }

    // The first client ever created is the default regardless of input.
    if store.count_clients().await? == 0 {
        input.is_default = true;
    }
    if input.is_default {
        store.clear_default_flags().await?;
    }

    let now = Utc::now().naive_utc();
    let client = Client {
        id: Uuid::new_v4().to_string(),
        name: input.name.trim().to_string(),
        address: input.address,
        contact_person: input.contact_person,
        email: input.email,
        phone: input.phone,
        is_default: input.is_default,
        created_at: now,
        updated_at: now,
    };
    store.insert_client(&client).await?;
    Ok(client)
}

/// Partial update. Electing a client as default unsets the previous one
/// first. `isDefault: false` on the current default is ignored — the
/// default changes by electing a successor, never by vacating the seat.
pub async fn update_client<S: Store>(
    store: &S,
    id: &str,
    patch: ClientPatch,
) -> Result<Client, PortalError> {
    let mut client = store
        .find_client(id)
        .await?
        .ok_or(PortalError::ClientNotFound)?;

    if let Some(name) = patch.name {
        if name.trim().is_empty() {
            return Err(PortalError::Validation("Client name is required".into()));
        }
        client.name = name.trim().to_string();
    }
    if let Some(address) = patch.address {
        client.address = address;
    }
    if let Some(contact_person) = patch.contact_person {
        client.contact_person = contact_person;
    }
    if let Some(email) = patch.email {
        client.email = email;
    }
    if let Some(phone) = patch.phone {
        client.phone = phone;
    }
    if patch.is_default == Some(true) && !client.is_default {
        store.clear_default_flags().await?;
        client.is_default = true;
    }

    client.updated_at = Utc::now().naive_utc();
    store.update_client(&client).await?;
    Ok(client)
}

/// Delete a client; if it was the default and others remain, promote one.
pub async fn delete_client<S: Store>(store: &S, id: &str) -> Result<(), PortalError> {
    let client = store
        .find_client(id)
        .await?
        .ok_or(PortalError::ClientNotFound)?;

    store.delete_client(id).await?;

    if client.is_default {
        if let Some(survivor) = store.any_client().await? {
            store.set_default_flag(&survivor.id).await?;
        }
    }
    Ok(())
}

/// Client resolution for payslip assembly: the explicit reference, then
/// the default client, then any client, then the synthesized fallback.
pub async fn resolve_for_payslip<S: Store>(
    store: &S,
    client_id: Option<&str>,
) -> Result<Client, PortalError> {
    if let Some(id) = client_id.filter(|id| !id.is_empty()) {
        if let Some(client) = store.find_client(id).await? {
            return Ok(client);
        }
    }
    if let Some(client) = store.default_client().await? {
        return Ok(client);
    }
    if let Some(client) = store.any_client().await? {
        return Ok(client);
    }
    Ok(fallback_client())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem::MemStore;

    async fn default_count(store: &MemStore) -> usize {
        let (clients, _) = store.list_clients("", 1, 100).await.unwrap();
        clients.iter().filter(|c| c.is_default).count()
    }

    fn named(name: &str, is_default: bool) -> NewClient {
        NewClient {
            name: name.to_string(),
            is_default,
            ..NewClient::default()
        }
    }

    #[actix_web::test]
    async fn first_client_becomes_default() {
        let store = MemStore::default();
        let first = create_client(&store, named("Acme", false)).await.unwrap();
        assert!(first.is_default);
        assert_eq!(default_count(&store).await, 1);
    }

    #[actix_web::test]
    async fn electing_a_new_default_unsets_the_previous() {
        let store = MemStore::default();
        let first = create_client(&store, named("Acme", false)).await.unwrap();
        let second = create_client(&store, named("Globex", true)).await.unwrap();

        assert!(second.is_default);
        let refreshed = store.find_client(&first.id).await.unwrap().unwrap();
        assert!(!refreshed.is_default);
        assert_eq!(default_count(&store).await, 1);
    }

    #[actix_web::test]
    async fn patching_a_new_default_keeps_the_invariant() {
        let store = MemStore::default();
        let a = create_client(&store, named("A", false)).await.unwrap();
        let b = create_client(&store, named("B", false)).await.unwrap();

        fn elect() -> ClientPatch {
            ClientPatch {
                is_default: Some(true),
                ..ClientPatch::default()
            }
        }

        update_client(&store, &b.id, elect()).await.unwrap();
        assert_eq!(default_count(&store).await, 1);
        assert!(store.find_client(&b.id).await.unwrap().unwrap().is_default);

        update_client(&store, &a.id, elect()).await.unwrap();
        assert_eq!(default_count(&store).await, 1);
        assert!(store.find_client(&a.id).await.unwrap().unwrap().is_default);
    }

    #[actix_web::test]
    async fn deleting_the_default_promotes_a_survivor() {
        let store = MemStore::default();
        let a = create_client(&store, named("A", false)).await.unwrap();
        create_client(&store, named("B", false)).await.unwrap();
        assert!(store.find_client(&a.id).await.unwrap().unwrap().is_default);

        delete_client(&store, &a.id).await.unwrap();
        assert_eq!(default_count(&store).await, 1);
    }

    #[actix_web::test]
    async fn deleting_the_last_client_leaves_zero_defaults() {
        let store = MemStore::default();
        let only = create_client(&store, named("A", false)).await.unwrap();
        delete_client(&store, &only.id).await.unwrap();
        assert_eq!(default_count(&store).await, 0);
        assert_eq!(store.count_clients().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn unsetting_the_default_directly_is_ignored() {
        let store = MemStore::default();
        let only = create_client(&store, named("A", false)).await.unwrap();
        let patch = ClientPatch {
            is_default: Some(false),
            ..ClientPatch::default()
        };
        let updated = update_client(&store, &only.id, patch).await.unwrap();
        assert!(updated.is_default);
        assert_eq!(default_count(&store).await, 1);
    }

    #[actix_web::test]
    async fn seed_runs_once() {
        let store = MemStore::default();
        seed_default_if_empty(&store).await.unwrap();
        seed_default_if_empty(&store).await.unwrap();
        assert_eq!(store.count_clients().await.unwrap(), 1);
        let seeded = store.default_client().await.unwrap().unwrap();
        assert_eq!(seeded.name, FALLBACK_CLIENT_NAME);
    }

    #[actix_web::test]
    async fn resolution_falls_back_in_order() {
        let store = MemStore::default();

        // Empty registry: synthesized identity.
        let resolved = resolve_for_payslip(&store, None).await.unwrap();
        assert_eq!(resolved.name, FALLBACK_CLIENT_NAME);
        assert_eq!(resolved.address, FALLBACK_CLIENT_ADDRESS);

        // Default exists: picked over a dangling reference.
        let a = create_client(&store, named("A", false)).await.unwrap();
        let resolved = resolve_for_payslip(&store, Some("missing-id")).await.unwrap();
        assert_eq!(resolved.id, a.id);

        // Explicit reference wins when it resolves.
        let b = create_client(&store, named("B", false)).await.unwrap();
        let resolved = resolve_for_payslip(&store, Some(&b.id)).await.unwrap();
        assert_eq!(resolved.id, b.id);
    }

    #[actix_web::test]
    async fn blank_names_are_rejected() {
        let store = MemStore::default();
        assert!(create_client(&store, named("   ", false)).await.is_err());
    }
}
