use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::accounts::domain::{Actor, ActorId};
use crate::accounts::password::{CredentialHasher, PasswordHashError};
use crate::accounts::repository::{IdentityError, IdentityStore};
use crate::accounts::service::AccountService;

/// In-memory identity store with the email-uniqueness backstop.
#[derive(Default)]
pub(super) struct MemoryIdentityStore {
    actors: Mutex<BTreeMap<ActorId, Actor>>,
}

impl IdentityStore for MemoryIdentityStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Actor>, IdentityError> {
        let guard = self.actors.lock().expect("identity mutex poisoned");
        Ok(guard.values().find(|actor| actor.email == email).cloned())
    }

    fn find_by_id(&self, id: &ActorId) -> Result<Option<Actor>, IdentityError> {
        let guard = self.actors.lock().expect("identity mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, IdentityError> {
        let guard = self.actors.lock().expect("identity mutex poisoned");
        Ok(guard.values().any(|actor| actor.email == email))
    }

    fn insert(&self, actor: Actor) -> Result<Actor, IdentityError> {
        let mut guard = self.actors.lock().expect("identity mutex poisoned");
        if guard.values().any(|existing| existing.email == actor.email) {
            return Err(IdentityError::Conflict);
        }
        guard.insert(actor.id, actor.clone());
        Ok(actor)
    }

    fn agencies(&self) -> Result<Vec<Actor>, IdentityError> {
        let guard = self.actors.lock().expect("identity mutex poisoned");
        Ok(guard
            .values()
            .filter(|actor| actor.categories().is_some())
            .cloned()
            .collect())
    }
}

/// Deterministic hasher so account tests stay fast; the real Argon2 scheme
/// has its own coverage in `service.rs`.
pub(super) struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain${plaintext}"))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordHashError> {
        Ok(digest == format!("plain${plaintext}"))
    }
}

pub(super) fn build_service() -> (
    Arc<AccountService<MemoryIdentityStore, PlainHasher>>,
    Arc<MemoryIdentityStore>,
) {
    let store = Arc::new(MemoryIdentityStore::default());
    let service = Arc::new(AccountService::new(store.clone(), Arc::new(PlainHasher)));
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
