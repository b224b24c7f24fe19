use govcomplaint::accounts::{Actor, ActorId, IdentityError, IdentityStore};
use govcomplaint::complaints::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintStore, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Identity store backed by a single locked map. The lock makes inserts
/// atomic and keeps the email-uniqueness backstop race-free.
#[derive(Default, Clone)]
pub(crate) struct InMemoryIdentityStore {
    actors: Arc<Mutex<BTreeMap<ActorId, Actor>>>,
}

impl IdentityStore for InMemoryIdentityStore {
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

/// Complaint store with a monotonic id sequence; every operation takes the
/// lock once, so updates replace whole records and listings reflect a single
/// consistent snapshot in id order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryComplaintStore {
    records: Arc<Mutex<ComplaintRecords>>,
}

#[derive(Default)]
struct ComplaintRecords {
    next_id: u64,
    by_id: BTreeMap<u64, Complaint>,
}

impl ComplaintStore for InMemoryComplaintStore {
    fn insert(&self, draft: ComplaintDraft) -> Result<Complaint, RepositoryError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        guard.next_id += 1;
        let complaint = draft.into_complaint(ComplaintId(guard.next_id));
        guard.by_id.insert(complaint.id.0, complaint.clone());
        Ok(complaint)
    }

    fn update(&self, complaint: Complaint) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        if guard.by_id.contains_key(&complaint.id.0) {
            guard.by_id.insert(complaint.id.0, complaint);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn find_by_id(&self, id: ComplaintId) -> Result<Option<Complaint>, RepositoryError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard.by_id.get(&id.0).cloned())
    }

    fn find_by_citizen(&self, citizen: &ActorId) -> Result<Vec<Complaint>, RepositoryError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard
            .by_id
            .values()
            .filter(|complaint| &complaint.citizen_id == citizen)
            .cloned()
            .collect())
    }

    fn find_by_agency(
        &self,
        agency: &ActorId,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard
            .by_id
            .values()
            .filter(|complaint| &complaint.agency_id == agency && filter.matches(complaint))
            .cloned()
            .collect())
    }
}
