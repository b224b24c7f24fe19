use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::accounts::{Actor, ActorId, IdentityError, IdentityStore};
use crate::complaints::domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintView,
};
use crate::complaints::repository::{ComplaintStore, RepositoryError};
use crate::complaints::service::{ComplaintService, ComplaintServiceError, NewComplaint};

/// In-memory complaint store with a monotonic id sequence; listings come back
/// in id order.
#[derive(Default)]
pub(super) struct MemoryComplaintStore {
    records: Mutex<(u64, BTreeMap<u64, Complaint>)>,
}

impl ComplaintStore for MemoryComplaintStore {
    fn insert(&self, draft: ComplaintDraft) -> Result<Complaint, RepositoryError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        guard.0 += 1;
        let complaint = draft.into_complaint(ComplaintId(guard.0));
        guard.1.insert(complaint.id.0, complaint.clone());
        Ok(complaint)
    }

    fn update(&self, complaint: Complaint) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        if guard.1.contains_key(&complaint.id.0) {
            guard.1.insert(complaint.id.0, complaint);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn find_by_id(&self, id: ComplaintId) -> Result<Option<Complaint>, RepositoryError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard.1.get(&id.0).cloned())
    }

    fn find_by_citizen(&self, citizen: &ActorId) -> Result<Vec<Complaint>, RepositoryError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard
            .1
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
            .1
            .values()
            .filter(|complaint| &complaint.agency_id == agency && filter.matches(complaint))
            .cloned()
            .collect())
    }
}

/// Store double whose every operation fails, for boundary error coverage.
pub(super) struct UnavailableComplaintStore;

impl ComplaintStore for UnavailableComplaintStore {
    fn insert(&self, _draft: ComplaintDraft) -> Result<Complaint, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _complaint: Complaint) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn find_by_id(&self, _id: ComplaintId) -> Result<Option<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn find_by_citizen(&self, _citizen: &ActorId) -> Result<Vec<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn find_by_agency(
        &self,
        _agency: &ActorId,
        _filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryIdentityStore {
    actors: Mutex<BTreeMap<ActorId, Actor>>,
}

impl MemoryIdentityStore {
    pub(super) fn seed(&self, actor: Actor) -> Actor {
        self.insert(actor).expect("seed actor")
    }
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

pub(super) fn citizen(name: &str, email: &str) -> Actor {
    Actor::new_citizen(
        email.to_string(),
        "unused-digest".to_string(),
        name.to_string(),
    )
}

pub(super) fn agency(name: &str, email: &str, categories: &[&str]) -> Actor {
    Actor::new_agency(
        email.to_string(),
        "unused-digest".to_string(),
        name.to_string(),
        categories.iter().map(|label| label.to_string()).collect(),
    )
}

pub(super) struct Fixture {
    pub(super) service: Arc<ComplaintService<MemoryComplaintStore, MemoryIdentityStore>>,
    pub(super) complaints: Arc<MemoryComplaintStore>,
    pub(super) actors: Arc<MemoryIdentityStore>,
    pub(super) alice: Actor,
    pub(super) parks: Actor,
}

/// Service over fresh stores, pre-seeded with Alice and the Parks Dept
/// (categories Potholes and Litter).
pub(super) fn fixture() -> Fixture {
    let complaints = Arc::new(MemoryComplaintStore::default());
    let actors = Arc::new(MemoryIdentityStore::default());
    let alice = actors.seed(citizen("Alice", "alice@example.gov"));
    let parks = actors.seed(agency(
        "Parks Dept",
        "parks@example.gov",
        &["Potholes", "Litter"],
    ));
    let service = Arc::new(ComplaintService::new(complaints.clone(), actors.clone()));
    Fixture {
        service,
        complaints,
        actors,
        alice,
        parks,
    }
}

pub(super) fn new_complaint(
    title: &str,
    category: &str,
    citizen: &Actor,
    agency: &Actor,
) -> NewComplaint {
    NewComplaint {
        title: title.to_string(),
        description: "Observed near the east entrance.".to_string(),
        category: category.to_string(),
        citizen_id: citizen.id,
        agency_id: agency.id,
    }
}

pub(super) fn file(fixture: &Fixture, title: &str, category: &str) -> ComplaintView {
    fixture
        .service
        .create(new_complaint(title, category, &fixture.alice, &fixture.parks))
        .expect("complaint files")
}

pub(super) fn assert_forbidden(result: Result<ComplaintView, ComplaintServiceError>) {
    match result {
        Err(ComplaintServiceError::Forbidden) => {}
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
