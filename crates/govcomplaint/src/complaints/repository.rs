use crate::accounts::ActorId;

use super::domain::{Complaint, ComplaintDraft, ComplaintFilter, ComplaintId};

/// Complaint-store contract. Implementations must make `insert` atomic
/// (either the full record with its new id is visible or nothing is) and
/// replace whole records on `update` so status, response, and `updated_at`
/// stay mutually consistent. Listing order is store-defined but must be
/// stable for a given store state.
pub trait ComplaintStore: Send + Sync {
    fn insert(&self, draft: ComplaintDraft) -> Result<Complaint, RepositoryError>;
    fn update(&self, complaint: Complaint) -> Result<(), RepositoryError>;
    fn find_by_id(&self, id: ComplaintId) -> Result<Option<Complaint>, RepositoryError>;
    fn find_by_citizen(&self, citizen: &ActorId) -> Result<Vec<Complaint>, RepositoryError>;
    fn find_by_agency(
        &self,
        agency: &ActorId,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("complaint store unavailable: {0}")]
    Unavailable(String),
}
