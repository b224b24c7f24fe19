use std::sync::Arc;

use chrono::Utc;

use crate::accounts::{Actor, ActorId, ActorKind, IdentityError, IdentityStore};

use super::authorization::{can_file, can_update_status, AuthorizationError};
use super::domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintStatus, ComplaintView,
};
use super::repository::{ComplaintStore, RepositoryError};

/// Fields a citizen supplies when filing a complaint.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: String,
    pub citizen_id: ActorId,
    pub agency_id: ActorId,
}

/// Raw listing filter as it arrives from the boundary; the status label is
/// validated here so `InvalidStatus` stays part of the core taxonomy.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Orchestrates complaint creation, status transitions, and filtered
/// retrieval, applying the authorization rules and data invariants before
/// touching the complaint store.
pub struct ComplaintService<C, I> {
    complaints: Arc<C>,
    actors: Arc<I>,
}

impl<C, I> ComplaintService<C, I>
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    pub fn new(complaints: Arc<C>, actors: Arc<I>) -> Self {
        Self { complaints, actors }
    }

    /// File a new complaint. Persists with status `Pending`, no response, and
    /// `created_at == updated_at`. Nothing is persisted on any failure.
    ///
    /// Reference resolution and the category check run before field
    /// validation: a category the agency does not declare is rejected as
    /// `InvalidCategory` no matter what the title or description contain.
    pub fn create(&self, request: NewComplaint) -> Result<ComplaintView, ComplaintServiceError> {
        let citizen = self.resolve_citizen(&request.citizen_id)?;
        let agency = self.resolve_agency(&request.agency_id)?;
        can_file(&agency, &request.category).map_err(ComplaintServiceError::InvalidCategory)?;

        if request.title.trim().is_empty() {
            return Err(ComplaintServiceError::Validation { field: "title" });
        }
        if request.description.trim().is_empty() {
            return Err(ComplaintServiceError::Validation {
                field: "description",
            });
        }

        let now = Utc::now();
        let draft = ComplaintDraft {
            title: request.title,
            description: request.description,
            category: request.category,
            status: ComplaintStatus::Pending,
            response: None,
            citizen_id: citizen.id,
            agency_id: agency.id,
            created_at: now,
            updated_at: now,
        };
        let stored = self.complaints.insert(draft)?;
        Ok(self.project(stored)?)
    }

    /// Change a complaint's status, optionally replacing the response text.
    ///
    /// Precondition order: the complaint must exist, the acting actor must be
    /// the owning agency, and the status label must be a member of the
    /// enumeration. A rejected update leaves the record untouched. Omitting
    /// the response keeps whatever response was stored before; a status
    /// change never implicitly clears it.
    pub fn update_status(
        &self,
        id: ComplaintId,
        acting_agency_id: ActorId,
        status: &str,
        response: Option<String>,
    ) -> Result<ComplaintView, ComplaintServiceError> {
        let mut complaint = self
            .complaints
            .find_by_id(id)?
            .ok_or(ComplaintServiceError::ComplaintNotFound(id))?;

        let actor = self
            .actors
            .find_by_id(&acting_agency_id)?
            .ok_or(ComplaintServiceError::Forbidden)?;
        can_update_status(&actor, &complaint).map_err(|_| ComplaintServiceError::Forbidden)?;

        let new_status = ComplaintStatus::parse(status)
            .ok_or_else(|| ComplaintServiceError::InvalidStatus(status.to_string()))?;

        complaint.status = new_status;
        if let Some(text) = response {
            complaint.response = Some(text);
        }
        complaint.updated_at = Utc::now();

        self.complaints.update(complaint.clone())?;
        Ok(self.project(complaint)?)
    }

    /// All complaints filed by a citizen, intersected with the optional
    /// category and status filters.
    pub fn citizen_complaints(
        &self,
        citizen_id: ActorId,
        filter: ListFilter,
    ) -> Result<Vec<ComplaintView>, ComplaintServiceError> {
        let citizen = self.resolve_citizen(&citizen_id)?;
        let filter = self.parse_filter(filter)?;
        let complaints = self.complaints.find_by_citizen(&citizen.id)?;
        complaints
            .into_iter()
            .filter(|complaint| filter.matches(complaint))
            .map(|complaint| self.project(complaint).map_err(Into::into))
            .collect()
    }

    /// All complaints targeting an agency, intersected with the optional
    /// category and status filters.
    pub fn agency_complaints(
        &self,
        agency_id: ActorId,
        filter: ListFilter,
    ) -> Result<Vec<ComplaintView>, ComplaintServiceError> {
        let agency = self.resolve_agency(&agency_id)?;
        let filter = self.parse_filter(filter)?;
        let complaints = self.complaints.find_by_agency(&agency.id, &filter)?;
        complaints
            .into_iter()
            .map(|complaint| self.project(complaint).map_err(Into::into))
            .collect()
    }

    /// Fetch a single complaint projection. Read-by-id is unrestricted.
    pub fn get(&self, id: ComplaintId) -> Result<ComplaintView, ComplaintServiceError> {
        let complaint = self
            .complaints
            .find_by_id(id)?
            .ok_or(ComplaintServiceError::ComplaintNotFound(id))?;
        Ok(self.project(complaint)?)
    }

    fn resolve_citizen(&self, id: &ActorId) -> Result<Actor, ComplaintServiceError> {
        match self.actors.find_by_id(id)? {
            Some(actor) if actor.kind() == ActorKind::Citizen => Ok(actor),
            _ => Err(ComplaintServiceError::CitizenNotFound(*id)),
        }
    }

    fn resolve_agency(&self, id: &ActorId) -> Result<Actor, ComplaintServiceError> {
        match self.actors.find_by_id(id)? {
            Some(actor) if actor.kind() == ActorKind::Agency => Ok(actor),
            _ => Err(ComplaintServiceError::AgencyNotFound(*id)),
        }
    }

    fn parse_filter(&self, raw: ListFilter) -> Result<ComplaintFilter, ComplaintServiceError> {
        let status = raw
            .status
            .map(|label| {
                ComplaintStatus::parse(&label).ok_or(ComplaintServiceError::InvalidStatus(label))
            })
            .transpose()?;
        Ok(ComplaintFilter {
            category: raw.category,
            status,
        })
    }

    // Actor display data is looked up fresh on every read so renames are
    // reflected immediately; the stored record never carries a snapshot.
    fn project(&self, complaint: Complaint) -> Result<ComplaintView, IdentityError> {
        let citizen_name = self
            .actors
            .find_by_id(&complaint.citizen_id)?
            .map(|actor| actor.name().to_string());
        let agency_name = self
            .actors
            .find_by_id(&complaint.agency_id)?
            .map(|actor| actor.name().to_string());
        Ok(ComplaintView {
            id: complaint.id,
            title: complaint.title,
            description: complaint.description,
            category: complaint.category,
            status: complaint.status,
            response: complaint.response,
            citizen_id: complaint.citizen_id,
            citizen_name,
            agency_id: complaint.agency_id,
            agency_name,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComplaintServiceError {
    #[error("citizen {0} not found")]
    CitizenNotFound(ActorId),
    #[error("agency {0} not found")]
    AgencyNotFound(ActorId),
    #[error("complaint {0} not found")]
    ComplaintNotFound(ComplaintId),
    #[error("invalid category: {0}")]
    InvalidCategory(#[source] AuthorizationError),
    #[error("unknown complaint status '{0}'")]
    InvalidStatus(String),
    #[error("agency is not authorized to update this complaint")]
    Forbidden,
    #[error("{field} must not be empty")]
    Validation { field: &'static str },
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
