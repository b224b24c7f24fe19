//! Complaint lifecycle: filing, triage, and the authorization rules gating
//! every mutation.

pub mod authorization;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use authorization::{can_file, can_update_status, AuthorizationError};
pub use domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintStatus, ComplaintView,
};
pub use repository::{ComplaintStore, RepositoryError};
pub use router::complaint_router;
pub use service::{ComplaintService, ComplaintServiceError, ListFilter, NewComplaint};
