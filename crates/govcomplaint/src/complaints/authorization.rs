//! Pure authorization predicates. No store access, no side effects; callers
//! resolve actors first and hand in the values.

use crate::accounts::Actor;

use super::domain::Complaint;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("actor is not an agency")]
    NotAnAgency,
    #[error("agency does not handle category '{category}'")]
    CategoryNotOffered { category: String },
    #[error("complaint belongs to a different agency")]
    NotOwningAgency,
}

/// A complaint may be filed against `agency` iff it is an agency and declares
/// the category. The two failure modes are distinguished for diagnostics;
/// both reject the filing.
pub fn can_file(agency: &Actor, category: &str) -> Result<(), AuthorizationError> {
    let categories = agency
        .categories()
        .ok_or(AuthorizationError::NotAnAgency)?;
    if categories.contains(category) {
        Ok(())
    } else {
        Err(AuthorizationError::CategoryNotOffered {
            category: category.to_string(),
        })
    }
}

/// Only the agency a complaint was filed against may change its status or
/// response. Identity is compared by id, never by name; the filing citizen
/// has no update rights.
pub fn can_update_status(actor: &Actor, complaint: &Complaint) -> Result<(), AuthorizationError> {
    if actor.categories().is_none() {
        return Err(AuthorizationError::NotAnAgency);
    }
    if actor.id == complaint.agency_id {
        Ok(())
    } else {
        Err(AuthorizationError::NotOwningAgency)
    }
}
