use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::ActorId;

/// Store-assigned monotonic complaint identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ComplaintId(pub u64);

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle states for a filed complaint.
///
/// Resolved and Rejected are terminal only in the domain sense: the service
/// deliberately permits any transition, including back to Pending. There is
/// no modeled workflow beyond the single status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "PENDING",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Rejected => "REJECTED",
        }
    }

    /// Parse a status label, case-insensitively. `None` for anything outside
    /// the enumeration.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "RESOLVED" => Some(Self::Resolved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A filed grievance as the store holds it.
///
/// Citizen and agency references are non-owning identifiers; display data is
/// projected fresh from the identity store at read time, never denormalized
/// into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ComplaintStatus,
    pub response: Option<String>,
    pub citizen_id: ActorId,
    pub agency_id: ActorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A complaint awaiting its first save; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ComplaintStatus,
    pub response: Option<String>,
    pub citizen_id: ActorId,
    pub agency_id: ActorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintDraft {
    pub fn into_complaint(self, id: ComplaintId) -> Complaint {
        Complaint {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: self.status,
            response: self.response,
            citizen_id: self.citizen_id,
            agency_id: self.agency_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Exact-match intersection filter for complaint listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub category: Option<String>,
    pub status: Option<ComplaintStatus>,
}

impl ComplaintFilter {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if let Some(category) = &self.category {
            if &complaint.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if complaint.status != status {
                return false;
            }
        }
        true
    }
}

/// Read projection merging the stored record with live actor display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintView {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ComplaintStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub citizen_id: ActorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_name: Option<String>,
    pub agency_id: ActorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
