use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque actor identifier, shared by citizens and agencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Discriminator exposed in projections and login responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    Citizen,
    Agency,
}

impl ActorKind {
    pub fn label(self) -> &'static str {
        match self {
            ActorKind::Citizen => "CITIZEN",
            ActorKind::Agency => "AGENCY",
        }
    }
}

/// Role-specific state, fixed at registration.
///
/// The category set is owned exclusively by the agency variant; complaints may
/// only be filed against a category the agency declared for itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorProfile {
    Citizen {
        display_name: String,
    },
    Agency {
        agency_name: String,
        categories: BTreeSet<String>,
    },
}

/// An authenticated party: a citizen or an agency.
///
/// The password credential is stored as a digest and never leaves the
/// identity layer; projections are built through [`Actor::view`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub email: String,
    pub password_hash: String,
    pub profile: ActorProfile,
}

impl Actor {
    pub fn new_citizen(email: String, password_hash: String, display_name: String) -> Self {
        Self {
            id: ActorId::random(),
            email,
            password_hash,
            profile: ActorProfile::Citizen { display_name },
        }
    }

    pub fn new_agency(
        email: String,
        password_hash: String,
        agency_name: String,
        categories: BTreeSet<String>,
    ) -> Self {
        Self {
            id: ActorId::random(),
            email,
            password_hash,
            profile: ActorProfile::Agency {
                agency_name,
                categories,
            },
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self.profile {
            ActorProfile::Citizen { .. } => ActorKind::Citizen,
            ActorProfile::Agency { .. } => ActorKind::Agency,
        }
    }

    /// Display name for citizens, agency name for agencies.
    pub fn name(&self) -> &str {
        match &self.profile {
            ActorProfile::Citizen { display_name } => display_name,
            ActorProfile::Agency { agency_name, .. } => agency_name,
        }
    }

    /// The agency's declared category set, `None` for citizens.
    pub fn categories(&self) -> Option<&BTreeSet<String>> {
        match &self.profile {
            ActorProfile::Citizen { .. } => None,
            ActorProfile::Agency { categories, .. } => Some(categories),
        }
    }

    pub fn view(&self) -> ActorView {
        ActorView {
            id: self.id,
            email: self.email.clone(),
            kind: self.kind(),
            name: self.name().to_string(),
        }
    }

    pub fn directory_entry(&self) -> Option<AgencyDirectoryEntry> {
        match &self.profile {
            ActorProfile::Citizen { .. } => None,
            ActorProfile::Agency {
                agency_name,
                categories,
            } => Some(AgencyDirectoryEntry {
                id: self.id,
                name: agency_name.clone(),
                categories: categories.iter().cloned().collect(),
            }),
        }
    }
}

/// Safe projection of an actor. Omits the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorView {
    pub id: ActorId,
    pub email: String,
    #[serde(rename = "userType")]
    pub kind: ActorKind,
    pub name: String,
}

/// Public directory listing of an agency and the categories it handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyDirectoryEntry {
    pub id: ActorId,
    pub name: String,
    pub categories: Vec<String>,
}
