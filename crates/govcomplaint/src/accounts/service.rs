use std::collections::BTreeSet;
use std::sync::Arc;

use super::domain::{Actor, ActorId, ActorKind, ActorView, AgencyDirectoryEntry};
use super::password::{CredentialHasher, PasswordHashError};
use super::repository::{IdentityError, IdentityStore};

/// Registration and login, delegating credential handling to the hashing
/// collaborator and persistence to the identity store.
pub struct AccountService<I, H> {
    actors: Arc<I>,
    hasher: Arc<H>,
}

impl<I, H> AccountService<I, H>
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    pub fn new(actors: Arc<I>, hasher: Arc<H>) -> Self {
        Self { actors, hasher }
    }

    /// Register a citizen account. The email must be unused by any existing
    /// actor, citizen or agency.
    pub fn register_citizen(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<ActorView, AccountServiceError> {
        if self.actors.exists_by_email(email)? {
            return Err(AccountServiceError::EmailTaken);
        }
        let digest = self.hasher.hash(password)?;
        let actor = Actor::new_citizen(email.to_string(), digest, display_name.to_string());
        let stored = self.actors.insert(actor)?;
        Ok(stored.view())
    }

    /// Register an agency account with its category set. The set may be empty;
    /// category growth afterward is an identity-store data concern.
    pub fn register_agency(
        &self,
        email: &str,
        password: &str,
        agency_name: &str,
        categories: BTreeSet<String>,
    ) -> Result<ActorView, AccountServiceError> {
        if self.actors.exists_by_email(email)? {
            return Err(AccountServiceError::EmailTaken);
        }
        let digest = self.hasher.hash(password)?;
        let actor = Actor::new_agency(
            email.to_string(),
            digest,
            agency_name.to_string(),
            categories,
        );
        let stored = self.actors.insert(actor)?;
        Ok(stored.view())
    }

    /// Authenticate by email and password across both actor kinds.
    ///
    /// Unknown email and wrong password collapse into the same
    /// `InvalidCredentials` failure so the caller cannot tell which occurred.
    pub fn login(&self, email: &str, password: &str) -> Result<ActorView, AccountServiceError> {
        let actor = match self.actors.find_by_email(email)? {
            Some(actor) => actor,
            None => return Err(AccountServiceError::InvalidCredentials),
        };
        if self.hasher.verify(password, &actor.password_hash)? {
            Ok(actor.view())
        } else {
            Err(AccountServiceError::InvalidCredentials)
        }
    }

    /// Look up a citizen's public profile by id.
    pub fn citizen(&self, id: &ActorId) -> Result<ActorView, AccountServiceError> {
        match self.actors.find_by_id(id)? {
            Some(actor) if actor.kind() == ActorKind::Citizen => Ok(actor.view()),
            _ => Err(AccountServiceError::CitizenNotFound(*id)),
        }
    }

    /// Categories declared by one agency.
    pub fn agency_categories(&self, id: &ActorId) -> Result<Vec<String>, AccountServiceError> {
        match self.actors.find_by_id(id)? {
            Some(actor) => actor
                .categories()
                .map(|set| set.iter().cloned().collect())
                .ok_or(AccountServiceError::AgencyNotFound(*id)),
            None => Err(AccountServiceError::AgencyNotFound(*id)),
        }
    }

    /// Public listing of every agency and the categories it handles.
    pub fn agency_directory(&self) -> Result<Vec<AgencyDirectoryEntry>, AccountServiceError> {
        let entries = self
            .actors
            .agencies()?
            .iter()
            .filter_map(Actor::directory_entry)
            .collect();
        Ok(entries)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("citizen {0} not found")]
    CitizenNotFound(ActorId),
    #[error("agency {0} not found")]
    AgencyNotFound(ActorId),
    #[error(transparent)]
    Identity(IdentityError),
    #[error(transparent)]
    Password(#[from] PasswordHashError),
}

impl From<IdentityError> for AccountServiceError {
    fn from(value: IdentityError) -> Self {
        match value {
            // The store-level uniqueness backstop surfaces the same way as the
            // service-level check.
            IdentityError::Conflict => Self::EmailTaken,
            other => Self::Identity(other),
        }
    }
}
