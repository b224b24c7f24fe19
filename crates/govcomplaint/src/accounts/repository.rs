use super::domain::{Actor, ActorId};

/// Identity-store contract consumed by the account and complaint services.
///
/// Implementations must enforce email uniqueness across BOTH actor kinds as a
/// storage-layer backstop; the account service checks first, the store is the
/// last line of defense.
pub trait IdentityStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<Actor>, IdentityError>;
    fn find_by_id(&self, id: &ActorId) -> Result<Option<Actor>, IdentityError>;
    fn exists_by_email(&self, email: &str) -> Result<bool, IdentityError>;
    fn insert(&self, actor: Actor) -> Result<Actor, IdentityError>;
    /// All registered agencies, for the public directory.
    fn agencies(&self) -> Result<Vec<Actor>, IdentityError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("an actor with that email already exists")]
    Conflict,
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}
