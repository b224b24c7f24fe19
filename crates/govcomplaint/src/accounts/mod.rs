//! Actor identity: registration, login, and the identity-store contract.
//!
//! Every authenticated party is an [`Actor`] whose role is a closed variant —
//! either a citizen filing complaints or an agency receiving them. The role is
//! decided at construction and cannot drift into an invalid string value.

pub mod domain;
pub mod password;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Actor, ActorId, ActorKind, ActorProfile, ActorView, AgencyDirectoryEntry};
pub use password::{Argon2Hasher, CredentialHasher, PasswordHashError};
pub use repository::{IdentityError, IdentityStore};
pub use router::account_router;
pub use service::{AccountService, AccountServiceError};
