use super::common::*;
use crate::accounts::domain::ActorKind;
use crate::accounts::password::{Argon2Hasher, CredentialHasher};
use crate::accounts::service::AccountServiceError;
use std::collections::BTreeSet;

fn categories(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

#[test]
fn register_citizen_returns_safe_projection() {
    let (service, _) = build_service();

    let view = service
        .register_citizen("alice@example.gov", "hunter2", "Alice")
        .expect("citizen registers");

    assert_eq!(view.email, "alice@example.gov");
    assert_eq!(view.kind, ActorKind::Citizen);
    assert_eq!(view.name, "Alice");

    let serialized = serde_json::to_string(&view).expect("view serializes");
    assert!(
        !serialized.contains("password"),
        "projection must not expose the credential: {serialized}"
    );
}

#[test]
fn register_agency_accepts_empty_category_set() {
    let (service, _) = build_service();

    let view = service
        .register_agency("records@example.gov", "secret", "Records Office", categories(&[]))
        .expect("agency registers");

    assert_eq!(view.kind, ActorKind::Agency);
    assert_eq!(view.name, "Records Office");
}

#[test]
fn duplicate_email_is_rejected_across_kinds() {
    let (service, _) = build_service();

    service
        .register_agency(
            "shared@example.gov",
            "secret",
            "Parks Dept",
            categories(&["Potholes"]),
        )
        .expect("agency registers");

    match service.register_citizen("shared@example.gov", "other", "Alice") {
        Err(AccountServiceError::EmailTaken) => {}
        other => panic!("expected EmailTaken, got {other:?}"),
    }
}

#[test]
fn login_returns_kind_discriminator() {
    let (service, _) = build_service();
    service
        .register_agency(
            "parks@example.gov",
            "secret",
            "Parks Dept",
            categories(&["Litter"]),
        )
        .expect("agency registers");

    let view = service
        .login("parks@example.gov", "secret")
        .expect("login succeeds");
    assert_eq!(view.kind, ActorKind::Agency);
    assert_eq!(view.name, "Parks Dept");
}

#[test]
fn login_failures_are_indistinguishable() {
    let (service, _) = build_service();
    service
        .register_citizen("alice@example.gov", "hunter2", "Alice")
        .expect("citizen registers");

    let unknown_email = service
        .login("nobody@example.gov", "hunter2")
        .expect_err("unknown email rejected");
    let wrong_password = service
        .login("alice@example.gov", "wrong")
        .expect_err("wrong password rejected");

    assert!(matches!(unknown_email, AccountServiceError::InvalidCredentials));
    assert!(matches!(wrong_password, AccountServiceError::InvalidCredentials));
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[test]
fn citizen_lookup_rejects_agency_ids() {
    let (service, _) = build_service();
    let agency = service
        .register_agency(
            "parks@example.gov",
            "secret",
            "Parks Dept",
            categories(&["Potholes"]),
        )
        .expect("agency registers");

    match service.citizen(&agency.id) {
        Err(AccountServiceError::CitizenNotFound(id)) => assert_eq!(id, agency.id),
        other => panic!("expected CitizenNotFound, got {other:?}"),
    }
}

#[test]
fn agency_directory_lists_categories() {
    let (service, _) = build_service();
    service
        .register_citizen("alice@example.gov", "hunter2", "Alice")
        .expect("citizen registers");
    let agency = service
        .register_agency(
            "parks@example.gov",
            "secret",
            "Parks Dept",
            categories(&["Potholes", "Litter"]),
        )
        .expect("agency registers");

    let directory = service.agency_directory().expect("directory lists");
    assert_eq!(directory.len(), 1, "citizens stay out of the directory");
    assert_eq!(directory[0].id, agency.id);
    assert_eq!(directory[0].name, "Parks Dept");
    assert_eq!(directory[0].categories, vec!["Litter", "Potholes"]);
}

#[test]
fn agency_categories_reject_citizen_ids() {
    let (service, _) = build_service();
    let citizen = service
        .register_citizen("alice@example.gov", "hunter2", "Alice")
        .expect("citizen registers");

    match service.agency_categories(&citizen.id) {
        Err(AccountServiceError::AgencyNotFound(_)) => {}
        other => panic!("expected AgencyNotFound, got {other:?}"),
    }
}

#[test]
fn argon2_hasher_verifies_own_digests() {
    let hasher = Argon2Hasher;
    let digest = hasher.hash("correct horse").expect("hash succeeds");

    assert_ne!(digest, "correct horse", "digest must not be the plaintext");
    assert!(hasher.verify("correct horse", &digest).expect("verify runs"));
    assert!(!hasher.verify("battery staple", &digest).expect("verify runs"));
}
