use crate::infra::{InMemoryComplaintStore, InMemoryIdentityStore};
use govcomplaint::accounts::{AccountService, Argon2Hasher};
use govcomplaint::complaints::{ComplaintService, ComplaintView, ListFilter, NewComplaint};
use govcomplaint::error::AppError;
use std::sync::Arc;

/// Scripted walkthrough of the complaint lifecycle against in-memory stores:
/// register an agency and a citizen, file a complaint, triage it, resolve it.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let identity_store = Arc::new(InMemoryIdentityStore::default());
    let complaint_store = Arc::new(InMemoryComplaintStore::default());
    let accounts = AccountService::new(identity_store.clone(), Arc::new(Argon2Hasher));
    let complaints = ComplaintService::new(complaint_store, identity_store);

    println!("== Government Complaint Portal demo ==\n");

    let parks = accounts
        .register_agency(
            "parks@example.gov",
            "secret",
            "Parks Dept",
            ["Potholes", "Litter"].iter().map(|s| s.to_string()).collect(),
        )
        .map_err(demo_failure)?;
    println!("registered agency   {} <{}>", parks.name, parks.email);

    let alice = accounts
        .register_citizen("alice@example.gov", "hunter2", "Alice")
        .map_err(demo_failure)?;
    println!("registered citizen  {} <{}>", alice.name, alice.email);

    let session = accounts
        .login("alice@example.gov", "hunter2")
        .map_err(demo_failure)?;
    println!("logged in as        {} ({})\n", session.name, session.kind.label());

    let created = complaints
        .create(NewComplaint {
            title: "Broken bench".to_string(),
            description: "Slats missing near the east entrance.".to_string(),
            category: "Potholes".to_string(),
            citizen_id: alice.id,
            agency_id: parks.id,
        })
        .map_err(demo_failure)?;
    render("filed", &created);

    let in_progress = complaints
        .update_status(created.id, parks.id, "IN_PROGRESS", None)
        .map_err(demo_failure)?;
    render("triaged", &in_progress);

    let resolved = complaints
        .update_status(created.id, parks.id, "RESOLVED", Some("Fixed".to_string()))
        .map_err(demo_failure)?;
    render("resolved", &resolved);

    let inbox = complaints
        .agency_complaints(parks.id, ListFilter::default())
        .map_err(demo_failure)?;
    println!("\nagency inbox now holds {} complaint(s)", inbox.len());

    Ok(())
}

fn render(step: &str, view: &ComplaintView) {
    println!(
        "{step:<9} #{} '{}' [{}] response={}",
        view.id,
        view.title,
        view.status.label(),
        view.response.as_deref().unwrap_or("-"),
    );
}

// The demo runs against fixed, known-good inputs; any failure is an
// environment problem, reported through the binary's error type.
fn demo_failure(err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::Io(std::io::Error::other(err))
}
