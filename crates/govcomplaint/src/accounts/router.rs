use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::domain::ActorId;
use super::password::CredentialHasher;
use super::repository::IdentityStore;
use super::service::{AccountService, AccountServiceError};

/// Router builder for registration, login, and the agency directory.
pub fn account_router<I, H>(service: Arc<AccountService<I, H>>) -> Router
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    Router::new()
        .route("/api/auth/register", post(register_handler::<I, H>))
        .route("/api/auth/login", post(login_handler::<I, H>))
        .route("/api/auth/citizens/:id", get(citizen_handler::<I, H>))
        .route("/api/agencies", get(agencies_handler::<I, H>))
        .route(
            "/api/agencies/:id/categories",
            get(agency_categories_handler::<I, H>),
        )
        .with_state(service)
}

/// Registration payload, discriminated by the `userType` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "userType")]
pub(crate) enum RegisterRequest {
    #[serde(rename = "CITIZEN", rename_all = "camelCase")]
    Citizen {
        email: String,
        password: String,
        display_name: String,
    },
    #[serde(rename = "AGENCY", rename_all = "camelCase")]
    Agency {
        email: String,
        password: String,
        agency_name: String,
        #[serde(default)]
        categories: BTreeSet<String>,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) async fn register_handler<I, H>(
    State(service): State<Arc<AccountService<I, H>>>,
    axum::Json(request): axum::Json<RegisterRequest>,
) -> Response
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    let result = match request {
        RegisterRequest::Citizen {
            email,
            password,
            display_name,
        } => service.register_citizen(&email, &password, &display_name),
        RegisterRequest::Agency {
            email,
            password,
            agency_name,
            categories,
        } => service.register_agency(&email, &password, &agency_name, categories),
    };

    match result {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn login_handler<I, H>(
    State(service): State<Arc<AccountService<I, H>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    match service.login(&request.email, &request.password) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn citizen_handler<I, H>(
    State(service): State<Arc<AccountService<I, H>>>,
    Path(id): Path<Uuid>,
) -> Response
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    match service.citizen(&ActorId(id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn agencies_handler<I, H>(
    State(service): State<Arc<AccountService<I, H>>>,
) -> Response
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    match service.agency_directory() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn agency_categories_handler<I, H>(
    State(service): State<Arc<AccountService<I, H>>>,
    Path(id): Path<Uuid>,
) -> Response
where
    I: IdentityStore + 'static,
    H: CredentialHasher + 'static,
{
    match service.agency_categories(&ActorId(id)) {
        Ok(categories) => (StatusCode::OK, axum::Json(categories)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AccountServiceError) -> Response {
    let status = match &err {
        AccountServiceError::EmailTaken => StatusCode::CONFLICT,
        AccountServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountServiceError::CitizenNotFound(_) | AccountServiceError::AgencyNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        AccountServiceError::Identity(_) | AccountServiceError::Password(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
