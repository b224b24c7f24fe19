use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::accounts::{ActorId, IdentityStore};

use super::domain::ComplaintId;
use super::repository::ComplaintStore;
use super::service::{ComplaintService, ComplaintServiceError, ListFilter, NewComplaint};

/// Router builder for filing, reading, and triaging complaints.
pub fn complaint_router<C, I>(service: Arc<ComplaintService<C, I>>) -> Router
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    Router::new()
        .route("/api/complaints", post(create_handler::<C, I>))
        .route("/api/complaints/:id", get(get_handler::<C, I>))
        .route(
            "/api/complaints/citizen/:citizen_id",
            get(citizen_list_handler::<C, I>),
        )
        .route(
            "/api/complaints/agency/:agency_id",
            get(agency_list_handler::<C, I>),
        )
        .route(
            "/api/complaints/:id/status",
            patch(update_status_handler::<C, I>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ComplaintRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) citizen_id: Uuid,
    pub(crate) agency_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    pub(crate) category: Option<String>,
    pub(crate) status: Option<String>,
}

impl From<ListQuery> for ListFilter {
    fn from(value: ListQuery) -> Self {
        ListFilter {
            category: value.category,
            status: value.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusUpdateQuery {
    pub(crate) agency_id: Uuid,
    pub(crate) status: String,
    pub(crate) response: Option<String>,
}

pub(crate) async fn create_handler<C, I>(
    State(service): State<Arc<ComplaintService<C, I>>>,
    axum::Json(request): axum::Json<ComplaintRequest>,
) -> Response
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    let new_complaint = NewComplaint {
        title: request.title,
        description: request.description,
        category: request.category,
        citizen_id: ActorId(request.citizen_id),
        agency_id: ActorId(request.agency_id),
    };
    match service.create(new_complaint) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<C, I>(
    State(service): State<Arc<ComplaintService<C, I>>>,
    Path(id): Path<u64>,
) -> Response
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    match service.get(ComplaintId(id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn citizen_list_handler<C, I>(
    State(service): State<Arc<ComplaintService<C, I>>>,
    Path(citizen_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Response
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    match service.citizen_complaints(ActorId(citizen_id), query.into()) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn agency_list_handler<C, I>(
    State(service): State<Arc<ComplaintService<C, I>>>,
    Path(agency_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Response
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    match service.agency_complaints(ActorId(agency_id), query.into()) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_status_handler<C, I>(
    State(service): State<Arc<ComplaintService<C, I>>>,
    Path(id): Path<u64>,
    Query(query): Query<StatusUpdateQuery>,
) -> Response
where
    C: ComplaintStore + 'static,
    I: IdentityStore + 'static,
{
    match service.update_status(
        ComplaintId(id),
        ActorId(query.agency_id),
        &query.status,
        query.response,
    ) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ComplaintServiceError) -> Response {
    let status = match &err {
        ComplaintServiceError::CitizenNotFound(_)
        | ComplaintServiceError::AgencyNotFound(_)
        | ComplaintServiceError::ComplaintNotFound(_) => StatusCode::NOT_FOUND,
        ComplaintServiceError::InvalidCategory(_)
        | ComplaintServiceError::InvalidStatus(_)
        | ComplaintServiceError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ComplaintServiceError::Forbidden => StatusCode::FORBIDDEN,
        ComplaintServiceError::Identity(_) | ComplaintServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
