//! Request handlers for the writers resource.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use almanack_core::Error;

use crate::api::{
    CreateWriterRequest, DeleteParams, DeleteResponse, ErrorBody, ListParams,
    UpdateWriterRequest,
};
use crate::server::AppState;

/// Maps an error to its HTTP response. Client errors expose their
/// message; everything else is logged and redacted.
pub(crate) fn error_response(err: &Error) -> Response {
    let (status, message) = match err {
        Error::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        Error::WriterNotFound => (StatusCode::NOT_FOUND, err.to_string()),
        Error::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, err.to_string()),
        _ => {
            tracing::error!(error = %err, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ErrorBody { error: message })).into_response()
}

pub(crate) async fn health() -> &'static str {
    "OK"
}

pub(crate) async fn list_writers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let filter = match params.into_filter() {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    tracing::debug!(request_id = %request_id, ?filter, "Listing writers");

    match state.store.list(&filter).await {
        Ok(writers) => {
            tracing::debug!(request_id = %request_id, count = writers.len(), "List complete");
            (StatusCode::OK, Json(writers)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn create_writer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateWriterRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(&Error::validation(rejection.body_text())),
    };

    let writer = match request.into_new_writer() {
        Ok(writer) => writer,
        Err(e) => return error_response(&e),
    };

    match state.store.create(writer).await {
        Ok(created) => {
            tracing::debug!(request_id = %request_id, id = created.id, "Writer created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn update_writer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateWriterRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(&Error::validation(rejection.body_text())),
    };

    let (id, update) = match request.into_parts() {
        Ok(parts) => parts,
        Err(e) => return error_response(&e),
    };

    match state.store.update(id, update).await {
        Ok(updated) => {
            tracing::debug!(request_id = %request_id, id, "Writer updated");
            (StatusCode::OK, Json(updated)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn delete_writer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let id = match params.writer_id() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.store.delete(id).await {
        Ok(()) => {
            tracing::debug!(request_id = %request_id, id, "Writer deleted");
            (StatusCode::OK, Json(DeleteResponse { success: true })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn method_not_allowed() -> Response {
    error_response(&Error::MethodNotAllowed)
}

pub(crate) async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
