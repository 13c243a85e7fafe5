//! HTTP surface for the student records service.
//!
//! - `POST /students` – Create a record. Returns `201` with the stored record.
//! - `GET /students` – List every record (order unspecified).
//! - `GET /students/:id` – Fetch one record.
//! - `PUT /students/:id` – Replace one record; the body id must match the path id.
//! - `DELETE /students/:id` – Remove one record. Returns `204`.
//! - `GET /students/:id/summary` – Summarize one record as `{ "summary": "..." }`.
//! - `GET /health` – Liveness plus the summary mode picked at startup.
//! - `GET /metrics` – Mutation and summary counters.
//!
//! Errors are returned as plain text: bad input maps to `400`, duplicates to `409`, absent ids to
//! `404`, and summary failures to `500`.

use crate::metrics::MetricsSnapshot;
use crate::records::{RecordError, StudentRecord, parse_id};
use crate::service::{ServiceError, StudentApi};
use crate::summarization::{SummaryError, SummaryMode};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;

/// Build the HTTP router exposing the student API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: StudentApi + 'static,
{
    Router::new()
        .route(
            "/students",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(update_student::<S>)
                .delete(delete_student::<S>),
        )
        .route("/students/:id/summary", get(get_summary::<S>))
        .route("/health", get(get_health::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .with_state(service)
}

async fn create_student<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentRecord>), AppError>
where
    S: StudentApi,
{
    let Json(record) = payload?;
    let created = service.create_student(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_students<S>(State(service): State<Arc<S>>) -> Json<Vec<StudentRecord>>
where
    S: StudentApi,
{
    Json(service.list_students().await)
}

async fn get_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<StudentRecord>, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    Ok(Json(service.get_student(id).await?))
}

async fn update_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> Result<Json<StudentRecord>, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    let Json(record) = payload?;
    let updated = service.update_student(id, record).await?;
    Ok(Json(updated))
}

async fn delete_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    service.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Response body for `GET /students/:id/summary`.
#[derive(Serialize)]
struct SummaryResponse {
    summary: String,
}

async fn get_summary<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<SummaryResponse>, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    let summary = service.summarize_student(id).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    summary_mode: SummaryMode,
}

async fn get_health<S>(State(service): State<Arc<S>>) -> Json<HealthResponse>
where
    S: StudentApi,
{
    Json(HealthResponse {
        status: "ok",
        summary_mode: service.summary_mode(),
    })
}

async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: StudentApi,
{
    Json(service.metrics_snapshot())
}

/// Error rendered as a status code plus a human-readable message.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<RecordError> for AppError {
    fn from(error: RecordError) -> Self {
        let status = if error.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else if error == RecordError::AlreadyExists {
            StatusCode::CONFLICT
        } else {
            StatusCode::NOT_FOUND
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl From<SummaryError> for AppError {
    fn from(error: SummaryError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Record(inner) => inner.into(),
            ServiceError::Summary(inner) => inner.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}
