use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{SurveyDocument, SurveyId};
use super::repository::{RepositoryError, SurveyRepository};
use super::service::{SurveyServiceError, SurveyWorkflowService};
use crate::workflows::assessment::{calculate_assessment, SurveyInput};

/// Router builder exposing HTTP endpoints for survey intake, workflow, and scoring.
pub fn survey_router<R>(service: Arc<SurveyWorkflowService<R>>) -> Router
where
    R: SurveyRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments/preview", post(preview_handler))
        .route("/api/v1/surveys", post(create_handler::<R>))
        .route(
            "/api/v1/surveys/:survey_id",
            get(status_handler::<R>).put(update_handler::<R>),
        )
        .route("/api/v1/surveys/:survey_id/submit", post(submit_handler::<R>))
        .route("/api/v1/surveys/:survey_id/verify", post(verify_handler::<R>))
        .route("/api/v1/surveys/:survey_id/approve", post(approve_handler::<R>))
        .route("/api/v1/surveys/:survey_id/reject", post(reject_handler::<R>))
        .route("/api/v1/surveys/:survey_id/report", get(report_handler::<R>))
        .route("/api/v1/beneficiaries/queue", get(queue_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueParams {
    limit: Option<usize>,
}

pub(crate) async fn preview_handler(axum::Json(input): axum::Json<SurveyInput>) -> Response {
    let scores = calculate_assessment(&input, Utc::now());
    (StatusCode::OK, axum::Json(scores)).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    axum::Json(document): axum::Json<SurveyDocument>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.save_draft(document) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
    axum::Json(document): axum::Json<SurveyDocument>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.update(&SurveyId(survey_id), document) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.get(&SurveyId(survey_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.submit(&SurveyId(survey_id)) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verify_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.verify(&SurveyId(survey_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.approve(&SurveyId(survey_id)) {
        Ok(card) => (StatusCode::OK, axum::Json(card)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.reject(&SurveyId(survey_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.report(&SurveyId(survey_id)) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report.render_text(),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn queue_handler<R>(
    State(service): State<Arc<SurveyWorkflowService<R>>>,
    Query(params): Query<QueueParams>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let limit = params.limit.unwrap_or_else(|| service.queue_limit());
    match service.sponsorship_queue(limit) {
        Ok(cards) => (StatusCode::OK, axum::Json(cards)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SurveyServiceError) -> Response {
    let status = match &error {
        SurveyServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SurveyServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SurveyServiceError::Repository(RepositoryError::Conflict)
        | SurveyServiceError::Repository(RepositoryError::StaleStatus { .. })
        | SurveyServiceError::InvalidTransition { .. }
        | SurveyServiceError::ScoresFrozen(_) => StatusCode::CONFLICT,
        SurveyServiceError::Repository(RepositoryError::Unavailable(_))
        | SurveyServiceError::MissingScores(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
