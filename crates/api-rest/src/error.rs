use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use dialens_core::WorkflowError;
use uuid::Uuid;

/// Errors returned by REST handlers, mapped to status codes in one place.
#[derive(Debug)]
pub enum ApiError {
    SessionNotFound(Uuid),
    BadRequest(String),
    Workflow(WorkflowError),
}

impl From<WorkflowError> for ApiError {
    fn from(e: WorkflowError) -> Self {
        ApiError::Workflow(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, missing_fields) = match self {
            ApiError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("session {id} not found"),
                Vec::new(),
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, Vec::new()),
            ApiError::Workflow(e) => {
                let message = e.to_string();
                match e {
                    WorkflowError::IncompleteAnswers { missing } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        message,
                        missing.into_iter().map(String::from).collect(),
                    ),
                    WorkflowError::Answer(_) => (StatusCode::BAD_REQUEST, message, Vec::new()),
                    WorkflowError::InvalidTransition { .. }
                    | WorkflowError::NotCollecting(_)
                    | WorkflowError::ResultsUnavailable(_) => {
                        (StatusCode::CONFLICT, message, Vec::new())
                    }
                }
            }
        };

        (
            status,
            Json(ErrorRes {
                message,
                missing_fields,
            }),
        )
            .into_response()
    }
}
