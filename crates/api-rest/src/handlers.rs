//! REST handlers for the assessment workflow.
//!
//! Each session resource mirrors one screen of the assessment: creating a session shows
//! the welcome step, `start` opens the form, `answers` fills it in, `submit` moves to the
//! results and `home`/`edit` navigate back.

use crate::convert;
use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    ErrorRes, HealthRes, HealthService, ResultsRes, SessionRes, UpdateAnswersReq,
    UpdateAnswersRes, WorldMapRes,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use dialens_core::facts::GLOBAL_FACTS;
use dialens_core::world_map::build_world_map;
use dialens_core::{Assessment, Session, Transition};
use uuid::Uuid;

type ApiResult<T> = Result<T, ApiError>;

fn with_session<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut Session) -> ApiResult<T>,
) -> ApiResult<T> {
    state
        .sessions
        .with_session(id, f)
        .ok_or(ApiError::SessionNotFound(id))?
}

/// Build the results body. The map is built after the session lock is released.
fn results_res(state: &AppState, session: &Session, assessment: &Assessment) -> ResultsRes {
    let map = build_world_map(state.cfg.map_data_path());
    convert::results(session, assessment, &GLOBAL_FACTS, map.as_ref())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the DiaLens service.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created on the welcome step", body = SessionRes)
    )
)]
/// Start a new assessment session
///
/// The session begins on the welcome step with no answers.
#[axum::debug_handler]
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionRes>) {
    let session = state.sessions.create();
    (StatusCode::CREATED, Json(convert::session(&session)))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current step and answers", body = SessionRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Read a session's current step, answers and missing required answers
#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionRes>> {
    with_session(&state, id, |session| Ok(Json(convert::session(session))))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session ended and answers discarded"),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// End a session, discarding its answers
#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

fn navigate(state: &AppState, id: Uuid, transition: Transition) -> ApiResult<Json<SessionRes>> {
    with_session(state, id, |session| {
        session.apply(transition)?;
        Ok(Json(convert::session(session)))
    })
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/start",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Moved to data collection", body = SessionRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "Not on the welcome step", body = ErrorRes)
    )
)]
/// Move from the welcome step to data collection
#[axum::debug_handler]
pub async fn start_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionRes>> {
    navigate(&state, id, Transition::Start)
}

#[utoipa::path(
    put,
    path = "/sessions/{id}/answers",
    params(("id" = String, Path, description = "Session id")),
    request_body = UpdateAnswersReq,
    responses(
        (status = 200, description = "Answers stored, with lab warnings", body = UpdateAnswersRes),
        (status = 400, description = "Malformed or out-of-range answer", body = ErrorRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "Not on the data collection step", body = ErrorRes)
    )
)]
/// Merge a partial update into the session's answers
///
/// Lab readings that cannot be used are stored as "not provided" and reported as
/// warnings; they never fail the request. A body that does not match the answer
/// types is a bad request.
#[axum::debug_handler]
pub async fn update_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateAnswersReq>, JsonRejection>,
) -> ApiResult<Json<UpdateAnswersRes>> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let update = convert::answer_update(req)?;
    with_session(&state, id, |session| {
        let warnings = session.update_answers(update)?;
        Ok(Json(UpdateAnswersRes {
            session: convert::session(session),
            warnings: warnings.iter().map(convert::lab_warning).collect(),
        }))
    })
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/submit",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Moved to results", body = ResultsRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "Not on the data collection step", body = ErrorRes),
        (status = 422, description = "Required answers missing", body = ErrorRes)
    )
)]
/// Submit the answers and show the results
#[axum::debug_handler]
pub async fn submit_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ResultsRes>> {
    let (session, assessment) = with_session(&state, id, |session| {
        let assessment = session.submit(&state.models)?;
        Ok((session.clone(), assessment))
    })?;
    Ok(Json(results_res(&state, &session, &assessment)))
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/home",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Moved back to the welcome step", body = SessionRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "Not on the data collection step", body = ErrorRes)
    )
)]
/// Return from data collection to the welcome step, keeping the answers
#[axum::debug_handler]
pub async fn return_home(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionRes>> {
    navigate(&state, id, Transition::Home)
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/edit",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Moved back to data collection", body = SessionRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "Not on the results step", body = ErrorRes)
    )
)]
/// Return from the results to data collection
#[axum::debug_handler]
pub async fn edit_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionRes>> {
    navigate(&state, id, Transition::Edit)
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/results",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Freshly computed results", body = ResultsRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "Not on the results step", body = ErrorRes)
    )
)]
/// Recompute and return the results for a session on the results step
#[axum::debug_handler]
pub async fn get_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ResultsRes>> {
    let (session, assessment) = with_session(&state, id, |session| {
        let assessment = session.results(&state.models)?;
        Ok((session.clone(), assessment))
    })?;
    Ok(Json(results_res(&state, &session, &assessment)))
}

#[utoipa::path(
    get,
    path = "/map",
    responses(
        (status = 200, description = "World map of diabetes case counts", body = WorldMapRes),
        (status = 204, description = "No visualization available")
    )
)]
/// World map of adults with diabetes, by country
#[axum::debug_handler]
pub async fn get_world_map(State(state): State<AppState>) -> Response {
    match build_world_map(state.cfg.map_data_path()) {
        Some(map) => Json(convert::world_map(&map)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
