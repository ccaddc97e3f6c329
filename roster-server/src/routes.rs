//! REST API handlers for the duty-roster solver.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dashmap::DashMap;
use roster_core::model::{ScheduleRequest, ScheduleResponse};
use roster_core::senior::{SeniorScheduleRequest, solve_senior};
use roster_core::{solve, Settings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers. Solves run to completion inline
/// (the MILP backend offers no progress callback to stream partial results
/// through, see SPEC_FULL.md §4.6/§9); `history` only remembers recent
/// results for later retrieval by id.
pub struct AppState {
    default_settings: Settings,
    senior_default_settings: Settings,
    history: DashMap<String, ScheduleResponse>,
}

impl AppState {
    pub fn new(default_settings: Settings, senior_default_settings: Settings) -> Self {
        Self {
            default_settings,
            senior_default_settings,
            history: DashMap::new(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/v1/schema/request", get(schema_request))
        .route("/v1/schema/response", get(schema_response))
        .route("/v1/schema/senior-request", get(schema_senior_request))
        .route("/v1/schedule", post(create_schedule))
        .route("/v1/schedule/senior", post(create_senior_schedule))
        .route("/v1/schedule/{id}", get(get_schedule))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoResponse {
    name: &'static str,
    version: &'static str,
}

async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "roster-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn schema_request() -> Json<schemars::schema::RootSchema> {
    Json(roster_contracts::schedule_request_schema())
}

async fn schema_response() -> Json<schemars::schema::RootSchema> {
    Json(roster_contracts::schedule_response_schema())
}

async fn schema_senior_request() -> Json<schemars::schema::RootSchema> {
    Json(roster_contracts::senior_schedule_request_schema())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveQuery {
    #[serde(default)]
    settings: Option<Settings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleRequestBody {
    #[serde(flatten)]
    request: ScheduleRequest,
    #[serde(flatten)]
    options: SolveQuery,
}

/// POST /v1/schedule - run the full-variant solver.
async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScheduleRequestBody>,
) -> Result<Json<ScheduleResponse>, (StatusCode, String)> {
    let settings = body.options.settings.unwrap_or_else(|| state.default_settings.clone());
    tracing::info!(users = body.request.users.len(), slots = body.request.slots.len(), "received solve request");

    let response = solve(&body.request, &settings).map_err(|e| (StatusCode::BAD_REQUEST, format!("{e}")))?;

    let id = Uuid::new_v4().to_string();
    state.history.insert(id, response.clone());
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeniorScheduleRequestBody {
    #[serde(flatten)]
    request: SeniorScheduleRequest,
    #[serde(flatten)]
    options: SolveQuery,
}

/// POST /v1/schedule/senior - run the senior-variant solver.
async fn create_senior_schedule(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeniorScheduleRequestBody>,
) -> Result<Json<ScheduleResponse>, (StatusCode, String)> {
    let settings = body.options.settings.unwrap_or_else(|| state.senior_default_settings.clone());
    tracing::info!(users = body.request.users.len(), slots = body.request.slots.len(), "received senior solve request");

    let response = solve_senior(&body.request, &settings).map_err(|e| (StatusCode::BAD_REQUEST, format!("{e}")))?;

    let id = Uuid::new_v4().to_string();
    state.history.insert(id, response.clone());
    Ok(Json(response))
}

/// GET /v1/schedule/{id} - retrieve a previously computed response.
async fn get_schedule(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<ScheduleResponse>, StatusCode> {
    state.history.get(&id).map(|entry| Json(entry.clone())).ok_or(StatusCode::NOT_FOUND)
}
