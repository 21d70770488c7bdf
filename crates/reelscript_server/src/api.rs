//! Routes and handlers.

use crate::{ApiError, OptionsResponse};
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::ACCEPT_LANGUAGE},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use reelscript_core::{BriefForm, FieldOptions, RefinementForm, RefinementResult, ScriptSet};
use reelscript_error::{HttpError, ReelscriptResult};
use reelscript_flows::{generate_scripts, refine_script};
use reelscript_interface::ReelscriptDriver;
use reelscript_session::{GENERATION_FAILED_MESSAGE, REFINEMENT_FAILED_MESSAGE};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    driver: Arc<dyn ReelscriptDriver>,
    options: Arc<FieldOptions>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(driver: Arc<dyn ReelscriptDriver>, options: FieldOptions) -> Self {
        Self {
            driver,
            options: Arc::new(options),
        }
    }
}

/// Creates the API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/options", get(get_options))
        .route("/api/scripts", post(create_scripts))
        .route("/api/scripts/refine", post(refine))
        .with_state(state)
}

/// Bind `addr` and serve the API until the process stops.
///
/// # Errors
///
/// Returns an [`HttpError`] if the address cannot be bound or the server
/// fails.
pub async fn serve(state: ApiState, addr: &str) -> ReelscriptResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", addr, e)))?;
    info!(addr, "Serving Reelscript API");

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Form options, with languages ordered for the caller's locale.
async fn get_options(State(state): State<ApiState>, headers: HeaderMap) -> Json<OptionsResponse> {
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    Json(OptionsResponse::for_locale(&state.options, accept_language))
}

/// Generate five scripts from a brief.
#[instrument(skip_all)]
async fn create_scripts(
    State(state): State<ApiState>,
    body: Result<Json<BriefForm>, JsonRejection>,
) -> Result<Json<ScriptSet>, ApiError> {
    let Json(form) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let brief = form.into_brief(&state.options)?;

    generate_scripts(state.driver.as_ref(), &brief, &state.options)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_flow(e, GENERATION_FAILED_MESSAGE))
}

/// Refine one script toward a goal.
#[instrument(skip_all)]
async fn refine(
    State(state): State<ApiState>,
    body: Result<Json<RefinementForm>, JsonRejection>,
) -> Result<Json<RefinementResult>, ApiError> {
    let Json(form) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = form.into_request()?;

    refine_script(state.driver.as_ref(), &request)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_flow(e, REFINEMENT_FAILED_MESSAGE))
}
