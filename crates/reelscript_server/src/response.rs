//! Response bodies and error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use reelscript_core::{DEFAULT_OBJECTIVE, DEFAULT_TONE, FieldOptions, ReelLength};
use reelscript_error::{ReelscriptError, ValidationError};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

/// Choices for every brief field, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Reel durations
    pub lengths: Vec<ReelLength>,
    /// Languages, detected language first
    pub languages: Vec<String>,
    /// Tones, sorted
    pub tones: Vec<String>,
    /// Objectives, sorted
    pub objectives: Vec<String>,
    /// Initial form values
    pub defaults: OptionDefaults,
}

/// Initial form values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDefaults {
    /// Default reel duration
    pub length: ReelLength,
    /// Detected language
    pub language: String,
    /// Default tone
    pub tone: String,
    /// Default objective
    pub objective: String,
}

impl OptionsResponse {
    /// Build the options for a client whose `Accept-Language` header is given.
    pub fn for_locale(options: &FieldOptions, accept_language: Option<&str>) -> Self {
        let language = options.detect_language(accept_language);
        Self {
            lengths: ReelLength::all(),
            languages: options.ordered_languages(&language),
            tones: options.sorted_tones(),
            objectives: options.sorted_objectives(),
            defaults: OptionDefaults {
                length: ReelLength::default(),
                language,
                tone: DEFAULT_TONE.to_string(),
                objective: DEFAULT_OBJECTIVE.to_string(),
            },
        }
    }
}

/// Failure returned to API clients.
///
/// Validation issues are reported per field. Every other failure collapses
/// to a fixed message; the detail only goes to the log.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be decoded
    BadRequest(String),
    /// One or more fields were rejected
    Validation(ValidationError),
    /// The model call or its output failed
    Upstream(&'static str),
}

impl ApiError {
    /// Map a flow error, logging anything that is not a validation failure.
    pub fn from_flow(err: ReelscriptError, message: &'static str) -> Self {
        match err.as_validation() {
            Some(validation) => ApiError::Validation(validation.clone()),
            None => {
                error!(error = %err, "Flow failed");
                ApiError::Upstream(message)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Validation(err) => {
                let mut fields: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
                for issue in &err.issues {
                    fields
                        .entry(issue.field().key())
                        .or_default()
                        .push(issue.to_string());
                }
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": "Please fix the highlighted fields.", "fields": fields })),
                )
                    .into_response()
            }
            ApiError::Upstream(message) => {
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
