//! Trait definition for model backends.

use async_trait::async_trait;
use reelscript_core::{GenerateRequest, GenerateResponse};
use reelscript_error::ReelscriptResult;

/// Core trait that every model backend implements.
///
/// A driver turns one [`GenerateRequest`] into one [`GenerateResponse`]; it
/// knows nothing about briefs or scripts.
#[async_trait]
pub trait ReelscriptDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.0-flash").
    fn model_name(&self) -> &str;
}
