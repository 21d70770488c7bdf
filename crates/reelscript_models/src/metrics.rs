//! Metrics for model API calls.
//!
//! OpenTelemetry instruments for request counts, failures and latency,
//! labeled by provider, model and operation.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for model API interactions.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total model API requests
    pub requests: Counter<u64>,
    /// Failed model API requests
    pub errors: Counter<u64>,
    /// Model API call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("reelscript_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total LLM API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed LLM API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("LLM API call duration")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    fn labels(provider: &str, model: &str, operation: &str) -> Vec<KeyValue> {
        vec![
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.to_string()),
        ]
    }

    /// Record a successful request.
    pub fn record_request(&self, provider: &str, model: &str, operation: &str, duration_secs: f64) {
        let labels = Self::labels(provider, model, operation);
        self.requests.add(1, &labels);
        self.duration.record(duration_secs, &labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, operation: &str, error_type: &str) {
        let mut labels = Self::labels(provider, model, operation);
        labels.push(KeyValue::new("error_type", error_type.to_string()));
        self.errors.add(1, &labels);
    }

    /// Record token usage reported by the provider.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        self.tokens_used
            .add(total_tokens, &[KeyValue::new("model", model.to_string())]);
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify error type for metrics labeling.
///
/// Returns one of: "rate_limit", "auth", "blocked", "network", "timeout",
/// "invalid_request", "contract", "unknown"
pub fn classify_error(error: &dyn std::error::Error) -> &'static str {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("rate limit") || error_str.contains("429") {
        "rate_limit"
    } else if error_str.contains("api_key")
        || error_str.contains("auth")
        || error_str.contains("401")
        || error_str.contains("403")
    {
        "auth"
    } else if error_str.contains("blocked") {
        "blocked"
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        "timeout"
    } else if error_str.contains("network")
        || error_str.contains("connection")
        || error_str.contains("dns")
        || error_str.contains("request failed")
    {
        "network"
    } else if error_str.contains("400") || error_str.contains("invalid") {
        "invalid_request"
    } else if error_str.contains("contract error") {
        "contract"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscript_error::{ContractError, ContractErrorKind, GeminiError, GeminiErrorKind};

    #[test]
    fn test_classify_gemini_errors() {
        let http = |status_code| {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: String::new(),
            })
        };
        assert_eq!(classify_error(&http(429)), "rate_limit");
        assert_eq!(classify_error(&http(403)), "auth");
        assert_eq!(classify_error(&http(400)), "invalid_request");
        assert_eq!(
            classify_error(&GeminiError::new(GeminiErrorKind::MissingApiKey)),
            "auth"
        );
        assert_eq!(
            classify_error(&GeminiError::new(GeminiErrorKind::Blocked("SAFETY".into()))),
            "blocked"
        );
    }

    #[test]
    fn test_classify_contract_error() {
        let err = ContractError::new(ContractErrorKind::MissingField("scripts"));
        assert_eq!(classify_error(&err), "contract");
    }
}
