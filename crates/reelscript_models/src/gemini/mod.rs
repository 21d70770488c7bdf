//! Google Gemini integration over the `generateContent` REST endpoint.

mod client;
mod conversion;
mod dto;

pub use client::{API_KEY_ENV, FALLBACK_API_KEY_ENV, GeminiClient};
pub use conversion::{from_gemini_response, to_gemini_request};
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig,
    PromptFeedback, UsageMetadata,
};
