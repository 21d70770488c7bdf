//! Model provider integrations for Reelscript.
//!
//! Each provider sits behind its own feature flag.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - Enable with `gemini` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use reelscript_models::GeminiClient;
//! use reelscript_interface::ReelscriptDriver;
//! use reelscript_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Write a reel hook about oats.")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod metrics;

pub use metrics::{LlmMetrics, classify_error};

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    API_KEY_ENV, FALLBACK_API_KEY_ENV, GeminiCandidate, GeminiClient, GeminiContent, GeminiPart,
    GeminiRequest, GeminiResponse, GenerationConfig, PromptFeedback, UsageMetadata,
    from_gemini_response, to_gemini_request,
};
