//! Reelscript: short-form reel scripts from a creative brief.
//!
//! A [`CreativeBrief`] (topic, length, language, tone, objective) is turned
//! into exactly five ready-to-record scripts by an LLM. Any one script can
//! then be refined toward a goal such as "shorter" or "change the tone".
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reelscript::{CreativeBrief, FieldOptions, GeminiClient, generate_scripts};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new()?;
//!     let brief = CreativeBrief::builder()
//!         .topic("3-ingredient healthy breakfasts")
//!         .build()?;
//!
//!     let scripts = generate_scripts(&client, &brief, &FieldOptions::default()).await?;
//!     for (i, script) in scripts.iter().enumerate() {
//!         println!("{}. {}\n", i + 1, script);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` - Google Gemini REST driver (default)
//! - `api` - Enable tests that call the live API
//!
//! # Architecture
//!
//! - `reelscript_error` - Error types
//! - `reelscript_core` - Brief, script and request types, options, config
//! - `reelscript_interface` - `ReelscriptDriver` trait and mock driver
//! - `reelscript_models` - Gemini driver and LLM metrics
//! - `reelscript_flows` - Prompts, output contracts, sanitizing
//! - `reelscript_session` - Stale-safe session state and orchestrator
//! - `reelscript_server` - HTTP API
//!
//! This crate (`reelscript`) re-exports everything for convenience.

pub use reelscript_core::*;
pub use reelscript_error::*;
pub use reelscript_flows::*;
pub use reelscript_interface::*;
pub use reelscript_server::{ApiError, ApiState, OptionsResponse, create_router, serve};
pub use reelscript_session::*;

#[cfg(feature = "gemini")]
pub use reelscript_models::*;

pub mod telemetry;
