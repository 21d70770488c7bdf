//! HTTP API for Reelscript.
//!
//! Exposes the generation and refinement contracts over JSON, plus the form
//! options a client needs to build a brief. The API is stateless: every
//! request carries the full brief or script.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod response;

pub use api::{ApiState, create_router, serve};
pub use response::{ApiError, OptionDefaults, OptionsResponse};
